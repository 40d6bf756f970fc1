//! qsim simulation engine
//!
//! Classical simulation of qubit registers: a gate library of dense
//! unitaries, dense and compressed-row operator expansion, a tensor
//! contraction backend with MPS construction, and a seeded measurement
//! sampler, tied together by the [`Simulator`] session.
//!
//! # Example
//!
//! ```rust
//! use qsim_ir::StandardGate;
//! use qsim_sim::{Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::with_config(2, SimulatorConfig::new().with_seed(7)).unwrap();
//! sim.append(StandardGate::H, &[0]).unwrap();
//! sim.append(StandardGate::CX, &[0, 1]).unwrap();
//! sim.run(true).unwrap();
//!
//! let probs = sim.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//!
//! let counts = sim.measure(1000).unwrap();
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```
//!
//! # Representations
//!
//! | Policy | Per-gate work | Gates supported |
//! |--------|---------------|-----------------|
//! | dense | 2ⁿ×2ⁿ array product | 1-qubit, adjacent 2-qubit |
//! | sparse | CSR product | 1-qubit, adjacent 2-qubit |
//! | tensor network | axis contraction | any arity, any targets |
//!
//! Without an explicit choice a session uses sparse above ten qubits or
//! when the caller declares gate sparsity above 0.7, and dense otherwise.

pub mod bloch;
pub mod config;
pub mod counts;
pub mod engine;
pub mod error;
pub mod expand;
pub mod library;
pub mod measure;
pub mod mps;
pub mod sparse;
pub mod statevector;
pub mod tensor;

pub use bloch::{BlochVector, QubitState};
pub use config::{Representation, SimulatorConfig};
pub use counts::Counts;
pub use engine::{CircuitInfo, Simulator, execute, validate_program};
pub use error::{SimError, SimResult};
pub use expand::{Operator, expand_dense, expand_sparse};
pub use library::{gate_matrix, is_unitary, lookup};
pub use measure::{PartialMeasurement, Sampler, collapse_state, expectation_value, project};
pub use mps::{DEFAULT_MAX_BOND_DIM, Mps, MpsSummary};
pub use nalgebra_sparse::CsrMatrix;
pub use statevector::{MAX_QUBITS, Statevector, outcome_to_bitstring};
pub use tensor::StateTensor;
