//! qsim circuit program model
//!
//! This crate holds the data every other qsim crate speaks: the closed set of
//! [`StandardGate`]s, gate records ([`Instruction`]), the [`Circuit`] program
//! builder, and the JSON interchange format ([`CircuitSpec`]).
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 2);
//! assert_eq!(Circuit::from_json(&circuit.to_json().unwrap()).unwrap(), circuit);
//! ```
//!
//! # Bit order
//!
//! Qubit 0 is the most significant bit of a basis index: in a 3-qubit
//! register the basis state `|100⟩` (qubit 0 set) has index 4.
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Parameter |
//! |------|--------|-----------|
//! | `X`, `Y`, `Z` | 1 | |
//! | `H`, `T`, `S` | 1 | |
//! | `RX`, `RY`, `RZ` | 1 | `theta` |
//! | `PHASE` | 1 | `phi` |
//! | `CNOT`, `CZ`, `SWAP` | 2 | |
//! | `TOFFOLI` | 3 | |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod interchange;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{GateInfo, Params, RotationAxis, StandardGate};
pub use instruction::Instruction;
pub use interchange::{CircuitSpec, GateSpec};
pub use qubit::QubitId;
