//! qsim circuit optimizer
//!
//! A small rule-based rewrite pipeline over gate sequences, plus the depth
//! and gate-count analyses used for reporting.
//!
//! # Rules
//!
//! Applied in this order by default; callers may pick any subset in any order:
//!
//! - [`passes::CancelInverse`]: drop adjacent identical X, Y, Z, H or CNOT pairs
//! - [`passes::MergeRotations`]: fuse runs of RX, RY or RZ on one qubit
//! - [`passes::CommuteGates`]: lower depth annotations of commuting neighbours
//!
//! Rewrites are restricted to exact algebraic identities on strictly adjacent
//! gates, so an optimized program prepares the same state as the original
//! (merged rotations are reduced modulo 2π, which is exact up to global phase).
//!
//! ```rust
//! use qsim_compile::{Rule, optimize};
//! use qsim_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(1);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.rz(0.5, QubitId(0)).unwrap();
//!
//! let result = optimize(circuit.instructions(), &Rule::DEFAULT_PIPELINE).unwrap();
//! assert_eq!(result.instructions.len(), 1);
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait and add it with [`PassManager::add_pass`]:
//!
//! ```rust
//! use qsim_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qsim_ir::Instruction;
//!
//! struct DropEverything;
//!
//! impl Pass for DropEverything {
//!     fn name(&self) -> &str { "drop_everything" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, _: Vec<Instruction>, _: &mut PropertySet) -> CompileResult<Vec<Instruction>> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod report;

// Built-in passes
pub mod passes;

pub use analysis::{circuit_depth, gate_counts, gate_depths};
pub use error::{CompileError, CompileResult};
pub use manager::{Optimized, PassManager, Rule, optimize};
pub use pass::{Pass, PassKind};
pub use property::PropertySet;
pub use report::OptimizationReport;
