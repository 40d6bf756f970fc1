//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building or decoding a circuit program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name is not part of the gate library.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Qubit index lies outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register (gate: {gate_name})")]
    IndexOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register size.
        num_qubits: u32,
        /// Gate that referenced the qubit.
        gate_name: String,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Gate that repeated it.
        gate_name: String,
    },

    /// Interchange document could not be parsed or written.
    #[error("Interchange JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
