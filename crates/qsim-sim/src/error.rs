//! Error types for the simulation crate.

use qsim_compile::CompileError;
use qsim_ir::IrError;
use thiserror::Error;

/// Errors produced while expanding, running or measuring a program.
///
/// Every variant is fatal to the current call; none is worth retrying, since
/// gate application is deterministic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Program construction or decoding failed (this includes unknown gates).
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Optimizer failed.
    #[error("Optimizer error: {0}")]
    Compile(#[from] CompileError),

    /// The operator expansion path cannot place a gate of this width.
    #[error("Gate '{gate}' acts on {arity} qubits; operator expansion supports 1 or 2")]
    UnsupportedArity {
        /// Gate name.
        gate: String,
        /// Number of target qubits.
        arity: usize,
    },

    /// Two-qubit gate targets are not neighbours.
    #[error("Gate '{gate}' targets {qubits:?}; operator expansion requires adjacent qubits")]
    UnsupportedTopology {
        /// Gate name.
        gate: String,
        /// The requested targets.
        qubits: Vec<usize>,
    },

    /// Qubit index outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register")]
    IndexOutOfRange {
        /// The offending index.
        qubit: usize,
        /// Register size.
        num_qubits: usize,
    },

    /// Target list names the same qubit twice.
    #[error("Qubit {qubit} appears more than once in target list")]
    DuplicateQubit {
        /// The repeated index.
        qubit: usize,
    },

    /// Projection retained (numerically) no probability mass.
    #[error("Projection onto qubits {qubits:?} = {value} retains probability {mass:e}")]
    DegenerateProjection {
        /// Measured qubits, ascending.
        qubits: Vec<usize>,
        /// Requested bit pattern.
        value: usize,
        /// Retained probability mass.
        mass: f64,
    },

    /// Vector or matrix has the wrong size.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },

    /// Basis index outside the state space.
    #[error("Outcome {outcome} out of range for dimension {dim}")]
    InvalidOutcome {
        /// Requested index.
        outcome: usize,
        /// State dimension.
        dim: usize,
    },

    /// Bitstring contains characters other than 0 and 1.
    #[error("Invalid bitstring '{0}'")]
    InvalidBitstring(String),

    /// Observable produced a complex expectation value.
    #[error("Observable is not Hermitian: expectation has imaginary part {imaginary:e}")]
    NonHermitian {
        /// Imaginary part of ⟨ψ|O|ψ⟩.
        imaginary: f64,
    },

    /// Probability distribution cannot be sampled.
    #[error("Cannot sample state: {0}")]
    Sampling(String),

    /// Tensor reshape failed.
    #[error("Tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Singular value decomposition did not produce singular vectors.
    #[error("SVD failed at MPS site {site}")]
    Decomposition {
        /// Site whose bond was being split.
        site: usize,
    },

    /// Amplitudes with zero norm cannot be normalized.
    #[error("State has zero norm")]
    ZeroNorm,

    /// Configuration value not recognized.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
