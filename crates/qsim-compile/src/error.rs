//! Error types for the optimizer crate.

use qsim_ir::IrError;
use thiserror::Error;

/// Errors that can occur while optimizing a program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR layer.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Rule name not recognized.
    #[error("Unknown optimization rule '{0}' (expected cancel_inverse, merge_rotations or commute_gates)")]
    UnknownRule(String),
}

/// Result type for optimizer operations.
pub type CompileResult<T> = Result<T, CompileError>;
