//! Pass trait and types for optimizer passes.

use qsim_ir::Instruction;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of optimizer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads the gate sequence and writes only to the `PropertySet`.
    Analysis,
    /// Produces a new gate sequence.
    Transformation,
}

/// A pure rewrite or analysis step over a gate sequence.
///
/// Passes take the sequence by value and hand back the sequence the next
/// pass should see. Gate records are never edited in place: a pass either
/// forwards a record unchanged, drops it, or emits a new one.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass.
    ///
    /// Analysis passes must return `instructions` unchanged.
    fn run(
        &self,
        instructions: Vec<Instruction>,
        properties: &mut PropertySet,
    ) -> CompileResult<Vec<Instruction>>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _instructions: &[Instruction], _properties: &PropertySet) -> bool {
        true
    }
}
