//! Self-inverse pair cancellation.

use qsim_ir::Instruction;
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Drops adjacent pairs of identical self-inverse gates.
///
/// X·X = Y·Y = Z·Z = H·H = CNOT·CNOT = I. Only strictly consecutive gates
/// with the same target list are paired, and the scan is a single forward
/// pass: after a pair is dropped scanning resumes past it, so a pair that
/// becomes adjacent only through an earlier cancellation survives until the
/// pass is run again.
pub struct CancelInverse;

impl CancelInverse {
    /// Create a new inverse cancellation pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for CancelInverse {
    fn default() -> Self {
        Self::new()
    }
}

/// True if `a` followed by `b` is the identity.
fn cancels(a: &Instruction, b: &Instruction) -> bool {
    a.gate.is_self_inverse() && a.gate == b.gate && a.qubits == b.qubits
}

impl Pass for CancelInverse {
    fn name(&self) -> &'static str {
        "cancel_inverse"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(
        &self,
        instructions: Vec<Instruction>,
        _properties: &mut PropertySet,
    ) -> CompileResult<Vec<Instruction>> {
        let before = instructions.len();
        let mut optimized = Vec::with_capacity(before);
        let mut iter = instructions.into_iter().peekable();

        while let Some(inst) = iter.next() {
            if iter.peek().is_some_and(|next| cancels(&inst, next)) {
                iter.next();
                continue;
            }
            optimized.push(inst);
        }

        debug!("cancel_inverse removed {} gates", before - optimized.len());
        Ok(optimized)
    }
}
