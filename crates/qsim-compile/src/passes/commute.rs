//! Depth annotation lowering for commuting neighbours.

use qsim_ir::Instruction;
use tracing::debug;

use crate::analysis::gate_depths;
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Lowers the recorded depth of gates that commute with their predecessor.
///
/// Two adjacent gates on disjoint qubits may execute in parallel, so the
/// later one never needs a deeper slot than the earlier one. The pass walks
/// adjacent pairs, copying the earlier depth onto the later gate, until
/// nothing changes. The gate sequence itself is returned untouched; only
/// [`PropertySet::depths`] is written. Without an existing annotation the
/// table is seeded from [`gate_depths`].
pub struct CommuteGates;

impl CommuteGates {
    /// Create a new commutation analysis pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommuteGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for CommuteGates {
    fn name(&self) -> &'static str {
        "commute_gates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(
        &self,
        instructions: Vec<Instruction>,
        properties: &mut PropertySet,
    ) -> CompileResult<Vec<Instruction>> {
        let mut depths = match properties.depths.take() {
            Some(d) if d.len() == instructions.len() => d,
            _ => gate_depths(&instructions),
        };

        let mut sweeps = 0;
        let mut changed = true;
        while changed {
            changed = false;
            sweeps += 1;
            for (i, pair) in instructions.windows(2).enumerate() {
                if pair[0].is_disjoint(&pair[1]) && depths[i + 1] > depths[i] {
                    depths[i + 1] = depths[i];
                    changed = true;
                }
            }
        }

        debug!("commute_gates reached a fixpoint after {sweeps} sweeps");
        properties.depths = Some(depths);
        Ok(instructions)
    }
}
