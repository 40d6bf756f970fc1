//! Before/after statistics for an optimizer run.

use std::collections::BTreeMap;

use qsim_ir::Instruction;
use serde::Serialize;

use crate::analysis::{circuit_depth, gate_counts};

/// Gate totals, depths and per-kind reductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationReport {
    /// Gate count before optimization.
    pub original_gate_count: usize,
    /// Gate count after optimization.
    pub optimized_gate_count: usize,
    /// Depth before optimization.
    pub original_depth: usize,
    /// Depth after optimization.
    pub optimized_depth: usize,
    /// How many gates of each kind were removed. Kinds present on either
    /// side appear; merged rotations count as one remaining gate.
    pub gate_count_reduction: BTreeMap<String, i64>,
}

impl OptimizationReport {
    /// Compare a sequence with its optimized form.
    pub fn new(original: &[Instruction], optimized: &[Instruction]) -> Self {
        let before = gate_counts(original);
        let after = gate_counts(optimized);

        let mut gate_count_reduction = BTreeMap::new();
        for name in before.keys().chain(after.keys()) {
            let removed = before.get(name).copied().unwrap_or(0) as i64
                - after.get(name).copied().unwrap_or(0) as i64;
            gate_count_reduction.insert(name.clone(), removed);
        }

        Self {
            original_gate_count: original.len(),
            optimized_gate_count: optimized.len(),
            original_depth: circuit_depth(original),
            optimized_depth: circuit_depth(optimized),
            gate_count_reduction,
        }
    }

    /// Number of gates removed in total.
    pub fn gates_removed(&self) -> usize {
        self.original_gate_count
            .saturating_sub(self.optimized_gate_count)
    }
}
