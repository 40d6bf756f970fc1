//! Depth and gate-count analysis.
//!
//! These are independent of the rewrite pipeline and never change a sequence.

use std::collections::BTreeMap;

use qsim_ir::{Instruction, QubitId};
use rustc_hash::FxHashMap;

/// As-soon-as-possible depth of every gate.
///
/// A gate's depth is one more than the deepest gate previously seen on any
/// of its qubits, so gates on disjoint qubits share a layer.
pub fn gate_depths(instructions: &[Instruction]) -> Vec<usize> {
    let mut qubit_depth: FxHashMap<QubitId, usize> = FxHashMap::default();
    instructions
        .iter()
        .map(|inst| {
            let depth = 1 + inst
                .qubits
                .iter()
                .filter_map(|q| qubit_depth.get(q).copied())
                .max()
                .unwrap_or(0);
            for &q in &inst.qubits {
                qubit_depth.insert(q, depth);
            }
            depth
        })
        .collect()
}

/// Critical-path length of the sequence. Zero for an empty sequence.
pub fn circuit_depth(instructions: &[Instruction]) -> usize {
    gate_depths(instructions).into_iter().max().unwrap_or(0)
}

/// Number of gates of each kind, keyed by canonical name.
pub fn gate_counts(instructions: &[Instruction]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for inst in instructions {
        *counts.entry(inst.name().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_ir::Circuit;

    #[test]
    fn test_empty() {
        assert_eq!(circuit_depth(&[]), 0);
        assert!(gate_counts(&[]).is_empty());
    }

    #[test]
    fn test_parallel_gates_share_a_layer() {
        let mut circuit = Circuit::new(3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .h(QubitId(2))
            .unwrap();
        assert_eq!(gate_depths(circuit.instructions()), vec![1, 1, 1]);
        assert_eq!(circuit_depth(circuit.instructions()), 1);
    }

    #[test]
    fn test_ghz_depth_is_linear() {
        let circuit = Circuit::ghz(4).unwrap();
        assert_eq!(gate_depths(circuit.instructions()), vec![1, 2, 3, 4]);
        assert_eq!(circuit_depth(circuit.instructions()), 4);
    }

    #[test]
    fn test_gate_counts() {
        let mut circuit = Circuit::new(2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        let counts = gate_counts(circuit.instructions());
        assert_eq!(counts.get("H"), Some(&2));
        assert_eq!(counts.get("CNOT"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
