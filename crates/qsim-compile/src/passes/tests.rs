//! Tests for optimizer passes.

use std::f64::consts::{PI, TAU};

use qsim_ir::{Circuit, QubitId, StandardGate};

use crate::analysis::gate_depths;
use crate::manager::{PassManager, Rule, optimize};
use crate::pass::Pass;
use crate::property::PropertySet;

use super::{CancelInverse, CommuteGates, MergeRotations};

fn run_pass(pass: &dyn Pass, circuit: &Circuit) -> (Vec<qsim_ir::Instruction>, PropertySet) {
    let mut props = PropertySet::new();
    let out = pass
        .run(circuit.instructions().to_vec(), &mut props)
        .unwrap();
    (out, props)
}

// ---------------------------------------------------------------------------
// cancel_inverse
// ---------------------------------------------------------------------------

#[test]
fn test_cancel_self_inverse_pairs() {
    let mut circuit = Circuit::new(1);
    for _ in 0..2 {
        circuit.x(QubitId(0)).unwrap();
    }
    for _ in 0..2 {
        circuit.h(QubitId(0)).unwrap();
    }
    for _ in 0..2 {
        circuit.y(QubitId(0)).unwrap();
    }

    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert!(out.is_empty(), "X X H H Y Y should vanish, got {out:?}");
}

#[test]
fn test_cancel_cnot_requires_identical_targets() {
    let mut circuit = Circuit::new(2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(1), QubitId(0)).unwrap();

    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert_eq!(out.len(), 2);

    let mut circuit = Circuit::new(2);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert!(out.is_empty());
}

#[test]
fn test_cancel_skips_non_self_inverse() {
    let mut circuit = Circuit::new(1);
    circuit.s(QubitId(0)).unwrap();
    circuit.s(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();

    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert_eq!(out.len(), 4);
}

#[test]
fn test_cancel_is_single_pass() {
    // X H H X: the inner pair cancels, the outer X X only become adjacent afterwards.
    let mut circuit = Circuit::new(1);
    circuit.x(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();

    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|i| i.gate == StandardGate::X));

    // A second invocation finishes the job.
    let mut props = PropertySet::new();
    let out = CancelInverse::new().run(out, &mut props).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_cancel_does_not_pair_across_gates_on_other_qubits() {
    let mut circuit = Circuit::new(2);
    circuit.x(QubitId(0)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.x(QubitId(0)).unwrap();

    let (out, _) = run_pass(&CancelInverse::new(), &circuit);
    assert_eq!(out.len(), 3);
}

// ---------------------------------------------------------------------------
// merge_rotations
// ---------------------------------------------------------------------------

#[test]
fn test_merge_sums_angles() {
    let mut circuit = Circuit::new(1);
    circuit.rz(0.25, QubitId(0)).unwrap();
    circuit.rz(0.5, QubitId(0)).unwrap();
    circuit.rz(1.0, QubitId(0)).unwrap();

    let (out, _) = run_pass(&MergeRotations::new(), &circuit);
    assert_eq!(out.len(), 1);
    let StandardGate::Rz(theta) = out[0].gate else {
        panic!("expected RZ, got {:?}", out[0].gate);
    };
    assert!((theta - 1.75).abs() < 1e-12);
}

#[test]
fn test_merge_drops_full_turns() {
    let mut circuit = Circuit::new(1);
    circuit.rx(PI, QubitId(0)).unwrap();
    circuit.rx(PI, QubitId(0)).unwrap();

    let (out, _) = run_pass(&MergeRotations::new(), &circuit);
    assert!(out.is_empty());
}

#[test]
fn test_merge_reduces_modulo_two_pi() {
    let mut circuit = Circuit::new(1);
    circuit.ry(-0.5, QubitId(0)).unwrap();

    let (out, _) = run_pass(&MergeRotations::new(), &circuit);
    let StandardGate::Ry(theta) = out[0].gate else {
        panic!("expected RY");
    };
    assert!((theta - (TAU - 0.5)).abs() < 1e-12);
}

#[test]
fn test_merge_respects_axis_and_qubit() {
    let mut circuit = Circuit::new(2);
    circuit.rx(0.1, QubitId(0)).unwrap();
    circuit.ry(0.1, QubitId(0)).unwrap();
    circuit.ry(0.1, QubitId(1)).unwrap();
    circuit.ry(0.1, QubitId(1)).unwrap();

    let (out, _) = run_pass(&MergeRotations::new(), &circuit);
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].gate, StandardGate::Ry(0.2));
}

#[test]
fn test_merge_leaves_phase_gates_alone() {
    let mut circuit = Circuit::new(1);
    circuit.p(0.3, QubitId(0)).unwrap();
    circuit.p(0.3, QubitId(0)).unwrap();

    let (out, _) = run_pass(&MergeRotations::new(), &circuit);
    assert_eq!(out.len(), 2);
}

// ---------------------------------------------------------------------------
// commute_gates
// ---------------------------------------------------------------------------

#[test]
fn test_commute_keeps_sequence_and_lowers_depths() {
    // H(0) CX(0,1) H(2): H(2) is disjoint from CX and can share its layer,
    // and ASAP already puts it at depth 1.
    let mut circuit = Circuit::new(3);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.x(QubitId(1)).unwrap();
    circuit.h(QubitId(2)).unwrap();

    let (out, props) = run_pass(&CommuteGates::new(), &circuit);
    assert_eq!(out, circuit.instructions());

    let depths = props.depths.unwrap();
    assert_eq!(depths.len(), 4);
    for (annotated, asap) in depths.iter().zip(gate_depths(circuit.instructions())) {
        assert!(*annotated <= asap);
    }
}

#[test]
fn test_commute_fixpoint_on_seeded_table() {
    let mut circuit = Circuit::new(4);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.h(QubitId(2)).unwrap();
    circuit.h(QubitId(3)).unwrap();

    let mut props = PropertySet::new();
    props.depths = Some(vec![1, 2, 3, 4]);
    CommuteGates::new()
        .run(circuit.instructions().to_vec(), &mut props)
        .unwrap();
    assert_eq!(props.depths, Some(vec![1, 1, 1, 1]));
}

#[test]
fn test_commute_ignores_stale_table() {
    let circuit = Circuit::bell().unwrap();
    let mut props = PropertySet::new();
    props.depths = Some(vec![7]);
    CommuteGates::new()
        .run(circuit.instructions().to_vec(), &mut props)
        .unwrap();
    assert_eq!(props.depths, Some(vec![1, 2]));
}

// ---------------------------------------------------------------------------
// pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_default_pipeline_empties_inverse_sequence() {
    let mut circuit = Circuit::new(1);
    for gate in [
        StandardGate::X,
        StandardGate::X,
        StandardGate::H,
        StandardGate::H,
        StandardGate::Y,
        StandardGate::Y,
    ] {
        circuit.apply(gate, [QubitId(0)]).unwrap();
    }

    let result = optimize(circuit.instructions(), &Rule::DEFAULT_PIPELINE).unwrap();
    assert!(result.instructions.is_empty());
    assert_eq!(result.depths, Some(vec![]));
}

#[test]
fn test_caller_order_is_honored() {
    // RX(0.2) RX(-0.2) X X: merging first leaves nothing but X X, which cancel.
    // Cancelling first also removes X X, merge then drops the zero rotation.
    // With only cancel_inverse the rotations survive.
    let mut circuit = Circuit::new(1);
    circuit.rx(0.2, QubitId(0)).unwrap();
    circuit.rx(-0.2, QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();

    let cancel_only = optimize(circuit.instructions(), &[Rule::CancelInverse]).unwrap();
    assert_eq!(cancel_only.instructions.len(), 2);
    assert_eq!(cancel_only.depths, None);

    let merge_then_cancel = optimize(
        circuit.instructions(),
        &[Rule::MergeRotations, Rule::CancelInverse],
    )
    .unwrap();
    assert!(merge_then_cancel.instructions.is_empty());
}

#[test]
fn test_transformation_invalidates_depths() {
    let mut circuit = Circuit::new(1);
    circuit.x(QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();

    let pm = PassManager::from_rules(&[Rule::CommuteGates, Rule::CancelInverse]);
    let mut props = PropertySet::new();
    let out = pm.run(circuit.instructions().to_vec(), &mut props).unwrap();
    assert!(out.is_empty());
    assert_eq!(props.depths, None);
}

#[test]
fn test_optimize_does_not_touch_input() {
    let circuit = Circuit::ghz(3).unwrap();
    let before = circuit.clone();
    let _ = optimize(circuit.instructions(), &Rule::DEFAULT_PIPELINE).unwrap();
    assert_eq!(circuit, before);
}
