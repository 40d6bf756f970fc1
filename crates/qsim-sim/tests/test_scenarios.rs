//! End-to-end scenarios through the public session API.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use qsim_ir::{Circuit, IrError, Params, StandardGate};
use qsim_sim::{Representation, SimError, Simulator, SimulatorConfig, Statevector};

const POLICIES: [Representation; 3] = [
    Representation::Dense,
    Representation::Sparse,
    Representation::TensorNetwork,
];

fn session(n: u32, representation: Representation) -> Simulator {
    Simulator::with_config(
        n,
        SimulatorConfig::new()
            .with_representation(representation)
            .with_seed(2024),
    )
    .unwrap()
}

fn assert_state(actual: &Statevector, expected: &[(f64, f64)]) {
    assert_eq!(actual.dim(), expected.len());
    for (i, &(re, im)) in expected.iter().enumerate() {
        let diff = (actual[i] - Complex64::new(re, im)).norm();
        assert!(diff < 1e-12, "amplitude {i}: {} != {re}+{im}i", actual[i]);
    }
}

// ---------------------------------------------------------------------------
// Basic evolution
// ---------------------------------------------------------------------------

#[test]
fn hadamard_makes_equal_superposition() {
    for policy in POLICIES {
        let mut sim = session(1, policy);
        sim.append(StandardGate::H, &[0]).unwrap();
        let state = sim.run(false).unwrap().clone();
        assert_state(&state, &[(FRAC_1_SQRT_2, 0.0), (FRAC_1_SQRT_2, 0.0)]);
        let probs = sim.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }
}

#[test]
fn pauli_x_flips() {
    for policy in POLICIES {
        let mut sim = session(1, policy);
        sim.append(StandardGate::X, &[0]).unwrap();
        assert_state(sim.run(false).unwrap(), &[(0.0, 0.0), (1.0, 0.0)]);
    }
}

#[test]
fn bell_state() {
    for policy in POLICIES {
        let mut sim = session(2, policy);
        sim.append(StandardGate::H, &[0])
            .unwrap()
            .append(StandardGate::CX, &[0, 1])
            .unwrap();
        let h = FRAC_1_SQRT_2;
        assert_state(
            sim.run(true).unwrap(),
            &[(h, 0.0), (0.0, 0.0), (0.0, 0.0), (h, 0.0)],
        );
    }
}

#[test]
fn ghz_state() {
    for policy in POLICIES {
        let circuit = Circuit::ghz(3).unwrap();
        let mut sim = Simulator::from_circuit(
            circuit,
            SimulatorConfig::new().with_representation(policy),
        )
        .unwrap();
        let probs = sim.run(false).unwrap().probabilities();
        for (i, p) in probs.iter().enumerate() {
            let expected = if i == 0 || i == 7 { 0.5 } else { 0.0 };
            assert!((p - expected).abs() < 1e-12, "index {i}: {p}");
        }
    }
}

#[test]
fn interference_returns_to_one() {
    for policy in POLICIES {
        let mut sim = session(1, policy);
        for gate in [StandardGate::H, StandardGate::Z, StandardGate::H] {
            sim.append(gate, &[0]).unwrap();
        }
        assert_state(sim.run(true).unwrap(), &[(0.0, 0.0), (1.0, 0.0)]);
    }
}

#[test]
fn reversed_cnot_uses_second_qubit_as_control() {
    for policy in [Representation::Dense, Representation::Sparse] {
        let mut sim = session(2, policy);
        sim.append(StandardGate::X, &[1])
            .unwrap()
            .append(StandardGate::CX, &[1, 0])
            .unwrap();
        let probs = sim.run(false).unwrap().probabilities();
        assert_eq!(probs, vec![0.0, 0.0, 0.0, 1.0]);
    }
}

#[test]
fn named_gates_with_params() {
    let mut sim = session(1, Representation::Dense);
    let params = Params::from([("theta".to_string(), PI)]);
    sim.append_named("RY", &[0], &params).unwrap();
    let probs = sim.run(false).unwrap().probabilities();
    assert!(probs[0].abs() < 1e-12);
    assert!((probs[1] - 1.0).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

#[test]
fn self_inverse_pairs_vanish() {
    let mut sim = session(1, Representation::Dense);
    for gate in [
        StandardGate::X,
        StandardGate::X,
        StandardGate::H,
        StandardGate::H,
        StandardGate::Y,
        StandardGate::Y,
    ] {
        sim.append(gate, &[0]).unwrap();
    }

    let report = sim.optimization_report().unwrap();
    assert_eq!(report.original_gate_count, 6);
    assert_eq!(report.optimized_gate_count, 0);
    assert_eq!(report.optimized_depth, 0);

    assert_state(sim.run(true).unwrap(), &[(1.0, 0.0), (0.0, 0.0)]);
}

#[test]
fn optimized_and_raw_runs_agree() {
    let mut sim = session(3, Representation::Dense);
    sim.append(StandardGate::H, &[0])
        .unwrap()
        .append(StandardGate::Rz(0.3), &[0])
        .unwrap()
        .append(StandardGate::Rz(0.9), &[0])
        .unwrap()
        .append(StandardGate::CX, &[0, 1])
        .unwrap()
        .append(StandardGate::CX, &[0, 1])
        .unwrap()
        .append(StandardGate::CX, &[1, 2])
        .unwrap()
        .append(StandardGate::Rx(0.4), &[2])
        .unwrap();
    let raw = sim.run(false).unwrap().clone();
    let optimized = sim.run(true).unwrap().clone();
    assert!(raw.max_abs_diff(&optimized) < 1e-9);
}

#[test]
fn rotation_merge_past_two_pi_keeps_state_up_to_phase() {
    // RX(1.5π)·RX(1.5π) = RX(3π) = −RX(π); the merged gate is RX(π).
    let mut sim = session(1, Representation::Dense);
    sim.append(StandardGate::Rx(1.5 * PI), &[0])
        .unwrap()
        .append(StandardGate::Rx(1.5 * PI), &[0])
        .unwrap();
    let raw = sim.run(false).unwrap().clone();
    let optimized = sim.run(true).unwrap().clone();

    assert_state(&raw, &[(0.0, 0.0), (0.0, 1.0)]);
    assert_state(&optimized, &[(0.0, 0.0), (0.0, -1.0)]);
    assert!((raw.fidelity(&optimized).unwrap() - 1.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

#[test]
fn sampled_frequencies_match_probabilities() {
    let mut sim = session(1, Representation::Dense);
    sim.append(StandardGate::H, &[0]).unwrap();
    sim.run(false).unwrap();
    let counts = sim.measure(10_000).unwrap();
    assert_eq!(counts.total(), 10_000);
    assert!((counts.frequency("0") - 0.5).abs() < 0.05);
    assert!((counts.frequency("1") - 0.5).abs() < 0.05);
}

#[test]
fn seeded_sessions_reproduce_counts() {
    let run = || {
        let mut sim = session(2, Representation::Dense);
        sim.append(StandardGate::H, &[0])
            .unwrap()
            .append(StandardGate::H, &[1])
            .unwrap();
        sim.run(false).unwrap();
        sim.measure(256).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn counts_use_fixed_width_bitstrings() {
    let mut sim = session(3, Representation::Dense);
    sim.append(StandardGate::X, &[2]).unwrap();
    sim.run(false).unwrap();
    let counts = sim.measure(10).unwrap();
    assert_eq!(counts.get("001"), 10);
}

#[test]
fn expectation_of_z_on_plus_is_zero() {
    let mut sim = session(1, Representation::Dense);
    sim.append(StandardGate::H, &[0]).unwrap();
    sim.run(false).unwrap();
    let z = qsim_sim::gate_matrix(&StandardGate::Z);
    assert!(sim.expectation_value(&z).unwrap().abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_gate_is_rejected() {
    let mut sim = session(1, Representation::Dense);
    let err = sim.append_named("FREDKIN", &[0], &Params::new()).unwrap_err();
    assert!(matches!(err, SimError::Ir(IrError::UnknownGate(name)) if name == "FREDKIN"));
}

#[test]
fn out_of_range_qubit_is_rejected() {
    let mut sim = session(2, Representation::Dense);
    assert!(matches!(
        sim.append(StandardGate::H, &[2]),
        Err(SimError::Ir(IrError::IndexOutOfRange { .. }))
    ));
}

#[test]
fn non_adjacent_pair_fails_without_touching_state() {
    for policy in [Representation::Dense, Representation::Sparse] {
        let mut sim = session(3, policy);
        sim.append(StandardGate::H, &[0])
            .unwrap()
            .append(StandardGate::CZ, &[0, 2])
            .unwrap();
        assert!(matches!(
            sim.run(false),
            Err(SimError::UnsupportedTopology { .. })
        ));
        assert_eq!(sim.statevector(), &Statevector::new(3).unwrap());
    }
}

#[test]
fn non_adjacent_pair_runs_on_tensor_network() {
    let mut sim = session(3, Representation::TensorNetwork);
    sim.append(StandardGate::X, &[0])
        .unwrap()
        .append(StandardGate::CX, &[0, 2])
        .unwrap();
    let probs = sim.run(false).unwrap().probabilities();
    assert_eq!(probs[0b101], 1.0);
}

#[test]
fn bloch_vector_of_single_qubit_run() {
    let mut sim = session(1, Representation::Dense);
    sim.append(StandardGate::H, &[0])
        .unwrap()
        .append(StandardGate::S, &[0])
        .unwrap();
    let v = sim.run(false).unwrap().bloch_vector().unwrap();
    assert!(v.x.abs() < 1e-12);
    assert!((v.y - 1.0).abs() < 1e-12);
    assert!(v.z.abs() < 1e-12);
}
