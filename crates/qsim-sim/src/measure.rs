//! Measurement sampling, state collapse and expectation values.

use ndarray::Array2;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::statevector::{Statevector, qubit_bit};

/// Retained probability below which a projection is considered empty.
pub const DEGENERATE_MASS: f64 = 1e-12;

/// Tolerance on the imaginary part of an expectation value.
const HERMITIAN_TOLERANCE: f64 = 1e-9;

/// Result of measuring a subset of qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialMeasurement {
    /// Measured qubits in ascending order.
    pub qubits: Vec<usize>,
    /// Observed bits: the bit of `qubits[i]` sits at bit position `i`.
    pub outcome: usize,
    /// Normalized post-measurement state.
    pub state: Statevector,
}

impl PartialMeasurement {
    /// The outcome as a bitstring, one character per measured qubit in
    /// ascending qubit order.
    pub fn bitstring(&self) -> String {
        (0..self.qubits.len())
            .map(|i| if (self.outcome >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Draws measurement samples with its own seedable generator.
///
/// Each simulation session owns one sampler, so concurrent sessions never
/// share random state and a fixed seed reproduces every draw.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// A sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic sampler.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `shots` basis indices with replacement, weighted by |aᵢ|².
    pub fn sample(&mut self, state: &Statevector, shots: usize) -> SimResult<Vec<usize>> {
        let dist = WeightedIndex::new(state.probabilities())
            .map_err(|e| SimError::Sampling(e.to_string()))?;
        Ok((0..shots).map(|_| dist.sample(&mut self.rng)).collect())
    }

    /// Draw `shots` samples and tally them by bitstring.
    pub fn measure_counts(&mut self, state: &Statevector, shots: usize) -> SimResult<Counts> {
        let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
        for outcome in self.sample(state, shots)? {
            *tally.entry(outcome).or_insert(0) += 1;
        }
        debug!("{} shots produced {} distinct outcomes", shots, tally.len());

        let mut counts = Counts::new();
        for (outcome, n) in tally {
            counts.insert(state.bitstring(outcome), n);
        }
        Ok(counts)
    }

    /// Measure `qubits`, returning the observed bits and the collapsed state.
    ///
    /// One full outcome is drawn from the joint distribution and its bits at
    /// the requested positions are kept; the state is then projected onto
    /// that pattern and renormalized.
    pub fn partial_measure(
        &mut self,
        state: &Statevector,
        qubits: &[usize],
    ) -> SimResult<PartialMeasurement> {
        let qubits = normalize_qubits(qubits, state.num_qubits())?;
        let full = self
            .sample(state, 1)?
            .first()
            .copied()
            .ok_or_else(|| SimError::Sampling("no sample drawn".into()))?;

        let outcome = qubits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &q)| acc | (qubit_bit(full, q, state.num_qubits()) << i));
        let collapsed = project(state, &qubits, outcome)?;
        Ok(PartialMeasurement {
            qubits,
            outcome,
            state: collapsed,
        })
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_qubits(qubits: &[usize], num_qubits: usize) -> SimResult<Vec<usize>> {
    let mut sorted = qubits.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(SimError::DuplicateQubit { qubit: pair[0] });
        }
    }
    if let Some(&q) = sorted.last().filter(|&&q| q >= num_qubits) {
        return Err(SimError::IndexOutOfRange {
            qubit: q,
            num_qubits,
        });
    }
    Ok(sorted)
}

/// Project onto basis states whose bits at `qubits` (ascending, `qubits[i]`
/// read from bit `i` of `value`) equal `value`, then renormalize.
///
/// Fails with [`SimError::DegenerateProjection`] when the retained
/// probability is below [`DEGENERATE_MASS`].
pub fn project(state: &Statevector, qubits: &[usize], value: usize) -> SimResult<Statevector> {
    let qubits = normalize_qubits(qubits, state.num_qubits())?;
    let n = state.num_qubits();
    let matches = |index: usize| {
        qubits
            .iter()
            .enumerate()
            .all(|(i, &q)| qubit_bit(index, q, n) == (value >> i) & 1)
    };

    let mut projected = state.amplitudes().clone();
    let mut mass = 0.0;
    for (index, amp) in projected.iter_mut().enumerate() {
        if matches(index) {
            mass += amp.norm_sqr();
        } else {
            *amp = Complex64::new(0.0, 0.0);
        }
    }

    if mass < DEGENERATE_MASS {
        return Err(SimError::DegenerateProjection {
            qubits,
            value,
            mass,
        });
    }
    projected.mapv_inplace(|a| a / mass.sqrt());
    Statevector::from_amplitudes(projected)
}

/// The post-measurement state for a full-register outcome: |outcome⟩.
pub fn collapse_state(num_qubits: usize, outcome: usize) -> SimResult<Statevector> {
    Statevector::basis_state(num_qubits, outcome)
}

/// ⟨ψ|O|ψ⟩ for a Hermitian observable `O`.
///
/// Fails with [`SimError::NonHermitian`] if the result has a noticeable
/// imaginary part.
pub fn expectation_value(state: &Statevector, observable: &Array2<Complex64>) -> SimResult<f64> {
    let dim = state.dim();
    if observable.dim() != (dim, dim) {
        return Err(SimError::DimensionMismatch {
            expected: dim,
            got: observable.nrows(),
        });
    }

    let psi = state.amplitudes();
    let applied = observable.dot(psi);
    let value: Complex64 = psi
        .iter()
        .zip(applied.iter())
        .map(|(a, b)| a.conj() * b)
        .sum();

    if value.im.abs() > HERMITIAN_TOLERANCE * value.re.abs().max(1.0) {
        return Err(SimError::NonHermitian {
            imaginary: value.im,
        });
    }
    Ok(value.re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::gate_matrix;
    use qsim_ir::StandardGate;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn bell() -> Statevector {
        let h = FRAC_1_SQRT_2;
        Statevector::from_amplitudes(vec![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(h, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let state = bell();
        let a = Sampler::seeded(7).sample(&state, 50).unwrap();
        let b = Sampler::seeded(7).sample(&state, 50).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&i| i == 0 || i == 3));
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let counts = Sampler::seeded(1).measure_counts(&bell(), 500).unwrap();
        assert_eq!(counts.total(), 500);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[test]
    fn test_zero_shots() {
        let counts = Sampler::seeded(1).measure_counts(&bell(), 0).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_zero_vector_cannot_be_sampled() {
        let zero = Statevector::from_amplitudes(vec![Complex64::new(0.0, 0.0); 2]).unwrap();
        assert!(matches!(
            Sampler::seeded(0).sample(&zero, 1),
            Err(SimError::Sampling(_))
        ));
    }

    #[test]
    fn test_collapse_state() {
        let s = collapse_state(2, 3).unwrap();
        assert_eq!(s.probabilities(), vec![0.0, 0.0, 0.0, 1.0]);
        assert!(matches!(
            collapse_state(2, 4),
            Err(SimError::InvalidOutcome { .. })
        ));
    }

    #[test]
    fn test_partial_measure_bell_correlates() {
        let mut sampler = Sampler::seeded(3);
        for _ in 0..20 {
            let m = sampler.partial_measure(&bell(), &[0]).unwrap();
            let expected = if m.outcome == 0 { 0 } else { 3 };
            assert!((m.state.probabilities()[expected] - 1.0).abs() < 1e-12);
            assert_eq!(m.bitstring().len(), 1);
        }
    }

    #[test]
    fn test_partial_measure_packs_bits_in_qubit_order() {
        // |110⟩ measured on qubits [2, 0] (sorted to [0, 2]): q0 = 1 at bit 0, q2 = 0 at bit 1.
        let state = Statevector::from_bitstring("110").unwrap();
        let m = Sampler::seeded(0).partial_measure(&state, &[2, 0]).unwrap();
        assert_eq!(m.qubits, vec![0, 2]);
        assert_eq!(m.outcome, 0b01);
        assert_eq!(m.bitstring(), "10");
        assert_eq!(m.state, state);

        // |01⟩ on [0, 1]: q1 = 1 lands at bit 1.
        let state = Statevector::from_bitstring("01").unwrap();
        let m = Sampler::seeded(0).partial_measure(&state, &[0, 1]).unwrap();
        assert_eq!(m.outcome, 2);
        assert_eq!(m.bitstring(), "01");
    }

    #[test]
    fn test_project_reads_value_bits_by_position() {
        let state = Statevector::from_bitstring("01").unwrap();
        let kept = project(&state, &[0, 1], 2).unwrap();
        assert_eq!(kept, state);
        assert!(matches!(
            project(&state, &[0, 1], 1),
            Err(SimError::DegenerateProjection { .. })
        ));
    }

    #[test]
    fn test_partial_measure_rejects_bad_qubits() {
        let mut sampler = Sampler::seeded(0);
        assert!(matches!(
            sampler.partial_measure(&bell(), &[2]),
            Err(SimError::IndexOutOfRange { qubit: 2, .. })
        ));
        assert!(matches!(
            sampler.partial_measure(&bell(), &[1, 1]),
            Err(SimError::DuplicateQubit { qubit: 1 })
        ));
    }

    #[test]
    fn test_degenerate_projection() {
        // Bell state has no weight on qubit 0 = 0, qubit 1 = 1.
        assert!(matches!(
            project(&bell(), &[0, 1], 0b01),
            Err(SimError::DegenerateProjection { value: 1, .. })
        ));
        let kept = project(&bell(), &[0, 1], 0b11).unwrap();
        assert!((kept.probabilities()[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expectation_values() {
        let z = gate_matrix(&StandardGate::Z);
        let zero = Statevector::new(1).unwrap();
        let one = Statevector::from_bitstring("1").unwrap();
        assert!((expectation_value(&zero, &z).unwrap() - 1.0).abs() < 1e-12);
        assert!((expectation_value(&one, &z).unwrap() + 1.0).abs() < 1e-12);

        let plus = Statevector::from_amplitudes(vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(FRAC_1_SQRT_2, 0.0),
        ])
        .unwrap();
        let x = gate_matrix(&StandardGate::X);
        assert!((expectation_value(&plus, &x).unwrap() - 1.0).abs() < 1e-12);
        assert!(expectation_value(&plus, &z).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_expectation_rejects_non_hermitian() {
        // S is unitary but not Hermitian; on |+⟩ it gives (1 + i)/2.
        let s = gate_matrix(&StandardGate::S);
        let plus = Statevector::from_amplitudes(vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(FRAC_1_SQRT_2, 0.0),
        ])
        .unwrap();
        assert!(matches!(
            expectation_value(&plus, &s),
            Err(SimError::NonHermitian { .. })
        ));
        assert!(matches!(
            expectation_value(&plus, &gate_matrix(&StandardGate::CZ)),
            Err(SimError::DimensionMismatch { .. })
        ));
    }
}
