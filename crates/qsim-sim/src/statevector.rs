//! Amplitude vectors.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{SimError, SimResult};

/// Bit value of `qubit` in basis index `index` of an `num_qubits` register.
///
/// Qubit 0 is the most significant bit.
#[inline]
pub fn qubit_bit(index: usize, qubit: usize, num_qubits: usize) -> usize {
    (index >> (num_qubits - 1 - qubit)) & 1
}

/// Fixed-width binary label of a basis index, qubit 0 first.
pub fn outcome_to_bitstring(outcome: usize, num_qubits: usize) -> String {
    format!("{outcome:0num_qubits$b}")
}

/// Largest register a state vector will allocate.
pub const MAX_QUBITS: u32 = 30;

/// Refuse registers whose 2ⁿ amplitudes cannot be allocated.
pub fn check_register(num_qubits: usize) -> SimResult<()> {
    if num_qubits > MAX_QUBITS as usize {
        return Err(SimError::InvalidConfig(format!(
            "{num_qubits} qubits exceeds the supported maximum of {MAX_QUBITS}"
        )));
    }
    Ok(())
}

/// A pure state of an n-qubit register: 2ⁿ complex amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes, indexed by basis index.
    amplitudes: Array1<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// The computational basis state with amplitude 1 at `index`.
    pub fn basis_state(num_qubits: usize, index: usize) -> SimResult<Self> {
        check_register(num_qubits)?;
        let dim = 1 << num_qubits;
        if index >= dim {
            return Err(SimError::InvalidOutcome {
                outcome: index,
                dim,
            });
        }
        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// The basis state labelled by a bitstring such as `"101"` (qubit 0 first).
    pub fn from_bitstring(bits: &str) -> SimResult<Self> {
        if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(SimError::InvalidBitstring(bits.to_string()));
        }
        check_register(bits.len())?;
        let index = usize::from_str_radix(bits, 2)
            .map_err(|_| SimError::InvalidBitstring(bits.to_string()))?;
        Self::basis_state(bits.len(), index)
    }

    /// Wrap raw amplitudes. The length must be a power of two.
    ///
    /// The vector is taken as given; it is not renormalized.
    pub fn from_amplitudes(amplitudes: impl Into<Array1<Complex64>>) -> SimResult<Self> {
        let amplitudes = amplitudes.into();
        let dim = amplitudes.len();
        if !dim.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: dim.next_power_of_two(),
                got: dim,
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits: dim.trailing_zeros() as usize,
        })
    }

    pub(crate) fn from_parts(amplitudes: Array1<Complex64>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1 << num_qubits);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Length of the amplitude vector (2ⁿ).
    #[inline]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes in basis-index order.
    #[inline]
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Overwrite the amplitudes with |0...0⟩ in place.
    pub(crate) fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Consume the state, returning its amplitudes.
    pub fn into_amplitudes(self) -> Array1<Complex64> {
        self.amplitudes
    }

    /// Squared magnitude of every amplitude.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Σ|aᵢ|², which is 1 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// ⟨self|other⟩.
    pub fn inner(&self, other: &Statevector) -> SimResult<Complex64> {
        if self.dim() != other.dim() {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                got: other.dim(),
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// |⟨self|other⟩|², insensitive to global phase.
    pub fn fidelity(&self, other: &Statevector) -> SimResult<f64> {
        Ok(self.inner(other)?.norm_sqr())
    }

    /// Largest elementwise distance to `other`; infinite on size mismatch.
    pub fn max_abs_diff(&self, other: &Statevector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }
        self.amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Fixed-width label of a basis index in this register.
    pub fn bitstring(&self, outcome: usize) -> String {
        outcome_to_bitstring(outcome, self.num_qubits)
    }
}

impl std::ops::Index<usize> for Statevector {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.amplitudes[index]
    }
}
