//! Single-qubit states and Bloch-sphere coordinates.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Point on (or inside) the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlochVector {
    /// 2·Re(ᾱβ).
    pub x: f64,
    /// 2·Im(ᾱβ).
    pub y: f64,
    /// |α|² - |β|².
    pub z: f64,
}

impl BlochVector {
    fn from_amplitudes(alpha: Complex64, beta: Complex64) -> Self {
        let overlap = alpha.conj() * beta;
        Self {
            x: 2.0 * overlap.re,
            y: 2.0 * overlap.im,
            z: alpha.norm_sqr() - beta.norm_sqr(),
        }
    }

    /// Euclidean length; 1 for a pure normalized state.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// A normalized single-qubit state α|0⟩ + β|1⟩.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitState {
    alpha: Complex64,
    beta: Complex64,
}

impl QubitState {
    /// Normalize and wrap the given amplitudes.
    pub fn new(alpha: Complex64, beta: Complex64) -> SimResult<Self> {
        let norm = (alpha.norm_sqr() + beta.norm_sqr()).sqrt();
        if norm == 0.0 {
            return Err(SimError::ZeroNorm);
        }
        Ok(Self {
            alpha: alpha / norm,
            beta: beta / norm,
        })
    }

    /// |0⟩.
    pub fn zero() -> Self {
        Self::real(1.0, 0.0)
    }

    /// |1⟩.
    pub fn one() -> Self {
        Self::real(0.0, 1.0)
    }

    /// (|0⟩ + |1⟩)/√2.
    pub fn plus() -> Self {
        Self::real(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
    }

    /// (|0⟩ - |1⟩)/√2.
    pub fn minus() -> Self {
        Self::real(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)
    }

    fn real(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: Complex64::new(alpha, 0.0),
            beta: Complex64::new(beta, 0.0),
        }
    }

    /// Amplitude of |0⟩.
    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    /// Amplitude of |1⟩.
    pub fn beta(&self) -> Complex64 {
        self.beta
    }

    /// Bloch-sphere coordinates.
    pub fn bloch_vector(&self) -> BlochVector {
        BlochVector::from_amplitudes(self.alpha, self.beta)
    }

    /// `(P(0), P(1))`.
    pub fn probabilities(&self) -> (f64, f64) {
        (self.alpha.norm_sqr(), self.beta.norm_sqr())
    }
}

impl From<QubitState> for Statevector {
    fn from(q: QubitState) -> Self {
        Statevector::from_parts(Array1::from(vec![q.alpha, q.beta]), 1)
    }
}

impl TryFrom<&Statevector> for QubitState {
    type Error = SimError;

    fn try_from(state: &Statevector) -> Result<Self, Self::Error> {
        if state.num_qubits() != 1 {
            return Err(SimError::DimensionMismatch {
                expected: 2,
                got: state.dim(),
            });
        }
        QubitState::new(state[0], state[1])
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4})|0⟩ + ({:.4})|1⟩",
            self.alpha, self.beta
        )
    }
}

impl Statevector {
    /// Bloch vector of a one-qubit register.
    pub fn bloch_vector(&self) -> SimResult<BlochVector> {
        Ok(QubitState::try_from(self)?.bloch_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bloch(v: BlochVector, x: f64, y: f64, z: f64) {
        assert!(
            (v.x - x).abs() < 1e-12 && (v.y - y).abs() < 1e-12 && (v.z - z).abs() < 1e-12,
            "got {v}, expected ({x}, {y}, {z})"
        );
    }

    #[test]
    fn test_named_states() {
        assert_bloch(QubitState::zero().bloch_vector(), 0.0, 0.0, 1.0);
        assert_bloch(QubitState::one().bloch_vector(), 0.0, 0.0, -1.0);
        assert_bloch(QubitState::plus().bloch_vector(), 1.0, 0.0, 0.0);
        assert_bloch(QubitState::minus().bloch_vector(), -1.0, 0.0, 0.0);
    }

    #[test]
    fn test_new_normalizes() {
        let q = QubitState::new(Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)).unwrap();
        let (p0, p1) = q.probabilities();
        assert!((p0 - 0.36).abs() < 1e-12);
        assert!((p1 - 0.64).abs() < 1e-12);
        assert!((q.bloch_vector().length() - 1.0).abs() < 1e-12);
        assert!(q.bloch_vector().y > 0.0);

        assert!(matches!(
            QubitState::new(Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)),
            Err(SimError::ZeroNorm)
        ));
    }

    #[test]
    fn test_statevector_bloch() {
        let plus: Statevector = QubitState::plus().into();
        assert_bloch(plus.bloch_vector().unwrap(), 1.0, 0.0, 0.0);
        assert!(matches!(
            Statevector::new(2).unwrap().bloch_vector(),
            Err(SimError::DimensionMismatch { .. })
        ));
    }
}
