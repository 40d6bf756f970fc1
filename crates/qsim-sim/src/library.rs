//! Gate library: the dense unitary of every [`StandardGate`].
//!
//! Multi-qubit matrices use big-endian leg order: the first target qubit is
//! the most significant bit of the local basis index, so CNOT's control is
//! its first target.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use ndarray::{Array2, array};
use num_complex::Complex64;
use qsim_ir::{Params, StandardGate};

use crate::error::SimResult;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

#[inline]
fn re(v: f64) -> Complex64 {
    Complex64::new(v, 0.0)
}

/// The 2ᵏ×2ᵏ unitary of a k-qubit gate.
///
/// Angles are used as given; no range checks are made.
pub fn gate_matrix(gate: &StandardGate) -> Array2<Complex64> {
    match gate {
        StandardGate::X => array![[ZERO, ONE], [ONE, ZERO]],
        StandardGate::Y => array![[ZERO, -I], [I, ZERO]],
        StandardGate::Z => array![[ONE, ZERO], [ZERO, -ONE]],
        StandardGate::H => {
            let h = re(FRAC_1_SQRT_2);
            array![[h, h], [h, -h]]
        }
        StandardGate::T => array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, FRAC_PI_4)]],
        StandardGate::S => array![[ONE, ZERO], [ZERO, I]],
        StandardGate::Rx(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            array![[re(c), -I * s], [-I * s, re(c)]]
        }
        StandardGate::Ry(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            array![[re(c), re(-s)], [re(s), re(c)]]
        }
        StandardGate::Rz(theta) => array![
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
        ],
        StandardGate::P(phi) => array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, *phi)]],
        StandardGate::CX => array![
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
            [ZERO, ZERO, ONE, ZERO]
        ],
        StandardGate::CZ => Array2::from_diag(&array![ONE, ONE, ONE, -ONE]),
        StandardGate::Swap => array![
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE]
        ],
        StandardGate::CCX => {
            let mut m = Array2::eye(8);
            m[[6, 6]] = ZERO;
            m[[7, 7]] = ZERO;
            m[[6, 7]] = ONE;
            m[[7, 6]] = ONE;
            m
        }
    }
}

/// Resolve a gate by name and return its matrix.
///
/// Fails with [`qsim_ir::IrError::UnknownGate`] for names outside the library.
pub fn lookup(name: &str, params: &Params) -> SimResult<Array2<Complex64>> {
    let gate = StandardGate::from_name(name, params)?;
    Ok(gate_matrix(&gate))
}

/// Whether `m` is unitary to within `tol` (max-entry norm of M†M - I).
pub fn is_unitary(m: &Array2<Complex64>, tol: f64) -> bool {
    let (rows, cols) = m.dim();
    if rows != cols {
        return false;
    }
    let product = m.t().mapv(|v| v.conj()).dot(m);
    product
        .indexed_iter()
        .all(|((i, j), v)| (v - if i == j { ONE } else { ZERO }).norm() <= tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use qsim_ir::IrError;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_matrix_sizes() {
        for name in StandardGate::NAMES {
            let gate = StandardGate::from_name(name, &Params::new()).unwrap();
            let dim = 1 << gate.num_qubits();
            assert_eq!(gate_matrix(&gate).dim(), (dim, dim), "{name}");
        }
    }

    #[test]
    fn test_all_gates_unitary() {
        for angle in [0.0, 0.3, PI / 2.0, PI, -2.5, 7.0] {
            let mut params = Params::new();
            params.insert("theta".into(), angle);
            params.insert("phi".into(), angle);
            for name in StandardGate::NAMES {
                let m = lookup(name, &params).unwrap();
                assert!(is_unitary(&m, 1e-10), "{name}({angle}) not unitary");
            }
        }
    }

    #[test]
    fn test_rotation_special_angles() {
        let rx = gate_matrix(&StandardGate::Rx(PI));
        assert!(approx_eq(rx[[0, 1]], -I));
        assert!(approx_eq(rx[[0, 0]], ZERO));

        let p = gate_matrix(&StandardGate::P(PI / 2.0));
        let s = gate_matrix(&StandardGate::S);
        assert!(p.iter().zip(s.iter()).all(|(a, b)| approx_eq(*a, *b)));
    }

    #[test]
    fn test_toffoli_flips_only_when_both_controls_set() {
        let m = gate_matrix(&StandardGate::CCX);
        for i in 0..6 {
            assert!(approx_eq(m[[i, i]], ONE));
        }
        assert!(approx_eq(m[[6, 7]], ONE));
        assert!(approx_eq(m[[7, 6]], ONE));
    }

    #[test]
    fn test_unknown_gate() {
        assert!(matches!(
            lookup("SQRT_SWAP", &Params::new()),
            Err(SimError::Ir(IrError::UnknownGate(_)))
        ));
    }

    #[test]
    fn test_is_unitary_rejects() {
        let m = array![[ONE, ONE], [ZERO, ONE]];
        assert!(!is_unitary(&m, 1e-10));
    }
}
