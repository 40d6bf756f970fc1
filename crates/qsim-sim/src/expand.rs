//! Operator expansion: lift a local gate to a full-register operator.
//!
//! For qubit positions 0..n in ascending order the expansion folds a
//! Kronecker product of the gate (at its lowest target) with 2×2 identities
//! everywhere else. Qubit 0 therefore ends up as the most significant bit of
//! the basis index. Two-qubit gates must act on neighbouring qubits; wider
//! gates have no expansion route and are left to the tensor backend.

use ndarray::linalg::kron;
use ndarray::{Array1, Array2};
use nalgebra_sparse::CsrMatrix;
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::sparse::{self, ZERO_THRESHOLD};

/// Where a gate lands in the Kronecker fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Single-qubit gate at this position.
    Single(usize),
    /// Two-qubit gate spanning `low` and `low + 1`. `reversed` marks a
    /// descending target pair such as CNOT(1, 0), whose legs must be swapped.
    Pair {
        /// Lower of the two targets.
        low: usize,
        /// Targets were given high-then-low.
        reversed: bool,
    },
}

impl Placement {
    /// First register position covered by the gate.
    #[inline]
    pub fn start(self) -> usize {
        match self {
            Placement::Single(q) => q,
            Placement::Pair { low, .. } => low,
        }
    }

    /// Number of register positions covered.
    #[inline]
    pub fn width(self) -> usize {
        match self {
            Placement::Single(_) => 1,
            Placement::Pair { .. } => 2,
        }
    }
}

/// Check that a gate can be expanded onto an `num_qubits` register.
pub fn placement(gate: &str, targets: &[usize], num_qubits: usize) -> SimResult<Placement> {
    for &q in targets {
        if q >= num_qubits {
            return Err(SimError::IndexOutOfRange {
                qubit: q,
                num_qubits,
            });
        }
    }

    match *targets {
        [q] => Ok(Placement::Single(q)),
        [a, b] if a.abs_diff(b) == 1 => Ok(Placement::Pair {
            low: a.min(b),
            reversed: a > b,
        }),
        [_, _] => Err(SimError::UnsupportedTopology {
            gate: gate.to_string(),
            qubits: targets.to_vec(),
        }),
        _ => Err(SimError::UnsupportedArity {
            gate: gate.to_string(),
            arity: targets.len(),
        }),
    }
}

/// Reorder the legs of a two-qubit matrix: returns SWAP·M·SWAP.
pub fn swap_legs(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    let flip = |i: usize| ((i & 1) << 1) | (i >> 1);
    Array2::from_shape_fn((4, 4), |(r, c)| matrix[[flip(r), flip(c)]])
}

fn local_matrix(
    gate: &str,
    matrix: &Array2<Complex64>,
    placement: Placement,
) -> SimResult<Array2<Complex64>> {
    let expected = 1 << placement.width();
    if matrix.dim() != (expected, expected) {
        return Err(SimError::DimensionMismatch {
            expected,
            got: matrix.nrows(),
        });
    }
    tracing::trace!(gate, ?placement, "placing gate");
    Ok(match placement {
        Placement::Pair { reversed: true, .. } => swap_legs(matrix),
        _ => matrix.clone(),
    })
}

/// Dense 2ⁿ×2ⁿ operator for `matrix` acting on `targets`.
pub fn expand_dense(
    gate: &str,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    num_qubits: usize,
) -> SimResult<Array2<Complex64>> {
    let placement = placement(gate, targets, num_qubits)?;
    let local = local_matrix(gate, matrix, placement)?;
    let identity = Array2::<Complex64>::eye(2);

    let mut operator = Array2::<Complex64>::eye(1);
    let mut position = 0;
    while position < num_qubits {
        if position == placement.start() {
            operator = kron(&operator, &local);
            position += placement.width();
        } else {
            operator = kron(&operator, &identity);
            position += 1;
        }
    }
    Ok(operator)
}

/// Sparse 2ⁿ×2ⁿ operator for `matrix` acting on `targets`.
///
/// Numerically identical to [`expand_dense`].
pub fn expand_sparse(
    gate: &str,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    num_qubits: usize,
) -> SimResult<CsrMatrix<Complex64>> {
    let placement = placement(gate, targets, num_qubits)?;
    let local = sparse::from_dense(&local_matrix(gate, matrix, placement)?, ZERO_THRESHOLD);
    let identity = CsrMatrix::identity(2);

    let mut operator = CsrMatrix::identity(1);
    let mut position = 0;
    while position < num_qubits {
        if position == placement.start() {
            operator = sparse::kron(&operator, &local);
            position += placement.width();
        } else {
            operator = sparse::kron(&operator, &identity);
            position += 1;
        }
    }
    Ok(operator)
}

/// A full-register operator in either storage form.
#[derive(Debug, Clone)]
pub enum Operator {
    /// Dense array.
    Dense(Array2<Complex64>),
    /// Compressed rows.
    Sparse(CsrMatrix<Complex64>),
}

impl Operator {
    /// Matrix-vector product with an amplitude vector.
    pub fn apply(&self, state: &Array1<Complex64>) -> SimResult<Array1<Complex64>> {
        match self {
            Operator::Dense(m) => {
                if m.ncols() != state.len() {
                    return Err(SimError::DimensionMismatch {
                        expected: m.ncols(),
                        got: state.len(),
                    });
                }
                Ok(m.dot(state))
            }
            Operator::Sparse(m) => sparse::mul_vec(m, state),
        }
    }

    /// Dense copy of the operator.
    pub fn to_dense(&self) -> Array2<Complex64> {
        match self {
            Operator::Dense(m) => m.clone(),
            Operator::Sparse(m) => sparse::to_dense(m),
        }
    }
}
