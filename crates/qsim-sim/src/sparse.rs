//! Sparse full-register operators.
//!
//! Full-register operators built from local gates are extremely sparse: a
//! Kronecker product of a k-qubit gate with identities has at most 2ᵏ
//! non-zeros per row. Operators are held as `nalgebra_sparse` CSR matrices
//! so expansion and application stay linear in that count instead of
//! quadratic in 2ⁿ.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};

/// Magnitude below which an entry is treated as zero.
pub const ZERO_THRESHOLD: f64 = 1e-10;

/// Register size above which sparse expansion is chosen automatically.
pub const SPARSE_QUBIT_THRESHOLD: u32 = 10;

/// Declared gate sparsity above which sparse expansion is chosen automatically.
pub const SPARSITY_THRESHOLD: f64 = 0.7;

/// Convert a dense matrix, dropping entries with magnitude below `threshold`.
pub fn from_dense(matrix: &Array2<Complex64>, threshold: f64) -> CsrMatrix<Complex64> {
    let (nrows, ncols) = matrix.dim();
    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), &value) in matrix.indexed_iter() {
        if value.norm() >= threshold {
            coo.push(row, col, value);
        }
    }
    CsrMatrix::from(&coo)
}

/// Expand back into a dense matrix.
pub fn to_dense(matrix: &CsrMatrix<Complex64>) -> Array2<Complex64> {
    let mut dense = Array2::zeros((matrix.nrows(), matrix.ncols()));
    for (row, col, &value) in matrix.triplet_iter() {
        dense[[row, col]] = value;
    }
    dense
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &CsrMatrix<Complex64>, b: &CsrMatrix<Complex64>) -> CsrMatrix<Complex64> {
    let mut result = CooMatrix::new(a.nrows() * b.nrows(), a.ncols() * b.ncols());
    for (ra, ca, va) in a.triplet_iter() {
        for (rb, cb, vb) in b.triplet_iter() {
            result.push(ra * b.nrows() + rb, ca * b.ncols() + cb, va * vb);
        }
    }
    CsrMatrix::from(&result)
}

/// Matrix-vector product with an amplitude vector.
pub fn mul_vec(
    matrix: &CsrMatrix<Complex64>,
    x: &Array1<Complex64>,
) -> SimResult<Array1<Complex64>> {
    if x.len() != matrix.ncols() {
        return Err(SimError::DimensionMismatch {
            expected: matrix.ncols(),
            got: x.len(),
        });
    }
    let x = DVector::from_iterator(x.len(), x.iter().copied());
    let y = matrix * &x;
    Ok(Array1::from_iter(y.iter().copied()))
}

/// Fraction of entries that are not stored (0 = dense, 1 = empty).
pub fn sparsity(matrix: &CsrMatrix<Complex64>) -> f64 {
    let total = matrix.nrows() * matrix.ncols();
    if total == 0 {
        return 1.0;
    }
    1.0 - matrix.nnz() as f64 / total as f64
}

/// Fraction of entries of a dense matrix with magnitude below `threshold`.
pub fn estimate_sparsity(matrix: &Array2<Complex64>, threshold: f64) -> f64 {
    if matrix.is_empty() {
        return 1.0;
    }
    let zeros = matrix.iter().filter(|v| v.norm() < threshold).count();
    zeros as f64 / matrix.len() as f64
}

/// Default policy: sparse for more than ten qubits or highly sparse gates.
pub fn should_use_sparse(num_qubits: u32, gate_sparsity: f64) -> bool {
    num_qubits > SPARSE_QUBIT_THRESHOLD || gate_sparsity > SPARSITY_THRESHOLD
}
