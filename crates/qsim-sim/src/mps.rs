//! Matrix-product-state construction and reconstruction.
//!
//! A state of n qubits is split left to right by repeated singular value
//! decompositions into a chain of rank-3 tensors `(left bond, physical,
//! right bond)`, keeping at most `max_bond_dim` singular values per bond.
//! Contracting the chain in order gives the amplitude vector back, exactly
//! when no bond was truncated.
//!
//! Only construction and reconstruction live here. Gates are not applied to
//! the chain; the engine contracts the full state tensor instead, and
//! bond-local two-site updates with re-truncation are future work.

use nalgebra::DMatrix;
use ndarray::{Array2, Array3};
use num_complex::Complex64;
use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Bond dimension used when none is configured.
pub const DEFAULT_MAX_BOND_DIM: usize = 100;

/// Singular values at or below this are treated as zero and never kept.
const SINGULAR_CUTOFF: f64 = 1e-14;

/// A chain of site tensors with shape `(left, 2, right)`.
#[derive(Debug, Clone)]
pub struct Mps {
    tensors: Vec<Array3<Complex64>>,
    max_bond_dim: usize,
    discarded_weight: f64,
}

/// Shape summary of an MPS, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MpsSummary {
    /// Number of sites.
    pub num_qubits: usize,
    /// Dimension of each internal bond.
    pub bond_dims: Vec<usize>,
    /// Configured bond ceiling.
    pub max_bond_dim: usize,
    /// Sum of squared singular values dropped by truncation.
    pub discarded_weight: f64,
}

impl Mps {
    /// |0...0⟩ as a product state (every bond has dimension 1).
    pub fn zero_state(num_qubits: usize, max_bond_dim: usize) -> Self {
        let site = Array3::from_shape_fn((1, 2, 1), |(_, p, _)| {
            if p == 0 {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        });
        Self {
            tensors: vec![site; num_qubits],
            max_bond_dim: max_bond_dim.max(1),
            discarded_weight: 0.0,
        }
    }

    /// Decompose an amplitude vector, truncating every bond to `max_bond_dim`.
    ///
    /// Truncated weight is recorded in [`Mps::discarded_weight`]; the chain
    /// is not renormalized afterwards.
    pub fn from_state_vector(state: &Statevector, max_bond_dim: usize) -> SimResult<Self> {
        let n = state.num_qubits();
        if n == 0 {
            return Err(SimError::DimensionMismatch {
                expected: 2,
                got: state.dim(),
            });
        }
        let max_bond_dim = max_bond_dim.max(1);

        let mut tensors = Vec::with_capacity(n);
        let mut discarded_weight = 0.0;
        let mut left = 1usize;
        let mut rest: Vec<Complex64> = state.amplitudes().iter().copied().collect();

        for site in 0..n - 1 {
            let rows = left * 2;
            let cols = rest.len() / rows;
            let matrix = DMatrix::from_row_slice(rows, cols, &rest);
            let svd = matrix.svd(true, true);
            let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
                return Err(SimError::Decomposition { site });
            };
            let s = svd.singular_values;

            let mut order: Vec<usize> = (0..s.len()).collect();
            order.sort_by(|&a, &b| s[b].total_cmp(&s[a]));
            let significant = order.iter().filter(|&&i| s[i] > SINGULAR_CUTOFF).count();
            let rank = significant.min(max_bond_dim).max(1);
            let (kept, dropped) = order.split_at(rank);
            discarded_weight += dropped.iter().map(|&i| s[i] * s[i]).sum::<f64>();

            tensors.push(Array3::from_shape_fn((left, 2, rank), |(l, p, r)| {
                u[(l * 2 + p, kept[r])]
            }));

            rest = Vec::with_capacity(rank * cols);
            for &i in kept {
                rest.extend((0..cols).map(|c| v_t[(i, c)] * s[i]));
            }
            left = rank;
        }

        tensors.push(Array3::from_shape_fn((left, 2, 1), |(l, p, _)| {
            rest[l * 2 + p]
        }));

        tracing::debug!(
            num_qubits = n,
            max_bond_dim,
            discarded_weight,
            "built MPS"
        );
        Ok(Self {
            tensors,
            max_bond_dim,
            discarded_weight,
        })
    }

    /// Contract the chain back into a 2ⁿ amplitude vector.
    pub fn to_state_vector(&self) -> SimResult<Statevector> {
        let mut acc = Array2::from_elem((1, 1), Complex64::new(1.0, 0.0));
        for tensor in &self.tensors {
            let (left, phys, right) = tensor.dim();
            if acc.ncols() != left {
                return Err(SimError::DimensionMismatch {
                    expected: acc.ncols(),
                    got: left,
                });
            }
            let site = tensor.view().into_shape_with_order((left, phys * right))?;
            let rows = acc.nrows();
            acc = acc.dot(&site).into_shape_with_order((rows * phys, right))?;
        }
        Statevector::from_amplitudes(acc.iter().copied().collect::<Vec<_>>())
    }

    /// Number of sites.
    pub fn num_qubits(&self) -> usize {
        self.tensors.len()
    }

    /// Dimension of each of the n-1 internal bonds.
    pub fn bond_dims(&self) -> Vec<usize> {
        self.tensors
            .iter()
            .take(self.tensors.len().saturating_sub(1))
            .map(|t| t.dim().2)
            .collect()
    }

    /// Configured bond ceiling.
    pub fn max_bond_dim(&self) -> usize {
        self.max_bond_dim
    }

    /// Sum of squared singular values dropped while building the chain.
    pub fn discarded_weight(&self) -> f64 {
        self.discarded_weight
    }

    /// Site tensors in qubit order.
    pub fn tensors(&self) -> &[Array3<Complex64>] {
        &self.tensors
    }

    /// Shape summary for reporting.
    pub fn summary(&self) -> MpsSummary {
        MpsSummary {
            num_qubits: self.num_qubits(),
            bond_dims: self.bond_dims(),
            max_bond_dim: self.max_bond_dim,
            discarded_weight: self.discarded_weight,
        }
    }
}
