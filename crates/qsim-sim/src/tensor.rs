//! Tensor-contraction backend.
//!
//! The register is held as a rank-n tensor with one axis of length 2 per
//! qubit. Flattened in row-major order it is exactly the amplitude vector,
//! with axis 0 (qubit 0) as the most significant bit. A k-qubit gate is
//! applied by bringing its target axes to the front, contracting them
//! against the gate's input legs and restoring the axis order, so the
//! 2ⁿ×2ⁿ operator is never built and any arity or target set works.

use ndarray::{Array1, Array2, ArrayD, IxDyn};
use num_complex::Complex64;
use qsim_ir::Instruction;

use crate::error::{SimError, SimResult};
use crate::library::gate_matrix;
use crate::statevector::Statevector;

/// Rank-n state tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTensor {
    tensor: ArrayD<Complex64>,
    num_qubits: usize,
}

impl StateTensor {
    /// |0...0⟩ as a tensor.
    pub fn zero_state(num_qubits: usize) -> Self {
        let mut tensor = ArrayD::zeros(IxDyn(&vec![2; num_qubits]));
        if let Some(first) = tensor.iter_mut().next() {
            *first = Complex64::new(1.0, 0.0);
        }
        Self { tensor, num_qubits }
    }

    /// Reshape a flat amplitude vector.
    pub fn from_statevector(state: &Statevector) -> SimResult<Self> {
        let num_qubits = state.num_qubits();
        let tensor = state
            .amplitudes()
            .clone()
            .into_shape_with_order(IxDyn(&vec![2; num_qubits]))?;
        Ok(Self { tensor, num_qubits })
    }

    /// Flatten back to an amplitude vector.
    pub fn to_statevector(&self) -> SimResult<Statevector> {
        Statevector::from_amplitudes(self.tensor.iter().copied().collect::<Array1<_>>())
    }

    /// Number of qubits (tensor rank).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Underlying tensor.
    pub fn tensor(&self) -> &ArrayD<Complex64> {
        &self.tensor
    }

    /// Contract a 2ᵏ×2ᵏ gate into the axes named by `targets`.
    ///
    /// The first target is the most significant leg of the gate matrix.
    pub fn apply_gate(&mut self, matrix: &Array2<Complex64>, targets: &[usize]) -> SimResult<()> {
        let n = self.num_qubits;
        validate_targets(targets, n)?;
        let k = targets.len();
        let local_dim = 1usize << k;
        if matrix.dim() != (local_dim, local_dim) {
            return Err(SimError::DimensionMismatch {
                expected: local_dim,
                got: matrix.nrows(),
            });
        }

        let mut perm: Vec<usize> = targets.to_vec();
        perm.extend((0..n).filter(|axis| !targets.contains(axis)));
        let mut inverse = vec![0; n];
        for (position, &axis) in perm.iter().enumerate() {
            inverse[axis] = position;
        }

        let front = self
            .tensor
            .view()
            .permuted_axes(perm)
            .as_standard_layout()
            .into_owned()
            .into_shape_with_order((local_dim, (1usize << n) / local_dim))?;
        let contracted = matrix.dot(&front).into_shape_with_order(IxDyn(&vec![2; n]))?;

        self.tensor = contracted
            .permuted_axes(inverse)
            .as_standard_layout()
            .into_owned();
        Ok(())
    }

    /// Resolve an instruction's gate and apply it.
    pub fn apply_instruction(&mut self, instruction: &Instruction) -> SimResult<()> {
        let targets: Vec<usize> = instruction.qubit_indices();
        self.apply_gate(&gate_matrix(&instruction.gate), &targets)
    }
}

/// Targets must be non-empty, in range and pairwise distinct.
pub(crate) fn validate_targets(targets: &[usize], num_qubits: usize) -> SimResult<()> {
    if targets.is_empty() {
        return Err(SimError::UnsupportedArity {
            gate: "<empty>".into(),
            arity: 0,
        });
    }
    for (i, &q) in targets.iter().enumerate() {
        if q >= num_qubits {
            return Err(SimError::IndexOutOfRange {
                qubit: q,
                num_qubits,
            });
        }
        if targets[..i].contains(&q) {
            return Err(SimError::DuplicateQubit { qubit: q });
        }
    }
    Ok(())
}
