//! Gate records: a gate together with its target qubits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// An immutable gate application.
///
/// The target order is significant: for controlled gates the leading qubits
/// are the controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate applied.
    pub gate: StandardGate,
    /// Qubits this instruction operates on, in gate-leg order.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn new(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::new(gate, [q1, q2])
    }

    /// Canonical gate name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// Target indices as `usize`.
    pub fn qubit_indices(&self) -> Vec<usize> {
        self.qubits.iter().map(|q| q.index()).collect()
    }

    /// True when the two instructions touch no common qubit.
    pub fn is_disjoint(&self, other: &Instruction) -> bool {
        !self.qubits.iter().any(|q| other.qubits.contains(q))
    }

    /// Check arity, index range and duplicate targets against a register size.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let expected = self.gate.num_qubits();
        let got = u32::try_from(self.qubits.len()).unwrap_or(u32::MAX);
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name().to_string(),
                expected,
                got,
            });
        }

        for (i, &qubit) in self.qubits.iter().enumerate() {
            if qubit.0 >= num_qubits {
                return Err(IrError::IndexOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: self.name().to_string(),
                });
            }
            if self.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: self.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
