//! Circuit program builder.

use crate::error::IrResult;
use crate::gate::{Params, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit program: a register size and an ordered gate sequence.
///
/// Every appended instruction is validated against the register before it is
/// recorded, so a `Circuit` never holds an out-of-range or malformed gate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    /// Number of qubits in the register.
    num_qubits: u32,
    /// Gate sequence in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty program over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Create a program from an existing instruction sequence.
    pub fn with_instructions(num_qubits: u32, instructions: Vec<Instruction>) -> IrResult<Self> {
        for inst in &instructions {
            inst.validate(num_qubits)?;
        }
        Ok(Self {
            num_qubits,
            instructions,
        })
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of gates.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// True if no gate has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The gate sequence in program order.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the program, returning its gate sequence.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Drop every recorded gate, keeping the register size.
    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Append a validated instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate(self.num_qubits)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append a gate on the given qubits.
    pub fn apply(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::new(gate, qubits))
    }

    /// Append a gate by name, as the interchange format and callers without
    /// typed gates describe it.
    pub fn append_named(
        &mut self,
        name: &str,
        qubits: &[u32],
        params: &Params,
    ) -> IrResult<&mut Self> {
        let gate = StandardGate::from_name(name, params)?;
        self.apply(gate, qubits.iter().copied().map(QubitId))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply RX rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply RY rotation.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply RZ rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::P(phi), qubit))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply Toffoli gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::new(StandardGate::CCX, [c1, c2, target]))
    }

    // =========================================================================
    // Prebuilt programs
    // =========================================================================

    /// Two-qubit Bell state preparation: H(0), CNOT(0, 1).
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// GHZ state preparation over `n` qubits using a nearest-neighbour CNOT chain.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        Ok(circuit)
    }
}
