//! The JSON program interchange format.
//!
//! ```json
//! {"n_qubits": 2, "gates": [{"gate": "H", "qubits": [0], "params": {}}]}
//! ```

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::{Params, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A serialized gate application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Gate name.
    pub gate: String,
    /// Target qubit indices.
    pub qubits: Vec<u32>,
    /// Named parameters.
    #[serde(default)]
    pub params: Params,
}

/// A serialized circuit program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    /// Register size.
    pub n_qubits: u32,
    /// Gates in program order.
    #[serde(default)]
    pub gates: Vec<GateSpec>,
}

impl From<&Instruction> for GateSpec {
    fn from(inst: &Instruction) -> Self {
        Self {
            gate: inst.name().to_string(),
            qubits: inst.qubits.iter().map(|q| q.0).collect(),
            params: inst.gate.params(),
        }
    }
}

impl GateSpec {
    /// Resolve into a typed instruction. Register bounds are checked by the caller.
    pub fn to_instruction(&self) -> IrResult<Instruction> {
        let gate = StandardGate::from_name(&self.gate, &self.params)?;
        Ok(Instruction::new(gate, self.qubits.iter().copied().map(QubitId)))
    }
}

impl Circuit {
    /// Encode into the interchange structure.
    pub fn to_spec(&self) -> CircuitSpec {
        CircuitSpec {
            n_qubits: self.num_qubits(),
            gates: self.instructions().iter().map(GateSpec::from).collect(),
        }
    }

    /// Rebuild a program from the interchange structure.
    ///
    /// Fails on the first unknown gate or invalid target list.
    pub fn from_spec(spec: &CircuitSpec) -> IrResult<Self> {
        let mut circuit = Circuit::new(spec.n_qubits);
        for gate in &spec.gates {
            circuit.append(gate.to_instruction()?)?;
        }
        Ok(circuit)
    }

    /// Serialize to interchange JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(&self.to_spec())?)
    }

    /// Serialize to pretty-printed interchange JSON.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_spec())?)
    }

    /// Parse interchange JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let spec: CircuitSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }
}
