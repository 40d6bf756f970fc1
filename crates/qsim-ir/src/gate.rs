//! The closed set of gates understood by the simulator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Named real-valued gate parameters, e.g. `{"theta": 0.5}`.
pub type Params = BTreeMap<String, f64>;

/// Axis of a single-qubit rotation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

/// Standard gates with known semantics.
///
/// Parameterized variants carry their angle directly. Angles are never
/// range-checked here; any real value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford and phase gates
    /// Hadamard gate.
    H,
    /// T gate (fourth root of Z).
    T,
    /// S gate (sqrt(Z)).
    S,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate diag(1, e^{iφ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, first qubit is the control.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX), first two qubits are controls.
    CCX,
}

impl StandardGate {
    /// Canonical names accepted by [`StandardGate::from_name`], in catalog order.
    pub const NAMES: [&'static str; 14] = [
        "X", "Y", "Z", "H", "T", "S", "RX", "RY", "RZ", "PHASE", "CNOT", "CZ", "SWAP", "TOFFOLI",
    ];

    /// Get the canonical name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "X",
            StandardGate::Y => "Y",
            StandardGate::Z => "Z",
            StandardGate::H => "H",
            StandardGate::T => "T",
            StandardGate::S => "S",
            StandardGate::Rx(_) => "RX",
            StandardGate::Ry(_) => "RY",
            StandardGate::Rz(_) => "RZ",
            StandardGate::P(_) => "PHASE",
            StandardGate::CX => "CNOT",
            StandardGate::CZ => "CZ",
            StandardGate::Swap => "SWAP",
            StandardGate::CCX => "TOFFOLI",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::T
            | StandardGate::S
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            StandardGate::CCX => 3,
        }
    }

    /// Whether applying the gate twice on the same qubits is the identity
    /// and the inverse-cancellation rule may drop such a pair.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::X | StandardGate::Y | StandardGate::Z | StandardGate::H | StandardGate::CX
        )
    }

    /// Axis and angle for the mergeable rotations RX, RY and RZ.
    pub fn rotation(&self) -> Option<(RotationAxis, f64)> {
        match self {
            StandardGate::Rx(theta) => Some((RotationAxis::X, *theta)),
            StandardGate::Ry(theta) => Some((RotationAxis::Y, *theta)),
            StandardGate::Rz(theta) => Some((RotationAxis::Z, *theta)),
            _ => None,
        }
    }

    /// Build a rotation gate about `axis`.
    pub fn from_rotation(axis: RotationAxis, theta: f64) -> Self {
        match axis {
            RotationAxis::X => StandardGate::Rx(theta),
            RotationAxis::Y => StandardGate::Ry(theta),
            RotationAxis::Z => StandardGate::Rz(theta),
        }
    }

    /// Name of the parameter this gate reads, if any.
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Rz(_) => Some("theta"),
            StandardGate::P(_) => Some("phi"),
            _ => None,
        }
    }

    /// The gate's parameters as a named map.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        match self {
            StandardGate::Rx(v) | StandardGate::Ry(v) | StandardGate::Rz(v) | StandardGate::P(v) => {
                if let Some(name) = self.param_name() {
                    params.insert(name.to_string(), *v);
                }
            }
            _ => {}
        }
        params
    }

    /// Resolve a gate from its name and parameter map.
    ///
    /// Names are matched case-insensitively; `CX`, `CCX` and `P` are accepted
    /// as aliases. A missing angle defaults to `0.0` and unrelated parameters
    /// are ignored.
    pub fn from_name(name: &str, params: &Params) -> IrResult<Self> {
        let theta = || params.get("theta").copied().unwrap_or(0.0);
        let gate = match name.to_ascii_uppercase().as_str() {
            "X" => StandardGate::X,
            "Y" => StandardGate::Y,
            "Z" => StandardGate::Z,
            "H" => StandardGate::H,
            "T" => StandardGate::T,
            "S" => StandardGate::S,
            "RX" => StandardGate::Rx(theta()),
            "RY" => StandardGate::Ry(theta()),
            "RZ" => StandardGate::Rz(theta()),
            "PHASE" | "P" => StandardGate::P(params.get("phi").copied().unwrap_or(0.0)),
            "CNOT" | "CX" => StandardGate::CX,
            "CZ" => StandardGate::CZ,
            "SWAP" => StandardGate::Swap,
            "TOFFOLI" | "CCX" => StandardGate::CCX,
            _ => return Err(IrError::UnknownGate(name.to_string())),
        };
        Ok(gate)
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            StandardGate::X => "Pauli-X (NOT) gate",
            StandardGate::Y => "Pauli-Y gate",
            StandardGate::Z => "Pauli-Z gate",
            StandardGate::H => "Hadamard gate",
            StandardGate::T => "T gate (pi/8 phase)",
            StandardGate::S => "S gate (pi/4 phase)",
            StandardGate::Rx(_) => "Rotation around the X axis",
            StandardGate::Ry(_) => "Rotation around the Y axis",
            StandardGate::Rz(_) => "Rotation around the Z axis",
            StandardGate::P(_) => "Phase gate",
            StandardGate::CX => "Controlled-NOT gate",
            StandardGate::CZ => "Controlled-Z gate",
            StandardGate::Swap => "SWAP gate",
            StandardGate::CCX => "Toffoli (CCNOT) gate",
        }
    }

    /// Every gate kind with its arity and parameter names.
    pub fn catalog() -> Vec<GateInfo> {
        Self::NAMES
            .iter()
            .filter_map(|name| Self::from_name(name, &Params::new()).ok())
            .map(|gate| GateInfo {
                name: gate.name(),
                num_qubits: gate.num_qubits(),
                params: gate.param_name().into_iter().collect(),
                description: gate.description(),
            })
            .collect()
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardGate::Rx(v) | StandardGate::Ry(v) | StandardGate::Rz(v) | StandardGate::P(v) => {
                write!(f, "{}({v})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Catalog entry describing one gate kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateInfo {
    /// Canonical name.
    pub name: &'static str,
    /// Number of target qubits.
    pub num_qubits: u32,
    /// Parameter names the gate reads.
    pub params: Vec<&'static str>,
    /// Human-readable description.
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);

        assert!(StandardGate::CX.is_self_inverse());
        assert!(!StandardGate::S.is_self_inverse());
        assert!(!StandardGate::Swap.is_self_inverse());
    }

    #[test]
    fn test_from_name_reads_params() {
        let mut params = Params::new();
        params.insert("theta".into(), PI / 2.0);
        params.insert("phi".into(), 0.25);

        assert_eq!(
            StandardGate::from_name("RY", &params).unwrap(),
            StandardGate::Ry(PI / 2.0)
        );
        assert_eq!(
            StandardGate::from_name("phase", &params).unwrap(),
            StandardGate::P(0.25)
        );
        assert_eq!(
            StandardGate::from_name("rz", &Params::new()).unwrap(),
            StandardGate::Rz(0.0)
        );
        assert_eq!(
            StandardGate::from_name("cx", &Params::new()).unwrap(),
            StandardGate::CX
        );
    }

    #[test]
    fn test_unknown_gate() {
        let err = StandardGate::from_name("FOO", &Params::new()).unwrap_err();
        assert!(matches!(err, IrError::UnknownGate(ref name) if name == "FOO"));
    }

    #[test]
    fn test_params_round_trip_through_name() {
        for gate in [
            StandardGate::Rx(1.5),
            StandardGate::P(-0.3),
            StandardGate::Swap,
            StandardGate::CCX,
        ] {
            let back = StandardGate::from_name(gate.name(), &gate.params()).unwrap();
            assert_eq!(back, gate);
        }
    }

    #[test]
    fn test_catalog_covers_every_name() {
        let catalog = StandardGate::catalog();
        assert_eq!(catalog.len(), StandardGate::NAMES.len());
        let rx = catalog.iter().find(|g| g.name == "RX").unwrap();
        assert_eq!(rx.params, vec!["theta"]);
        let toffoli = catalog.iter().find(|g| g.name == "TOFFOLI").unwrap();
        assert_eq!(toffoli.num_qubits, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(StandardGate::H.to_string(), "H");
        assert_eq!(StandardGate::Rz(0.5).to_string(), "RZ(0.5)");
    }
}
