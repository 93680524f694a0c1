//! Serde types for the external circuit document shapes.
//!
//! Two shapes leave this crate: the flat wire-list document consumed by
//! the execution backend, and the canonical snapshot used for lossless
//! round-trips. Incoming documents are far less regular and are handled
//! field-by-field in [`crate::import`] instead of through these types.

use qweave_circuit::{Gate, GateType, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which external shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Canonical `{qubits, variables, gates:[{id, type, target, ...}]}`.
    Snapshot,
    /// Flat `{qubits, variables, gates:[{gate, wires, params}]}`.
    WireList,
}

/// A parameter in the wire format.
///
/// The execution backend accepts literal numbers and symbolic references
/// to classical input features (`"input_0"`, `"input_1"`, ...). The
/// canonical editor model stores numbers only; symbols appear when a
/// document is authored against the backend directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireParam {
    /// Literal value.
    Number(f64),
    /// Symbolic reference, expected to match `input_<n>`.
    Input(String),
}

impl WireParam {
    /// The literal value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            WireParam::Number(value) => Some(*value),
            WireParam::Input(_) => None,
        }
    }

    /// The referenced input index, if this is a well-formed `input_<n>`.
    pub fn input_index(&self) -> Option<u32> {
        match self {
            WireParam::Number(_) => None,
            WireParam::Input(raw) => {
                let digits = raw.strip_prefix("input_")?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok()
            }
        }
    }
}

impl fmt::Display for WireParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireParam::Number(value) => write!(f, "{value}"),
            WireParam::Input(raw) => f.write_str(raw),
        }
    }
}

/// One gate entry in the wire-list document.
///
/// `wires` lists control wires first, then target wires — the operand
/// convention the execution backend applies verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGate {
    /// Uppercase gate name.
    pub gate: String,
    /// Touched wires, control first.
    pub wires: Vec<WireId>,
    /// Positional parameters.
    #[serde(default)]
    pub params: Vec<WireParam>,
}

/// The flat wire-list document sent to the execution backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDocument {
    /// Number of wires.
    pub qubits: u32,
    /// Number of classical input variables.
    pub variables: u32,
    /// Gate stream in execution order.
    pub gates: Vec<WireGate>,
}

/// One gate entry in the canonical snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotGate {
    /// Unique id within the circuit.
    pub id: String,
    /// Gate type.
    #[serde(rename = "type")]
    pub ty: GateType,
    /// Acted-on wires.
    pub target: Vec<WireId>,
    /// Control wires; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control: Vec<WireId>,
    /// Positional parameters.
    #[serde(default)]
    pub params: Vec<f64>,
    /// Column position.
    #[serde(rename = "timeStep")]
    pub time_step: u32,
}

impl From<&Gate> for SnapshotGate {
    fn from(gate: &Gate) -> Self {
        Self {
            id: gate.id.clone(),
            ty: gate.ty,
            target: gate.operands.targets().to_vec(),
            control: gate.operands.control().to_vec(),
            params: gate.params.clone(),
            time_step: gate.time_step,
        }
    }
}

/// The canonical round-trip document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of wires.
    pub qubits: u32,
    /// Number of classical input variables.
    pub variables: u32,
    /// Gate instances in insertion order.
    pub gates: Vec<SnapshotGate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_gate_serialization() {
        let gate = WireGate {
            gate: "CNOT".into(),
            wires: vec![WireId(0), WireId(1)],
            params: vec![],
        };
        let json = serde_json::to_string(&gate).unwrap();
        assert!(json.contains(r#""gate":"CNOT""#));
        assert!(json.contains(r#""wires":[0,1]"#));
    }

    #[test]
    fn test_wire_param_untagged_roundtrip() {
        let params: Vec<WireParam> =
            serde_json::from_str(r#"[1.57, "input_0", 3]"#).unwrap();
        assert_eq!(params[0].as_number(), Some(1.57));
        assert_eq!(params[1].input_index(), Some(0));
        assert_eq!(params[2].as_number(), Some(3.0));
    }

    #[test]
    fn test_input_index_pattern() {
        assert_eq!(WireParam::Input("input_12".into()).input_index(), Some(12));
        assert_eq!(WireParam::Input("input_".into()).input_index(), None);
        assert_eq!(WireParam::Input("input_+3".into()).input_index(), None);
        assert_eq!(WireParam::Input("theta_1".into()).input_index(), None);
        assert_eq!(WireParam::Number(4.0).input_index(), None);
    }

    #[test]
    fn test_snapshot_gate_field_names() {
        let gate = SnapshotGate {
            id: "g1".into(),
            ty: GateType::Ry,
            target: vec![WireId(0)],
            control: vec![],
            params: vec![1.57],
            time_step: 3,
        };
        let json = serde_json::to_string(&gate).unwrap();
        assert!(json.contains(r#""type":"RY""#));
        assert!(json.contains(r#""timeStep":3"#));
        // Empty control is omitted entirely.
        assert!(!json.contains("control"));
    }
}
