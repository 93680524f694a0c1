//! External JSON → canonical circuit, with schema repair.
//!
//! Uploaded and pasted documents arrive in three historical shapes:
//!
//! 1. legacy object: `{qubits, gates: [{type|gate, target, control?,
//!    params?, timeStep}]}`
//! 2. wire-list object: `{circuit: [{gate, wires, params?}]}` (no time
//!    steps; array position is the step)
//! 3. a bare array of gate entries with no wrapping counts
//!
//! All three are normalized through the same per-entry repair: field
//! aliasing, vocabulary check, id backfill, control backfill, parameter
//! padding, and time-step backfill, followed by qubit-count inference over
//! the whole document. Any structure the repair rules do not cover fails
//! the import atomically — no partial circuit ever escapes.

use qweave_circuit::{
    Circuit, CircuitError, CircuitResult, Gate, GateType, Operands, WireId, fresh_gate_id,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::WireResult;

/// Context supplied by the embedding store.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Current wire count of the embedding store, if imports should grow
    /// to it. Participates in the qubit-count maximum only — it can widen
    /// the result, never narrow it.
    pub min_qubit_count: Option<u32>,
}

impl ImportOptions {
    /// Options with no embedding context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Never produce fewer wires than `count`.
    #[must_use]
    pub fn min_qubit_count(mut self, count: u32) -> Self {
        self.min_qubit_count = Some(count);
        self
    }
}

/// Parse and repair a JSON text into a canonical circuit.
pub fn import_str(text: &str, options: &ImportOptions) -> WireResult<Circuit> {
    let value: Value = serde_json::from_str(text)?;
    Ok(import(&value, options)?)
}

/// Repair an already-parsed JSON document into a canonical circuit.
pub fn import(value: &Value, options: &ImportOptions) -> CircuitResult<Circuit> {
    let (entries, declared_qubits, declared_variables) = match value {
        Value::Object(map) => {
            let entries = if let Some(gates) = map.get("gates") {
                entry_array(gates, "gates")?
            } else if let Some(circuit) = map.get("circuit") {
                entry_array(circuit, "circuit")?
            } else {
                return Err(invalid(None, "expected a 'gates' or 'circuit' array"));
            };
            (
                entries,
                read_count(map, &["qubits", "qubit_count"])?,
                read_count(map, &["variables", "variable_count"])?,
            )
        }
        Value::Array(entries) => (entries.as_slice(), None, None),
        _ => {
            return Err(invalid(
                None,
                "top-level document must be an object or array",
            ));
        }
    };

    let mut gates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        gates.push(normalize_entry(index, entry)?);
    }

    // Qubit-count inference: never shrink below what the gates require,
    // honor an explicit declaration, and only ever grow to the embedding
    // store's count.
    let required = gates
        .iter()
        .filter_map(|gate| gate.operands.max_wire())
        .map(|wire| wire.0 + 1)
        .max()
        .unwrap_or(0);
    let qubit_count = required
        .max(declared_qubits.unwrap_or(0))
        .max(options.min_qubit_count.unwrap_or(0))
        .max(1);
    let variable_count = declared_variables.unwrap_or(qubit_count);

    let circuit = Circuit {
        qubit_count,
        variable_count,
        gates,
    };
    circuit.validate()?;

    debug!(
        gates = circuit.gates.len(),
        qubits = circuit.qubit_count,
        required,
        "imported circuit document"
    );
    Ok(circuit)
}

/// Normalize one gate entry through the per-gate repair rules.
fn normalize_entry(index: usize, entry: &Value) -> CircuitResult<Gate> {
    let Some(map) = entry.as_object() else {
        return Err(invalid_at(index, "gate entry must be an object"));
    };

    // Field aliasing: `type` / `gate` / `name` name the operation;
    // `target`+`control` or a combined `wires` list name the operands.
    let raw_ty = match map.get("type").or_else(|| map.get("gate")).or_else(|| map.get("name")) {
        None => return Err(invalid_at(index, "missing gate type")),
        Some(value) => value
            .as_str()
            .ok_or_else(|| invalid_at(index, "gate type must be a string"))?,
    };
    let (control, targets) = split_operands(index, map)?;

    // Vocabulary check: the normalized type must be known.
    let normalized = raw_ty.trim().to_ascii_uppercase();
    let Some(ty) = GateType::parse(&normalized) else {
        return Err(CircuitError::UnknownGateType(normalized));
    };

    // Id backfill.
    let id = match map.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => fresh_gate_id(),
    };

    // Control backfill: mandatory controls default to the wire adjacent
    // to the first target, preferring the one above.
    let control = if ty.requires_control() && control.is_empty() {
        let first = targets[0].0;
        let adjacent = if first == 0 { first + 1 } else { first - 1 };
        debug!(gate = index, wire = adjacent, "backfilled control wire");
        vec![WireId(adjacent)]
    } else {
        control
    };

    // Param backfill: pad missing trailing entries with schema defaults;
    // longer arrays are preserved untouched.
    let mut params = read_params(index, map)?;
    for spec in ty.params().iter().skip(params.len()) {
        params.push(spec.default);
    }

    // Time-step backfill: anything but a non-negative integer becomes the
    // positional index.
    let time_step = map
        .get("timeStep")
        .and_then(Value::as_u64)
        .and_then(|step| u32::try_from(step).ok())
        .unwrap_or(index as u32);

    let operands = Operands::from_parts(control, targets, ty.multi_target());
    Ok(Gate::with_id(id, ty, operands, params, time_step))
}

/// Derive `(control, targets)` from whichever operand fields are present.
///
/// In a combined `wires` list, every entry but the last is a control wire
/// and the last is the target.
fn split_operands(index: usize, map: &Map<String, Value>) -> CircuitResult<(Vec<WireId>, Vec<WireId>)> {
    if let Some(target) = map.get("target") {
        let targets = parse_wires(index, "target", target)?;
        if targets.is_empty() {
            return Err(invalid_at(index, "empty target"));
        }
        let control = match map.get("control") {
            None | Some(Value::Null) => vec![],
            Some(value) => parse_wires(index, "control", value)?,
        };
        Ok((control, targets))
    } else if let Some(wires) = map.get("wires") {
        let wires = parse_wires(index, "wires", wires)?;
        let Some((&target, control)) = wires.split_last() else {
            return Err(invalid_at(index, "empty wires"));
        };
        Ok((control.to_vec(), vec![target]))
    } else {
        Err(invalid_at(index, "missing target or wires"))
    }
}

/// Parse an array of non-negative wire indices.
fn parse_wires(index: usize, field: &str, value: &Value) -> CircuitResult<Vec<WireId>> {
    let Some(array) = value.as_array() else {
        return Err(invalid_at(index, format!("{field} must be an array")));
    };
    array
        .iter()
        .map(|entry| {
            entry
                .as_u64()
                .and_then(|wire| u32::try_from(wire).ok())
                .map(WireId)
                .ok_or_else(|| {
                    invalid_at(index, format!("{field} entries must be non-negative integers"))
                })
        })
        .collect()
}

/// Parse the numeric parameter list; absent means empty.
fn read_params(index: usize, map: &Map<String, Value>) -> CircuitResult<Vec<f64>> {
    match map.get("params") {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                value.as_f64().ok_or_else(|| {
                    invalid_at(index, format!("parameter {position} must be a number"))
                })
            })
            .collect(),
        Some(_) => Err(invalid_at(index, "params must be an array")),
    }
}

/// Read the first present count field among `keys`.
fn read_count(map: &Map<String, Value>, keys: &[&str]) -> CircuitResult<Option<u32>> {
    for key in keys {
        if let Some(value) = map.get(*key) {
            let count = value
                .as_u64()
                .and_then(|count| u32::try_from(count).ok())
                .ok_or_else(|| {
                    invalid(None, format!("{key} must be a non-negative integer"))
                })?;
            return Ok(Some(count));
        }
    }
    Ok(None)
}

fn invalid(gate: Option<usize>, reason: impl Into<String>) -> CircuitError {
    CircuitError::InvalidCircuitSchema {
        gate,
        reason: reason.into(),
    }
}

fn invalid_at(index: usize, reason: impl Into<String>) -> CircuitError {
    invalid(Some(index), reason)
}

fn entry_array<'a>(value: &'a Value, field: &str) -> CircuitResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(None, format!("{field} must be an array")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn import_value(value: Value) -> CircuitResult<Circuit> {
        import(&value, &ImportOptions::default())
    }

    #[test]
    fn test_legacy_object_shape() {
        let circuit = import_value(json!({
            "qubits": 3,
            "gates": [
                {"id": "g1", "type": "H", "target": [0], "timeStep": 0},
                {"id": "g2", "type": "CNOT", "target": [2], "control": [1], "timeStep": 1}
            ]
        }))
        .unwrap();

        assert_eq!(circuit.qubit_count, 3);
        assert_eq!(circuit.gates.len(), 2);
        assert_eq!(circuit.gates[1].ty, GateType::Cnot);
        assert_eq!(circuit.gates[1].operands.control(), &[WireId(1)]);
    }

    #[test]
    fn test_lowercase_cnot_gets_adjacent_control() {
        // Control defaults to the wire above the target and the type is
        // normalized to uppercase.
        let circuit = import_value(json!({
            "qubits": 2,
            "gates": [{"type": "cnot", "target": [1], "timeStep": 0}]
        }))
        .unwrap();

        let gate = &circuit.gates[0];
        assert_eq!(gate.ty, GateType::Cnot);
        assert_eq!(gate.ty.name(), "CNOT");
        assert_eq!(gate.operands.control(), &[WireId(0)]);
        assert_eq!(gate.operands.targets(), &[WireId(1)]);
    }

    #[test]
    fn test_control_backfill_falls_back_below_wire_zero() {
        let circuit = import_value(json!({
            "gates": [{"type": "CZ", "target": [0]}]
        }))
        .unwrap();

        assert_eq!(circuit.gates[0].operands.control(), &[WireId(1)]);
        // The backfilled control grows the inferred count.
        assert_eq!(circuit.qubit_count, 2);
    }

    #[test]
    fn test_wire_list_object_shape_assigns_positional_time_steps() {
        let circuit = import_value(json!({
            "circuit": [
                {"gate": "H", "wires": [0]},
                {"gate": "CNOT", "wires": [0, 1]},
                {"gate": "RY", "wires": [1], "params": [1.57]}
            ]
        }))
        .unwrap();

        assert_eq!(circuit.qubit_count, 2);
        let steps: Vec<u32> = circuit.gates.iter().map(|gate| gate.time_step).collect();
        assert_eq!(steps, vec![0, 1, 2]);

        // wires split: all but the last are control.
        let cnot = &circuit.gates[1];
        assert_eq!(cnot.operands.control(), &[WireId(0)]);
        assert_eq!(cnot.operands.targets(), &[WireId(1)]);
    }

    #[test]
    fn test_bare_array_shape() {
        let circuit = import_value(json!([
            {"type": "X", "target": [4]},
            {"gate": "H", "wires": [2]}
        ]))
        .unwrap();

        assert_eq!(circuit.qubit_count, 5);
        assert_eq!(circuit.variable_count, 5);
    }

    #[test]
    fn test_unknown_gate_type_fails_whole_import() {
        let err = import_value(json!({
            "qubits": 2,
            "gates": [
                {"type": "H", "target": [0]},
                {"type": "WARP", "target": [1]}
            ]
        }))
        .unwrap_err();

        assert!(matches!(err, CircuitError::UnknownGateType(name) if name == "WARP"));
    }

    #[test]
    fn test_id_backfill_is_unique() {
        let circuit = import_value(json!({
            "gates": [
                {"type": "H", "target": [0]},
                {"type": "H", "target": [1]}
            ]
        }))
        .unwrap();

        assert!(!circuit.gates[0].id.is_empty());
        assert_ne!(circuit.gates[0].id, circuit.gates[1].id);
    }

    #[test]
    fn test_declared_count_never_shrinks_below_required() {
        let circuit = import_value(json!({
            "qubits": 2,
            "gates": [{"type": "X", "target": [6]}]
        }))
        .unwrap();
        assert_eq!(circuit.qubit_count, 7);

        // A larger declaration is honored as-is.
        let circuit = import_value(json!({
            "qubits": 9,
            "gates": [{"type": "X", "target": [0]}]
        }))
        .unwrap();
        assert_eq!(circuit.qubit_count, 9);
    }

    #[test]
    fn test_min_qubit_count_grows_only() {
        let doc = json!({"qubits": 3, "gates": [{"type": "X", "target": [0]}]});

        let grown = import(&doc, &ImportOptions::new().min_qubit_count(8)).unwrap();
        assert_eq!(grown.qubit_count, 8);

        let kept = import(&doc, &ImportOptions::new().min_qubit_count(2)).unwrap();
        assert_eq!(kept.qubit_count, 3);
    }

    #[test]
    fn test_qubit_count_alias() {
        let circuit = import_value(json!({
            "qubit_count": 4,
            "variable_count": 2,
            "gates": [{"type": "H", "target": [0]}]
        }))
        .unwrap();
        assert_eq!(circuit.qubit_count, 4);
        assert_eq!(circuit.variable_count, 2);
    }

    #[test]
    fn test_variables_default_to_qubit_count() {
        let circuit = import_value(json!({
            "qubits": 6,
            "gates": [{"type": "H", "target": [0]}]
        }))
        .unwrap();
        assert_eq!(circuit.variable_count, 6);
    }

    #[test]
    fn test_param_padding_to_schema_length() {
        let circuit = import_value(json!({
            "gates": [{"type": "U3", "target": [0], "params": [1.2]}]
        }))
        .unwrap();
        assert_eq!(circuit.gates[0].params, vec![1.2, 0.0, 0.0]);
    }

    #[test]
    fn test_extra_params_preserved() {
        let circuit = import_value(json!({
            "gates": [{"type": "RY", "target": [0], "params": [3.0, 1.57]}]
        }))
        .unwrap();
        assert_eq!(circuit.gates[0].params, vec![3.0, 1.57]);
    }

    #[test]
    fn test_invalid_time_step_becomes_positional() {
        let circuit = import_value(json!({
            "gates": [
                {"type": "H", "target": [0], "timeStep": -2},
                {"type": "H", "target": [0], "timeStep": 1.5},
                {"type": "H", "target": [0], "timeStep": "soon"},
                {"type": "H", "target": [0], "timeStep": 7}
            ]
        }))
        .unwrap();

        let steps: Vec<u32> = circuit.gates.iter().map(|gate| gate.time_step).collect();
        assert_eq!(steps, vec![0, 1, 2, 7]);
    }

    #[test]
    fn test_empty_target_is_structural_failure() {
        let err = import_value(json!({
            "gates": [{"type": "H", "target": []}]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            CircuitError::InvalidCircuitSchema { gate: Some(0), .. }
        ));
    }

    #[test]
    fn test_empty_wires_is_structural_failure() {
        let err = import_value(json!({
            "circuit": [{"gate": "H", "wires": []}]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            CircuitError::InvalidCircuitSchema { gate: Some(0), .. }
        ));
    }

    #[test]
    fn test_non_numeric_param_rejected() {
        let err = import_value(json!({
            "gates": [{"type": "RY", "target": [0], "params": ["theta_1"]}]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            CircuitError::InvalidCircuitSchema { gate: Some(0), .. }
        ));
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        assert!(import_value(json!(42)).is_err());
        assert!(import_value(json!("circuit")).is_err());
        assert!(import_value(json!({"qubits": 2})).is_err());
    }

    #[test]
    fn test_negative_wire_rejected() {
        let err = import_value(json!({
            "gates": [{"type": "X", "target": [-1]}]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            CircuitError::InvalidCircuitSchema { gate: Some(0), .. }
        ));
    }

    #[test]
    fn test_import_str_reports_malformed_json() {
        let err = import_str("{not json", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::WireError::Json(_)));
    }

    #[test]
    fn test_empty_document_yields_single_wire_circuit() {
        let circuit = import_value(json!({"gates": []})).unwrap();
        assert_eq!(circuit.qubit_count, 1);
        assert!(circuit.gates.is_empty());
    }

    #[test]
    fn test_swap_keeps_both_wires() {
        let circuit = import_value(json!({
            "gates": [{"type": "swap", "target": [2], "control": [3]}]
        }))
        .unwrap();

        let gate = &circuit.gates[0];
        assert_eq!(gate.ty, GateType::Swap);
        assert!(matches!(gate.operands, Operands::MultiTarget { .. }));
        assert_eq!(circuit.qubit_count, 4);
    }
}
