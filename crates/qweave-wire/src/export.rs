//! Canonical circuit → external document conversion.

use qweave_circuit::{Circuit, Gate, ParamSpec};
use serde_json::Value;
use tracing::debug;

use crate::document::{ExportFormat, Snapshot, SnapshotGate, WireDocument, WireGate, WireParam};

/// Build the flat wire-list document for the execution backend.
///
/// Gates are emitted in ascending time-step order (stable on insertion
/// order for ties), each as `{gate, wires, params}` with control wires
/// ahead of target wires.
///
/// Rotation gates carrying a `(count, angle)` parameter pair are expanded
/// into `count` contiguous single-angle entries; the backend only
/// understands literal gate instances. The count metadata is dropped:
/// re-importing such an export yields `count` independent gates, not the
/// compressed form.
pub fn wire_list(circuit: &Circuit) -> WireDocument {
    let mut ordered: Vec<&Gate> = circuit.gates.iter().collect();
    ordered.sort_by_key(|gate| gate.time_step);

    let mut gates = Vec::with_capacity(ordered.len());
    for gate in ordered {
        let wires = gate.operands.wires();
        match gate.ty.count_param() {
            Some(count_spec) if gate.params.len() >= 2 => {
                let count = expansion_count(gate.params[0], count_spec);
                let angle = gate.params[1];
                debug!(gate = %gate.ty, count, "expanding repeated rotation");
                for _ in 0..count {
                    gates.push(WireGate {
                        gate: gate.ty.name().into(),
                        wires: wires.clone(),
                        params: vec![WireParam::Number(angle)],
                    });
                }
            }
            _ => {
                gates.push(WireGate {
                    gate: gate.ty.name().into(),
                    wires,
                    params: gate.params.iter().copied().map(WireParam::Number).collect(),
                });
            }
        }
    }

    debug!(
        gates = circuit.gates.len(),
        emitted = gates.len(),
        "built wire-list document"
    );
    WireDocument {
        qubits: circuit.qubit_count,
        variables: circuit.variable_count,
        gates,
    }
}

/// Coerce a raw count parameter into a repetition count.
///
/// Rounded to the nearest integer and floored at the spec minimum, so a
/// malformed count degrades to a single instance instead of dropping the
/// gate.
fn expansion_count(raw: f64, spec: &ParamSpec) -> u32 {
    raw.round().max(spec.min) as u32
}

/// Build the canonical snapshot document (lossless, insertion order).
pub fn snapshot(circuit: &Circuit) -> Snapshot {
    Snapshot {
        qubits: circuit.qubit_count,
        variables: circuit.variable_count,
        gates: circuit.gates.iter().map(SnapshotGate::from).collect(),
    }
}

/// Produce the requested external shape as a JSON value.
pub fn export(circuit: &Circuit, format: ExportFormat) -> Value {
    match format {
        ExportFormat::Snapshot => {
            serde_json::to_value(snapshot(circuit)).expect("snapshot serialization is infallible")
        }
        ExportFormat::WireList => {
            serde_json::to_value(wire_list(circuit)).expect("wire-list serialization is infallible")
        }
    }
}
