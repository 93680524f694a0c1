//! Structural metrics over wire-list documents.

use qweave_circuit::WireId;
use rustc_hash::FxHashMap;

use crate::document::WireDocument;

/// Circuit depth: the longest chain of gates sharing a wire.
///
/// Each gate lands one layer after the deepest layer already occupied on
/// any of its wires. Zero for an empty stream.
pub fn depth(document: &WireDocument) -> u32 {
    let mut wire_depth: FxHashMap<WireId, u32> = FxHashMap::default();

    for gate in &document.gates {
        let layer = gate
            .wires
            .iter()
            .filter_map(|wire| wire_depth.get(wire))
            .copied()
            .max()
            .unwrap_or(0)
            + 1;
        for &wire in &gate.wires {
            wire_depth.insert(wire, layer);
        }
    }

    wire_depth.values().copied().max().unwrap_or(0)
}

/// The smallest qubit count that can hold every referenced wire.
pub fn required_qubits(document: &WireDocument) -> u32 {
    document
        .gates
        .iter()
        .flat_map(|gate| gate.wires.iter())
        .map(|wire| wire.0 + 1)
        .max()
        .unwrap_or(0)
}
