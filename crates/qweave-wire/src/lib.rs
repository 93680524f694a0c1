//! Wire-Format Codecs for Qweave Circuits
//!
//! This crate converts between the canonical circuit model of
//! [`qweave_circuit`] and the JSON documents that cross the process
//! boundary: the flat wire-list shape the execution backend consumes, the
//! canonical snapshot used for lossless round-trips, and the free-form
//! documents users upload or paste.
//!
//! # Directions
//!
//! | Direction | Entry point | Character |
//! |-----------|-------------|-----------|
//! | canonical → wire-list | [`wire_list`] | pure, expands repeated rotations |
//! | canonical → snapshot | [`snapshot`] | pure, lossless |
//! | external JSON → canonical | [`import`] / [`import_str`] | repairs, then validates |
//! | wire-list → verdict | [`validate`] | collects every contract violation |
//!
//! All transforms are stateless; the only "state machine" is the validity
//! gate itself: unvalidated JSON either becomes a canonical circuit or is
//! rejected with a reason, never half of each.
//!
//! # Example: Export
//!
//! ```rust
//! use qweave_circuit::{CircuitStore, GateDraft, GateType, Operands, WireId};
//! use qweave_wire::wire_list;
//!
//! let mut store = CircuitStore::with_qubit_count(2);
//! store.add_gate(GateDraft::new(GateType::H, Operands::plain(WireId(0))));
//! store.add_gate(
//!     GateDraft::new(GateType::Cnot, Operands::controlled(vec![WireId(0)], WireId(1)))
//!         .at_time_step(1),
//! );
//!
//! let document = wire_list(store.circuit());
//! assert_eq!(document.qubits, 2);
//! // Control wires come first in the wire list.
//! assert_eq!(document.gates[1].wires, vec![WireId(0), WireId(1)]);
//! ```
//!
//! # Example: Import with Repair
//!
//! ```rust
//! use qweave_wire::{ImportOptions, import_str};
//!
//! let circuit = import_str(
//!     r#"{"qubits": 2, "gates": [{"type": "cnot", "target": [1], "timeStep": 0}]}"#,
//!     &ImportOptions::default(),
//! )
//! .unwrap();
//!
//! let gate = &circuit.gates[0];
//! assert_eq!(gate.ty.name(), "CNOT"); // case-normalized
//! assert_eq!(gate.operands.control().len(), 1); // control backfilled
//! ```

pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod metrics;
pub mod validate;

pub use document::{ExportFormat, Snapshot, SnapshotGate, WireDocument, WireGate, WireParam};
pub use error::{WireError, WireResult};
pub use export::{export, snapshot, wire_list};
pub use import::{ImportOptions, import, import_str};
pub use metrics::{depth, required_qubits};
pub use validate::{Issue, Report, validate};
