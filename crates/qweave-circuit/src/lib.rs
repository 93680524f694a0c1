//! Qweave Canonical Circuit Model
//!
//! This crate provides the canonical in-memory representation of a quantum
//! circuit as edited in the Qweave designer, and the store that keeps it
//! consistent under arbitrary edits. It is the foundation the wire codecs
//! build on.
//!
//! # Overview
//!
//! A circuit is a grid of qubit wires and gate instances placed at discrete
//! time steps. The [`CircuitStore`] owns the canonical state and exposes
//! the whole mutation surface: fine-grained edits are forgiving (an unknown
//! gate id is a silent no-op, matching the editing UI's render/click
//! races), while bulk replacement from an external document is strict and
//! all-or-nothing.
//!
//! # Core Components
//!
//! - **Vocabulary**: [`GateType`] with per-type [`ParamSpec`] schemas and
//!   [`Shape`] classification
//! - **Wires**: [`WireId`] for addressing horizontal tracks
//! - **Operands**: [`Operands`] tagged variant over plain / controlled /
//!   multi-target shapes
//! - **Instances**: [`Gate`] and the [`Circuit`] aggregate with its
//!   structural invariants
//! - **Store**: [`CircuitStore`] plus the [`derive_inputs`] re-derivation
//!   of the per-wire input-name list
//!
//! # Example: Editing a Circuit
//!
//! ```rust
//! use qweave_circuit::{CircuitStore, GateDraft, GatePatch, GateType, Operands, WireId};
//!
//! let mut store = CircuitStore::with_qubit_count(3);
//!
//! // Place a Hadamard and a CNOT the way a drag from the palette would.
//! store.add_gate(GateDraft::new(GateType::H, Operands::plain(WireId(0))));
//! let cnot = store
//!     .add_gate(
//!         GateDraft::new(GateType::Cnot, Operands::controlled(vec![WireId(0)], WireId(1)))
//!             .at_time_step(1),
//!     )
//!     .id
//!     .clone();
//!
//! // Drag the control wire somewhere else.
//! store.update_gate(&cnot, GatePatch::new().control(vec![WireId(2)]));
//!
//! assert_eq!(store.circuit().gates.len(), 2);
//! assert_eq!(store.inputs(), &["x_0", "x_1", "x_2"]);
//! ```
//!
//! # Invariants
//!
//! [`Circuit::validate`] (run by every bulk replace) guarantees:
//!
//! - every target/control index is in `[0, qubit_count)`
//! - no wire is simultaneously control and target of the same gate
//! - targets are non-empty and mandatory controls are present
//! - gate ids are unique within the circuit

pub mod circuit;
pub mod error;
pub mod gate;
pub mod store;

pub use circuit::{Circuit, Gate, Operands, WireId, fresh_gate_id};
pub use error::{CircuitError, CircuitResult};
pub use gate::{GateType, ParamKind, ParamSpec, Shape};
pub use store::{CircuitStore, DEFAULT_QUBIT_COUNT, GateDraft, GatePatch, derive_inputs};
