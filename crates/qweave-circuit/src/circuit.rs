//! Canonical circuit representation: wires, operands, gates, aggregate.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CircuitError, CircuitResult};
use crate::gate::GateType;

/// Index of one horizontal wire (qubit track) in the circuit diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for WireId {
    fn from(index: u32) -> Self {
        WireId(index)
    }
}

impl From<usize> for WireId {
    fn from(index: usize) -> Self {
        WireId(u32::try_from(index).expect("WireId overflow: exceeds u32::MAX"))
    }
}

/// Wire operands of a gate, grouped by shape class.
///
/// A closed variant rather than a pair of optional lists, so that "has a
/// control set" and "spans several targets" are facts of the type instead
/// of conventions on empty vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operands {
    /// Uncontrolled gate on a single wire.
    Plain {
        /// The acted-on wire.
        target: WireId,
    },
    /// Control wires gating a single target wire.
    Controlled {
        /// Wires whose state gates the operation.
        control: Vec<WireId>,
        /// The acted-on wire.
        target: WireId,
    },
    /// Several acted-on wires (SWAP), optionally gated.
    MultiTarget {
        /// Wires whose state gates the operation (may be empty).
        control: Vec<WireId>,
        /// The acted-on wires.
        targets: Vec<WireId>,
    },
}

impl Operands {
    /// Uncontrolled single-wire operands.
    pub fn plain(target: WireId) -> Self {
        Operands::Plain { target }
    }

    /// Controlled single-target operands.
    pub fn controlled(control: Vec<WireId>, target: WireId) -> Self {
        Operands::Controlled { control, target }
    }

    /// Classify raw control/target lists into the matching variant.
    ///
    /// `multi_target` comes from the gate type ([`GateType::multi_target`]);
    /// multi-target types always take the [`Operands::MultiTarget`] variant
    /// so an imported SWAP keeps both swapped wires addressable. Empty or
    /// oversized target lists on single-target types also fall back to
    /// `MultiTarget` — classification never fails; [`Circuit::validate`]
    /// rejects the structurally impossible cases.
    pub fn from_parts(control: Vec<WireId>, targets: Vec<WireId>, multi_target: bool) -> Self {
        if !multi_target && targets.len() == 1 {
            let target = targets[0];
            if control.is_empty() {
                Operands::Plain { target }
            } else {
                Operands::Controlled { control, target }
            }
        } else {
            Operands::MultiTarget { control, targets }
        }
    }

    /// The control wires (empty slice for plain gates).
    pub fn control(&self) -> &[WireId] {
        match self {
            Operands::Plain { .. } => &[],
            Operands::Controlled { control, .. } | Operands::MultiTarget { control, .. } => control,
        }
    }

    /// The acted-on (non-control) wires.
    pub fn targets(&self) -> &[WireId] {
        match self {
            Operands::Plain { target } | Operands::Controlled { target, .. } => {
                std::slice::from_ref(target)
            }
            Operands::MultiTarget { targets, .. } => targets,
        }
    }

    /// All touched wires in the fixed wire-list convention: control first,
    /// then targets, each sub-order preserved.
    pub fn wires(&self) -> Vec<WireId> {
        let mut wires = Vec::with_capacity(self.control().len() + self.targets().len());
        wires.extend_from_slice(self.control());
        wires.extend_from_slice(self.targets());
        wires
    }

    /// Highest wire index touched, if any wire is touched at all.
    pub fn max_wire(&self) -> Option<WireId> {
        self.control().iter().chain(self.targets()).copied().max()
    }
}

/// A single gate instance placed on the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Unique id within the circuit, generated when absent.
    pub id: String,
    /// Gate type.
    pub ty: GateType,
    /// Wire operands.
    pub operands: Operands,
    /// Positional parameters (see [`GateType::params`] for the schema).
    pub params: Vec<f64>,
    /// Column position; execution order comes from this, not list order.
    pub time_step: u32,
}

impl Gate {
    /// Create a gate with a freshly generated id.
    pub fn new(ty: GateType, operands: Operands, params: Vec<f64>, time_step: u32) -> Self {
        Self::with_id(fresh_gate_id(), ty, operands, params, time_step)
    }

    /// Create a gate with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        ty: GateType,
        operands: Operands,
        params: Vec<f64>,
        time_step: u32,
    ) -> Self {
        Self {
            id: id.into(),
            ty,
            operands,
            params,
            time_step,
        }
    }
}

/// Generate a fresh unique gate id.
pub fn fresh_gate_id() -> String {
    Uuid::new_v4().to_string()
}

/// The root circuit aggregate.
///
/// Gate list order is insertion order — preserved for stable identity in
/// editing surfaces, not meaningful for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of wires; always ≥ the highest referenced index + 1.
    pub qubit_count: u32,
    /// Number of free classical input variables.
    pub variable_count: u32,
    /// Gate instances, in insertion order.
    pub gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(qubit_count: u32, variable_count: u32) -> Self {
        Self {
            qubit_count,
            variable_count,
            gates: Vec::new(),
        }
    }

    /// Look up a gate by id.
    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|gate| gate.id == id)
    }

    /// The smallest qubit count that can hold every referenced wire,
    /// `max(all wire indices) + 1`; zero for an empty gate list.
    pub fn required_qubit_count(&self) -> u32 {
        self.gates
            .iter()
            .filter_map(|gate| gate.operands.max_wire())
            .map(|wire| wire.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check every structural invariant, reporting the first violation.
    ///
    /// This is the all-or-nothing gate used by bulk replace: wire ranges,
    /// control/target disjointness, non-empty targets, mandatory controls,
    /// and gate-id uniqueness.
    pub fn validate(&self) -> CircuitResult<()> {
        if self.qubit_count == 0 {
            return Err(CircuitError::InvalidCircuitSchema {
                gate: None,
                reason: "qubit count must be at least 1".into(),
            });
        }

        let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
        for (index, gate) in self.gates.iter().enumerate() {
            if !seen_ids.insert(gate.id.as_str()) {
                return Err(CircuitError::InvalidCircuitSchema {
                    gate: Some(index),
                    reason: format!("duplicate gate id '{}'", gate.id),
                });
            }

            let targets = gate.operands.targets();
            if targets.is_empty() {
                return Err(CircuitError::InvalidCircuitSchema {
                    gate: Some(index),
                    reason: "empty target".into(),
                });
            }

            if gate.ty.requires_control() && gate.operands.control().is_empty() {
                return Err(CircuitError::InvalidCircuitSchema {
                    gate: Some(index),
                    reason: format!("gate type {} requires a control wire", gate.ty),
                });
            }

            for &wire in gate.operands.control().iter().chain(targets) {
                if wire.0 >= self.qubit_count {
                    return Err(CircuitError::OutOfRangeWire {
                        wire,
                        qubit_count: self.qubit_count,
                        gate: Some(index),
                    });
                }
            }

            let target_set: FxHashSet<WireId> = targets.iter().copied().collect();
            if let Some(&wire) = gate
                .operands
                .control()
                .iter()
                .find(|wire| target_set.contains(*wire))
            {
                return Err(CircuitError::InvalidCircuitSchema {
                    gate: Some(index),
                    reason: format!("wire {wire} is both control and target"),
                });
            }
        }

        Ok(())
    }
}
