//! Gate vocabulary and per-type parameter schemas.
//!
//! [`GateType`] is the closed set of operations the editor and the wire
//! formats agree on. Every other component (store, codec, validator) keys
//! off the schema accessors here, so the lookup is total over the
//! vocabulary by construction.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Whether a parameter takes continuous values or whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free real value within `[min, max]`, edited in `step` increments.
    Continuous,
    /// Whole-number value (e.g. a repetition count).
    Integer,
}

/// Declared positional parameter of a gate type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable key (`"theta"`, `"phi"`, ...).
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Value used when a document omits this parameter.
    pub default: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Editing increment.
    pub step: f64,
    /// Continuous or integer.
    pub kind: ParamKind,
}

const THETA: ParamSpec = ParamSpec {
    key: "theta",
    label: "θ (rad)",
    default: 0.0,
    min: 0.0,
    max: TAU,
    step: 0.01,
    kind: ParamKind::Continuous,
};

const PHI: ParamSpec = ParamSpec {
    key: "phi",
    label: "φ (rad)",
    default: 0.0,
    min: 0.0,
    max: TAU,
    step: 0.01,
    kind: ParamKind::Continuous,
};

const LAMBDA: ParamSpec = ParamSpec {
    key: "lambda",
    label: "λ (rad)",
    default: 0.0,
    min: 0.0,
    max: TAU,
    step: 0.01,
    kind: ParamKind::Continuous,
};

const COUNT: ParamSpec = ParamSpec {
    key: "count",
    label: "Repetitions",
    default: 1.0,
    min: 1.0,
    max: 10.0,
    step: 1.0,
    kind: ParamKind::Integer,
};

const NO_PARAMS: &[ParamSpec] = &[];
const ROTATION_PARAMS: &[ParamSpec] = &[THETA];
const PHASE_PARAMS: &[ParamSpec] = &[THETA];
const U1_PARAMS: &[ParamSpec] = &[LAMBDA];
const U2_PARAMS: &[ParamSpec] = &[PHI, LAMBDA];
const U3_PARAMS: &[ParamSpec] = &[THETA, PHI, LAMBDA];

/// Shape class of a gate type, used to pick the operand variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Uncontrolled gate on a single wire.
    Plain,
    /// Control wires gating a single target wire.
    Controlled,
    /// Gate spanning several acted-on wires (SWAP).
    MultiTarget,
}

/// The closed gate vocabulary.
///
/// Serialized spelling is the canonical uppercase name (`"CNOT"`, `"RX"`),
/// which is also what the wire formats carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateType {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Rotation around the X axis.
    Rx,
    /// Rotation around the Y axis.
    Ry,
    /// Rotation around the Z axis.
    Rz,
    /// Controlled-NOT gate.
    Cnot,
    /// Controlled-Z gate.
    Cz,
    /// SWAP gate.
    Swap,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Phase gate.
    Phase,
    /// U1 gate (single-axis phase).
    U1,
    /// U2 gate U2(φ, λ).
    U2,
    /// Universal single-qubit gate U3(θ, φ, λ).
    U3,
}

impl GateType {
    /// Every known gate type, in palette order.
    pub const ALL: &'static [GateType] = &[
        GateType::H,
        GateType::X,
        GateType::Y,
        GateType::Z,
        GateType::Rx,
        GateType::Ry,
        GateType::Rz,
        GateType::Cnot,
        GateType::Cz,
        GateType::Swap,
        GateType::S,
        GateType::T,
        GateType::Phase,
        GateType::U1,
        GateType::U2,
        GateType::U3,
    ];

    /// Canonical uppercase name used on the wire.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateType::H => "H",
            GateType::X => "X",
            GateType::Y => "Y",
            GateType::Z => "Z",
            GateType::Rx => "RX",
            GateType::Ry => "RY",
            GateType::Rz => "RZ",
            GateType::Cnot => "CNOT",
            GateType::Cz => "CZ",
            GateType::Swap => "SWAP",
            GateType::S => "S",
            GateType::T => "T",
            GateType::Phase => "PHASE",
            GateType::U1 => "U1",
            GateType::U2 => "U2",
            GateType::U3 => "U3",
        }
    }

    /// Display label shown in editing surfaces.
    pub fn label(&self) -> &'static str {
        // Names double as labels for this vocabulary.
        self.name()
    }

    /// Parse a gate identifier, case-insensitively.
    ///
    /// Returns `None` for anything outside the vocabulary — callers decide
    /// whether that is a hard failure (import) or a soft one (rendering).
    pub fn parse(name: &str) -> Option<GateType> {
        let upper = name.trim().to_ascii_uppercase();
        GateType::ALL.iter().copied().find(|ty| ty.name() == upper)
    }

    /// Declared positional parameter schema.
    #[inline]
    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            GateType::H
            | GateType::X
            | GateType::Y
            | GateType::Z
            | GateType::Cnot
            | GateType::Cz
            | GateType::Swap
            | GateType::S
            | GateType::T => NO_PARAMS,
            GateType::Rx | GateType::Ry | GateType::Rz => ROTATION_PARAMS,
            GateType::Phase => PHASE_PARAMS,
            GateType::U1 => U1_PARAMS,
            GateType::U2 => U2_PARAMS,
            GateType::U3 => U3_PARAMS,
        }
    }

    /// Default parameter values, in schema order.
    pub fn default_params(&self) -> Vec<f64> {
        self.params().iter().map(|spec| spec.default).collect()
    }

    /// Whether the type must carry at least one control wire.
    #[inline]
    pub fn requires_control(&self) -> bool {
        matches!(self, GateType::Cnot | GateType::Cz | GateType::Swap)
    }

    /// Whether the type acts on more than one target wire.
    #[inline]
    pub fn multi_target(&self) -> bool {
        matches!(self, GateType::Swap)
    }

    /// Shape class of this type.
    #[inline]
    pub fn shape(&self) -> Shape {
        if self.multi_target() {
            Shape::MultiTarget
        } else if self.requires_control() {
            Shape::Controlled
        } else {
            Shape::Plain
        }
    }

    /// Whether export may expand a `(count, angle)` parameter pair into
    /// repeated single-angle instances.
    #[inline]
    pub fn expandable(&self) -> bool {
        matches!(self, GateType::Rx | GateType::Ry | GateType::Rz)
    }

    /// The optional repetition count expandable rotation gates accept
    /// ahead of their angle.
    ///
    /// Not part of [`params`](Self::params): a single-entry parameter list
    /// is always the angle alone, and only a two-entry list is read as
    /// `(count, angle)`.
    pub fn count_param(&self) -> Option<&'static ParamSpec> {
        self.expandable().then_some(&COUNT)
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
