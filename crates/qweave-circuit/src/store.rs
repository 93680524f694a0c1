//! Editing store: the single owner of canonical circuit state.
//!
//! Every editing surface reads and writes through a [`CircuitStore`]
//! handle passed to it explicitly — there is no module-level singleton.
//! Fine-grained mutations are forgiving (unknown ids are silent no-ops);
//! bulk replacement is strict and all-or-nothing.

use crate::circuit::{Circuit, Gate, Operands, WireId, fresh_gate_id};
use crate::error::{CircuitError, CircuitResult};
use crate::gate::GateType;

/// Wire count a fresh store starts with.
pub const DEFAULT_QUBIT_COUNT: u32 = 5;

/// A gate about to be added: everything a [`Gate`] carries, with the id
/// optional. Params default to the type's schema defaults.
#[derive(Debug, Clone)]
pub struct GateDraft {
    /// Reuse an id minted earlier (e.g. during a drag), or take a fresh one.
    pub id: Option<String>,
    /// Gate type.
    pub ty: GateType,
    /// Wire operands.
    pub operands: Operands,
    /// Positional parameters.
    pub params: Vec<f64>,
    /// Column position.
    pub time_step: u32,
}

impl GateDraft {
    /// Draft at time step 0 with schema-default parameters.
    pub fn new(ty: GateType, operands: Operands) -> Self {
        Self {
            id: None,
            ty,
            operands,
            params: ty.default_params(),
            time_step: 0,
        }
    }

    /// Set an explicit id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Place at a time step.
    #[must_use]
    pub fn at_time_step(mut self, time_step: u32) -> Self {
        self.time_step = time_step;
        self
    }
}

/// Partial update applied to an existing gate; unset fields are retained.
#[derive(Debug, Clone, Default)]
pub struct GatePatch {
    /// Change the gate type.
    pub ty: Option<GateType>,
    /// Replace the control wires.
    pub control: Option<Vec<WireId>>,
    /// Replace the target wires.
    pub targets: Option<Vec<WireId>>,
    /// Replace the parameters.
    pub params: Option<Vec<f64>>,
    /// Move to another time step.
    pub time_step: Option<u32>,
}

impl GatePatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the control wires.
    #[must_use]
    pub fn control(mut self, control: Vec<WireId>) -> Self {
        self.control = Some(control);
        self
    }

    /// Replace the target wires.
    #[must_use]
    pub fn targets(mut self, targets: Vec<WireId>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Replace the parameters.
    #[must_use]
    pub fn params(mut self, params: Vec<f64>) -> Self {
        self.params = Some(params);
        self
    }

    /// Change the gate type.
    #[must_use]
    pub fn ty(mut self, ty: GateType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Move to another time step.
    #[must_use]
    pub fn time_step(mut self, time_step: u32) -> Self {
        self.time_step = Some(time_step);
        self
    }
}

/// Single source of truth for circuit state.
#[derive(Debug, Clone)]
pub struct CircuitStore {
    circuit: Circuit,
    /// Input variable names, one per wire, resized with the qubit count.
    inputs: Vec<String>,
}

impl CircuitStore {
    /// Store with the default wire count.
    pub fn new() -> Self {
        Self::with_qubit_count(DEFAULT_QUBIT_COUNT)
    }

    /// Store with an explicit wire count; the variable count starts in
    /// sync with it.
    pub fn with_qubit_count(qubit_count: u32) -> Self {
        Self {
            circuit: Circuit::new(qubit_count, qubit_count),
            inputs: derive_inputs(&[], qubit_count),
        }
    }

    /// The canonical circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Input variable names derived from the qubit count.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Append a gate, assigning a fresh unique id when the draft has none.
    ///
    /// No structural validation happens here: initial operands and params
    /// are derived from the gate-type schema by the calling surface.
    pub fn add_gate(&mut self, draft: GateDraft) -> &Gate {
        let id = draft.id.unwrap_or_else(fresh_gate_id);
        self.circuit.gates.push(Gate::with_id(
            id,
            draft.ty,
            draft.operands,
            draft.params,
            draft.time_step,
        ));
        self.circuit
            .gates
            .last()
            .expect("gate was pushed just above")
    }

    /// Merge a patch into the gate matching `id`.
    ///
    /// Returns `false` (and changes nothing) when the id is unknown — a
    /// render/click race, not an error. Unset patch fields keep their
    /// previous values; operands are re-classified from the merged
    /// control/target lists.
    pub fn update_gate(&mut self, id: &str, patch: GatePatch) -> bool {
        let Some(gate) = self.circuit.gates.iter_mut().find(|gate| gate.id == id) else {
            return false;
        };

        if let Some(ty) = patch.ty {
            gate.ty = ty;
        }
        if patch.control.is_some() || patch.targets.is_some() {
            let control = patch
                .control
                .unwrap_or_else(|| gate.operands.control().to_vec());
            let targets = patch
                .targets
                .unwrap_or_else(|| gate.operands.targets().to_vec());
            gate.operands = Operands::from_parts(control, targets, gate.ty.multi_target());
        }
        if let Some(params) = patch.params {
            gate.params = params;
        }
        if let Some(time_step) = patch.time_step {
            gate.time_step = time_step;
        }
        true
    }

    /// Delete the gate matching `id`; silent no-op when absent.
    pub fn remove_gate(&mut self, id: &str) -> bool {
        let before = self.circuit.gates.len();
        self.circuit.gates.retain(|gate| gate.id != id);
        self.circuit.gates.len() != before
    }

    /// Bulk-overwrite the circuit from an externally supplied document.
    ///
    /// All-or-nothing: the replacement is validated first and on failure
    /// the prior state is left untouched. Input names are re-derived for
    /// the new qubit count after the commit.
    pub fn replace_circuit(&mut self, circuit: Circuit) -> CircuitResult<()> {
        circuit.validate()?;
        self.circuit = circuit;
        self.inputs = derive_inputs(&self.inputs, self.circuit.qubit_count);
        Ok(())
    }

    /// Resize the wire count.
    ///
    /// A downsize below what the existing gates reference is rejected
    /// rather than auto-corrected; gates are never silently relocated.
    pub fn set_qubit_count(&mut self, qubit_count: u32) -> CircuitResult<()> {
        if qubit_count == 0 {
            return Err(CircuitError::InvalidCircuitSchema {
                gate: None,
                reason: "qubit count must be at least 1".into(),
            });
        }
        let required = self.circuit.required_qubit_count();
        if qubit_count < required {
            let max_wire = WireId(required - 1);
            return Err(CircuitError::OutOfRangeWire {
                wire: max_wire,
                qubit_count,
                gate: None,
            });
        }
        self.circuit.qubit_count = qubit_count;
        self.inputs = derive_inputs(&self.inputs, qubit_count);
        Ok(())
    }

    /// Set the free-variable count.
    pub fn set_variable_count(&mut self, variable_count: u32) {
        self.circuit.variable_count = variable_count;
    }
}

impl Default for CircuitStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-derive the input-name list for a new qubit count.
///
/// Growing appends `x_<index>` placeholders; shrinking truncates from the
/// end; existing names are preserved. Called synchronously after every
/// qubit-count change.
pub fn derive_inputs(previous: &[String], qubit_count: u32) -> Vec<String> {
    let count = qubit_count as usize;
    let mut inputs: Vec<String> = previous.iter().take(count).cloned().collect();
    for index in inputs.len()..count {
        inputs.push(format!("x_{index}"));
    }
    inputs
}
