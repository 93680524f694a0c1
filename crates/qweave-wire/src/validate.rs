//! Local validation of wire-list documents against the execution
//! backend's contract.
//!
//! Unlike [`crate::import`], which repairs what it can and fails fast on
//! the rest, this validator collects every problem in one pass so an
//! editing surface can show the full list, mirroring the verdict the
//! remote validation endpoint would return.

use qweave_circuit::{GateType, WireId};
use rustc_hash::FxHashSet;
use std::fmt;
use thiserror::Error;

use crate::document::{WireDocument, WireGate, WireParam};

/// One problem found in a wire-list document.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Issue {
    /// The gate stream is empty.
    #[error("circuit can not be empty")]
    EmptyCircuit,

    /// Gate name outside the vocabulary.
    #[error("gate #{index}: '{name}' is not recognized or not supported")]
    UnknownGate {
        /// Gate position in the stream.
        index: usize,
        /// The unrecognized name.
        name: String,
    },

    /// Parameter count does not match the gate's schema.
    #[error("gate #{index}: {gate} expects {expected} parameter(s), got {got}")]
    WrongParamCount {
        /// Gate position in the stream.
        index: usize,
        /// Gate name.
        gate: String,
        /// Schema parameter count.
        expected: usize,
        /// Supplied parameter count.
        got: usize,
    },

    /// Wire count does not match the gate's arity.
    #[error("gate #{index}: {gate} expects {expected} wire(s), got {got}")]
    WrongWireCount {
        /// Gate position in the stream.
        index: usize,
        /// Gate name.
        gate: String,
        /// Expected wire count.
        expected: usize,
        /// Supplied wire count.
        got: usize,
    },

    /// Wire index exceeds the declared qubit count.
    #[error("gate #{index}: wire {wire} can not exceed the qubit count {qubit_count}")]
    WireOutOfRange {
        /// Gate position in the stream.
        index: usize,
        /// The offending wire.
        wire: WireId,
        /// Declared qubit count.
        qubit_count: u32,
    },

    /// The same wire appears twice in one gate's wire list.
    #[error("gate #{index}: wire {wire} appears more than once")]
    DuplicateWire {
        /// Gate position in the stream.
        index: usize,
        /// The repeated wire.
        wire: WireId,
    },

    /// A symbolic parameter does not match `input_<n>`.
    #[error("gate #{index}: parameter {param} '{raw}' does not match the input index pattern")]
    BadInputReference {
        /// Gate position in the stream.
        index: usize,
        /// Parameter position within the gate.
        param: usize,
        /// The malformed reference.
        raw: String,
    },

    /// An `input_<n>` reference exceeds the declared variable count.
    #[error("gate #{index}: parameter {param} references input {input}, but only {variables} variable(s) are declared")]
    InputOutOfRange {
        /// Gate position in the stream.
        index: usize,
        /// Parameter position within the gate.
        param: usize,
        /// Referenced input index.
        input: u32,
        /// Declared variable count.
        variables: u32,
    },
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Every problem found, in stream order.
    pub issues: Vec<Issue>,
}

impl Report {
    /// Whether the document passed every check.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("valid");
        }
        for (position, issue) in self.issues.iter().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Check a wire-list document against the execution backend's contract.
pub fn validate(document: &WireDocument) -> Report {
    let mut issues = Vec::new();

    if document.gates.is_empty() {
        issues.push(Issue::EmptyCircuit);
    }

    for (index, gate) in document.gates.iter().enumerate() {
        validate_gate(index, gate, document, &mut issues);
    }

    Report { issues }
}

fn validate_gate(index: usize, gate: &WireGate, document: &WireDocument, issues: &mut Vec<Issue>) {
    let Some(ty) = GateType::parse(&gate.gate) else {
        issues.push(Issue::UnknownGate {
            index,
            name: gate.gate.clone(),
        });
        return;
    };

    let expected_params = ty.params().len();
    if gate.params.len() != expected_params {
        issues.push(Issue::WrongParamCount {
            index,
            gate: ty.name().into(),
            expected: expected_params,
            got: gate.params.len(),
        });
    }

    // Controlled and SWAP types touch two wires on the wire format, every
    // other vocabulary entry exactly one.
    let expected_wires = if ty.requires_control() { 2 } else { 1 };
    if gate.wires.len() != expected_wires {
        issues.push(Issue::WrongWireCount {
            index,
            gate: ty.name().into(),
            expected: expected_wires,
            got: gate.wires.len(),
        });
    }

    let mut seen: FxHashSet<WireId> = FxHashSet::default();
    for &wire in &gate.wires {
        if wire.0 >= document.qubits {
            issues.push(Issue::WireOutOfRange {
                index,
                wire,
                qubit_count: document.qubits,
            });
        }
        if !seen.insert(wire) {
            issues.push(Issue::DuplicateWire { index, wire });
        }
    }

    for (param, value) in gate.params.iter().enumerate() {
        let WireParam::Input(raw) = value else {
            continue;
        };
        match value.input_index() {
            None => issues.push(Issue::BadInputReference {
                index,
                param,
                raw: raw.clone(),
            }),
            Some(input) => {
                if input >= document.variables {
                    issues.push(Issue::InputOutOfRange {
                        index,
                        param,
                        input,
                        variables: document.variables,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(qubits: u32, variables: u32, gates: Vec<WireGate>) -> WireDocument {
        WireDocument {
            qubits,
            variables,
            gates,
        }
    }

    fn entry(gate: &str, wires: Vec<u32>, params: Vec<WireParam>) -> WireGate {
        WireGate {
            gate: gate.into(),
            wires: wires.into_iter().map(WireId).collect(),
            params,
        }
    }

    #[test]
    fn test_valid_document() {
        let report = validate(&doc(
            2,
            2,
            vec![
                entry("H", vec![0], vec![]),
                entry("CNOT", vec![0, 1], vec![]),
                entry("RY", vec![1], vec![WireParam::Number(1.57)]),
            ],
        ));
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "valid");
    }

    #[test]
    fn test_empty_circuit() {
        let report = validate(&doc(2, 2, vec![]));
        assert_eq!(report.issues, vec![Issue::EmptyCircuit]);
    }

    #[test]
    fn test_unknown_gate_skips_further_checks() {
        let report = validate(&doc(2, 2, vec![entry("WARP", vec![0, 0, 0], vec![])]));
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(report.issues[0], Issue::UnknownGate { index: 0, .. }));
    }

    #[test]
    fn test_wrong_param_count() {
        let report = validate(&doc(2, 2, vec![entry("RY", vec![0], vec![])]));
        assert!(report.issues.contains(&Issue::WrongParamCount {
            index: 0,
            gate: "RY".into(),
            expected: 1,
            got: 0,
        }));
    }

    #[test]
    fn test_wrong_wire_count() {
        let report = validate(&doc(2, 2, vec![entry("CNOT", vec![0], vec![])]));
        assert!(report.issues.contains(&Issue::WrongWireCount {
            index: 0,
            gate: "CNOT".into(),
            expected: 2,
            got: 1,
        }));
    }

    #[test]
    fn test_wire_out_of_range_and_duplicate() {
        let report = validate(&doc(2, 2, vec![entry("CNOT", vec![3, 3], vec![])]));
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, Issue::WireOutOfRange { wire: WireId(3), .. })));
        assert!(report
            .issues
            .iter()
            .any(|issue| matches!(issue, Issue::DuplicateWire { wire: WireId(3), .. })));
    }

    #[test]
    fn test_input_reference_checks() {
        let report = validate(&doc(
            2,
            2,
            vec![
                entry("RX", vec![0], vec![WireParam::Input("input_1".into())]),
                entry("RY", vec![0], vec![WireParam::Input("theta_1".into())]),
                entry("RZ", vec![0], vec![WireParam::Input("input_9".into())]),
            ],
        ));

        assert_eq!(report.issues.len(), 2);
        assert!(matches!(
            report.issues[0],
            Issue::BadInputReference { index: 1, param: 0, .. }
        ));
        assert!(matches!(
            report.issues[1],
            Issue::InputOutOfRange {
                index: 2,
                input: 9,
                variables: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_report_lists_every_issue() {
        let report = validate(&doc(
            1,
            1,
            vec![entry("CNOT", vec![0], vec![]), entry("WARP", vec![0], vec![])],
        ));
        assert_eq!(report.issues.len(), 2);
        let rendered = report.to_string();
        assert!(rendered.contains("gate #0"));
        assert!(rendered.contains("gate #1"));
    }
}
