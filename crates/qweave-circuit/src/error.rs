//! Error types for the circuit model crate.

use crate::circuit::WireId;
use thiserror::Error;

/// Errors that can occur while building or replacing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// A replacement or imported document failed structural checks.
    #[error("invalid circuit schema{}: {reason}", format_gate_context(.gate))]
    InvalidCircuitSchema {
        /// Index of the offending gate in the document, if any.
        gate: Option<usize>,
        /// What was wrong with it.
        reason: String,
    },

    /// A gate referenced a type absent from the known vocabulary.
    #[error("unknown gate type '{0}'")]
    UnknownGateType(String),

    /// A target or control index fell outside the wire range in a context
    /// where growing the circuit is not permitted.
    #[error("wire {wire} out of range for {qubit_count} qubit(s){}", format_gate_context(.gate))]
    OutOfRangeWire {
        /// The offending wire index.
        wire: WireId,
        /// The qubit count it was checked against.
        qubit_count: u32,
        /// Index of the offending gate, if any.
        gate: Option<usize>,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<usize>) -> String {
    match gate {
        Some(index) => format!(" (gate #{index})"),
        None => String::new(),
    }
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_gate_context() {
        let err = CircuitError::InvalidCircuitSchema {
            gate: Some(2),
            reason: "empty target".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid circuit schema (gate #2): empty target"
        );

        let err = CircuitError::OutOfRangeWire {
            wire: WireId(7),
            qubit_count: 4,
            gate: None,
        };
        assert_eq!(err.to_string(), "wire q7 out of range for 4 qubit(s)");
    }

    #[test]
    fn test_unknown_gate_type_message() {
        let err = CircuitError::UnknownGateType("FLUX".into());
        assert_eq!(err.to_string(), "unknown gate type 'FLUX'");
    }
}
