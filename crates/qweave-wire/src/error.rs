//! Error types for the wire codec crate.

use qweave_circuit::CircuitError;
use thiserror::Error;

/// Errors that can occur while converting circuit documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WireError {
    /// Structural failure in the circuit model layer.
    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),

    /// The input text was not JSON at all.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for codec operations.
pub type WireResult<T> = Result<T, WireError>;
