//! CLI command implementations.

pub mod convert;
pub mod inspect;
pub mod validate;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use qweave_circuit::Circuit;
use qweave_wire::{ImportOptions, import_str};

/// Load and repair a circuit document from any accepted JSON shape.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {}", path);
    }

    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    import_str(&text, &ImportOptions::default())
        .with_context(|| format!("Failed to import circuit from {path}"))
}
