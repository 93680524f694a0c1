//! Convert command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use tracing::debug;

use qweave_wire::{ExportFormat, export};

use super::load_circuit;

/// Execute the convert command.
pub fn execute(input: &str, output: Option<&str>, format: ExportFormat) -> Result<()> {
    println!(
        "{} Converting {}",
        style("→").cyan().bold(),
        style(input).green(),
    );

    let circuit = load_circuit(input)?;
    println!(
        "  Loaded: {} qubits, {} gates",
        circuit.qubit_count,
        circuit.gates.len()
    );

    let value = export(&circuit, format);
    let rendered = serde_json::to_string_pretty(&value).context("Failed to render JSON")?;
    debug!(bytes = rendered.len(), "rendered document");

    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Failed to write {path}"))?;
            println!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(path).green()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
