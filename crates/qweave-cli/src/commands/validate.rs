//! Validate command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;
use tracing::debug;

use qweave_wire::{ImportOptions, WireDocument, import_str, validate, wire_list};

/// Execute the validate command.
///
/// Strict wire-list documents are checked as-is; anything else goes
/// through the import repair first and is checked in its exported form.
pub fn execute(input: &str) -> Result<()> {
    if !Path::new(input).exists() {
        anyhow::bail!("File not found: {}", input);
    }
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {input}"))?;

    let document = match serde_json::from_str::<WireDocument>(&text) {
        Ok(document) => document,
        Err(_) => {
            debug!("not a strict wire-list document, repairing first");
            let circuit = import_str(&text, &ImportOptions::default())
                .with_context(|| format!("Failed to import circuit from {input}"))?;
            println!(
                "  {} document normalized through import repair",
                style("·").dim()
            );
            wire_list(&circuit)
        }
    };

    let report = validate(&document);
    if report.is_valid() {
        println!(
            "{} {} is valid ({} qubits, {} gates)",
            style("✓").green().bold(),
            style(input).green(),
            document.qubits,
            document.gates.len()
        );
        return Ok(());
    }

    println!(
        "{} {} failed validation:",
        style("✗").red().bold(),
        style(input).red()
    );
    for issue in &report.issues {
        println!("  - {issue}");
    }
    anyhow::bail!("{} issue(s) found", report.issues.len());
}
