//! Inspect command implementation.

use anyhow::Result;
use console::style;
use std::collections::BTreeMap;

use qweave_wire::{depth, wire_list};

use super::load_circuit;

/// Execute the inspect command.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    let document = wire_list(&circuit);

    println!("{} {}", style("Circuit").bold(), style(input).green());
    println!("  qubits:    {}", circuit.qubit_count);
    println!("  variables: {}", circuit.variable_count);
    println!("  gates:     {}", circuit.gates.len());
    println!("  emitted:   {} (after rotation expansion)", document.gates.len());
    println!("  depth:     {}", depth(&document));

    let mut histogram: BTreeMap<&'static str, usize> = BTreeMap::new();
    for gate in &circuit.gates {
        *histogram.entry(gate.ty.name()).or_default() += 1;
    }
    if !histogram.is_empty() {
        println!("  by type:");
        for (name, count) in histogram {
            println!("    {name:<6} {count}");
        }
    }

    Ok(())
}
