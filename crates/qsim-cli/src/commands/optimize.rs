//! Optimize command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;

use qsim_compile::{OptimizationReport, Rule, optimize};
use qsim_ir::Circuit;

use super::common::load_circuit;

/// Execute the optimize command.
pub fn execute(input: &str, rules: Option<&[String]>, output: Option<&str>) -> Result<()> {
    let circuit = load_circuit(input)?;

    let rules: Vec<Rule> = match rules {
        Some(names) => names
            .iter()
            .map(|name| name.trim().parse::<Rule>())
            .collect::<Result<_, _>>()?,
        None => Rule::DEFAULT_PIPELINE.to_vec(),
    };

    let optimized = optimize(circuit.instructions(), &rules)?;
    let report = OptimizationReport::new(circuit.instructions(), &optimized.instructions);

    let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
    eprintln!(
        "{} Optimized {} with [{}]",
        style("✓").green().bold(),
        style(input).green(),
        names.join(", ")
    );
    eprintln!(
        "  Gates: {} -> {}  Depth: {} -> {}",
        report.original_gate_count,
        report.optimized_gate_count,
        report.original_depth,
        report.optimized_depth
    );
    for (gate, removed) in report.gate_count_reduction.iter().filter(|(_, r)| **r != 0) {
        eprintln!("    {}: {:+}", style(gate).cyan(), -removed);
    }

    let program = Circuit::with_instructions(circuit.num_qubits(), optimized.instructions)?;
    let json = program.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
            eprintln!("  Written to {}", style(path).yellow());
        }
        None => println!("{json}"),
    }

    Ok(())
}
