//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qsim_ir::Circuit;
use qsim_sim::Counts;
use tracing::debug;

/// Load a program from a JSON interchange file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let circuit =
        Circuit::from_json(&source).with_context(|| format!("Invalid program in {path}"))?;
    debug!(
        "Loaded {}: {} qubits, {} gates",
        path,
        circuit.num_qubits(),
        circuit.num_ops()
    );
    Ok(circuit)
}

/// Print sampled counts as a table with a bar per outcome.
pub fn print_counts(counts: &Counts, shots: usize) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        shots
    );

    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let total = counts.total().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
