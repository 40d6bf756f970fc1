//! Run command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use qsim_sim::{CircuitInfo, Counts, Representation, Simulator, SimulatorConfig};

use super::common::{load_circuit, print_counts};

/// Amplitudes below this magnitude are left out of the table.
const PRINT_THRESHOLD: f64 = 1e-10;

#[derive(Serialize)]
struct RunOutput<'a> {
    circuit_info: &'a CircuitInfo,
    amplitudes: Vec<[f64; 2]>,
    probabilities: Vec<f64>,
    counts: &'a Counts,
}

/// Execute the run command.
pub fn execute(
    input: &str,
    shots: usize,
    optimize: bool,
    representation: Option<&str>,
    seed: Option<u64>,
    format: &str,
) -> Result<()> {
    let circuit = load_circuit(input)?;

    let mut config = SimulatorConfig::new();
    if let Some(name) = representation {
        config = config.with_representation(name.parse::<Representation>()?);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut sim = Simulator::from_circuit(circuit, config)?;
    let info = sim.circuit_info();
    let state = sim.run(optimize)?.clone();
    let counts = sim.measure(shots)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let output = RunOutput {
                circuit_info: &info,
                amplitudes: state.amplitudes().iter().map(|a| [a.re, a.im]).collect(),
                probabilities: state.probabilities(),
                counts: &counts,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "table" => {
            println!(
                "{} Running {} ({} qubits, {} gates, depth {}, {})",
                style("→").cyan().bold(),
                style(input).green(),
                info.qubit_count,
                info.gate_count,
                info.depth,
                style(info.representation_policy).yellow()
            );
            if optimize {
                let report = sim.optimization_report()?;
                println!(
                    "  Optimized: {} -> {} gates, depth {} -> {}",
                    report.original_gate_count,
                    report.optimized_gate_count,
                    report.original_depth,
                    report.optimized_depth
                );
            }

            println!("\n  Amplitudes:");
            for (index, amp) in state.amplitudes().iter().enumerate() {
                if amp.norm() < PRINT_THRESHOLD {
                    continue;
                }
                println!(
                    "  |{}⟩  {:>+.6} {:>+.6}i  p={:.6}",
                    style(state.bitstring(index)).cyan(),
                    amp.re,
                    amp.im,
                    amp.norm_sqr()
                );
            }

            print_counts(&counts, shots);
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}
