//! Bloch command implementation.

use anyhow::Result;
use console::style;

use qsim_sim::{QubitState, Simulator, SimulatorConfig};

use super::common::load_circuit;

/// Execute the bloch command.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    if circuit.num_qubits() != 1 {
        anyhow::bail!(
            "Bloch vectors are defined for one-qubit programs; {input} has {} qubits",
            circuit.num_qubits()
        );
    }

    let mut sim = Simulator::from_circuit(circuit, SimulatorConfig::new())?;
    let state = QubitState::try_from(sim.run(true)?)?;
    let v = state.bloch_vector();

    println!("{} {}", style("State:").bold(), state);
    println!(
        "{} x = {:+.6}, y = {:+.6}, z = {:+.6}",
        style("Bloch:").bold(),
        v.x,
        v.y,
        v.z
    );
    let (p0, p1) = state.probabilities();
    println!("  P(0) = {p0:.6}, P(1) = {p1:.6}");
    Ok(())
}
