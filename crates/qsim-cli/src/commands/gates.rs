//! Gates command implementation.

use console::style;
use qsim_ir::StandardGate;

/// Execute the gates command.
pub fn execute() {
    println!("{}", style("Gate library:").bold());
    for info in StandardGate::catalog() {
        let params = if info.params.is_empty() {
            String::new()
        } else {
            format!("({})", info.params.join(", "))
        };
        println!(
            "  {:<10} {} qubit{}  {}",
            style(format!("{}{}", info.name, params)).cyan(),
            info.num_qubits,
            if info.num_qubits == 1 { " " } else { "s" },
            style(info.description).dim()
        );
    }
}
