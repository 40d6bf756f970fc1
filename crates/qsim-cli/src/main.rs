//! qsim Command-Line Interface
//!
//! Loads programs in the JSON interchange format and drives the simulator.
//!
//! ```text
//! qsim run -i bell.json -s 1000
//! qsim optimize -i program.json --rules cancel_inverse,merge_rotations
//! qsim gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{bloch, gates, optimize, run, version};

/// qsim - classical quantum circuit simulation
#[derive(Parser)]
#[command(name = "qsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a program and sample it
    Run {
        /// Input file (JSON interchange format)
        #[arg(short, long)]
        input: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: usize,

        /// Run the program as written, without the optimizer
        #[arg(long)]
        no_optimize: bool,

        /// Representation (dense, sparse, tensor); chosen from the register size if omitted
        #[arg(short, long)]
        representation: Option<String>,

        /// Sampler seed
        #[arg(long, env = "QSIM_SEED")]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Optimize a program and report what changed
    Optimize {
        /// Input file (JSON interchange format)
        #[arg(short, long)]
        input: String,

        /// Comma-separated rules, in order
        #[arg(long, value_delimiter = ',')]
        rules: Option<Vec<String>>,

        /// Write the optimized program here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the gate library
    Gates,

    /// Print the Bloch vector of a one-qubit program
    Bloch {
        /// Input file (JSON interchange format)
        #[arg(short, long)]
        input: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            shots,
            no_optimize,
            representation,
            seed,
            format,
        } => run::execute(
            &input,
            shots,
            !no_optimize,
            representation.as_deref(),
            seed,
            &format,
        ),

        Commands::Optimize {
            input,
            rules,
            output,
        } => optimize::execute(&input, rules.as_deref(), output.as_deref()),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Bloch { input } => bloch::execute(&input),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
