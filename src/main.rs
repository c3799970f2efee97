//! CircuitSim - schematic resistance calculator
//!
//! Loads a schematic file and reports the resistance seen by its voltage
//! source, along with the current drawn from it.
//!
//! # Usage
//!
//! ```bash
//! circuitsim divider.sch
//! circuitsim divider.sch --trace -vv
//! ```

use std::path::PathBuf;

use clap::Parser;
use circuitsim_core::{
    circuit::{validate_circuit, Circuit},
    dsl,
    error::Result,
    solver::Console,
    units::format_value,
    ResistanceSolver, SolverConfig,
};
use tracing::Level;

/// Equivalent resistance of a schematic, as seen by its voltage source
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the schematic file (.sch)
    #[arg(value_name = "SCHEMATIC_FILE")]
    schematic_file: PathBuf,

    /// Print every traversal step
    #[arg(long)]
    trace: bool,

    /// Skip parallel branches at or below this resistance (ohms)
    #[arg(long, value_name = "OHMS", default_value_t = 0.0)]
    min_branch: f64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // Parse the schematic file
    let ast = dsl::parse_file(&args.schematic_file)?;

    // Build the circuit
    let circuit = Circuit::from_ast(ast)?;
    circuit.log_wires();

    // Validate
    for warning in validate_circuit(&circuit)? {
        eprintln!("warning: {}", warning);
    }

    // Solve
    let config = SolverConfig::new()
        .with_trace_visits(args.trace)
        .with_min_branch_resistance(args.min_branch);
    let solver = ResistanceSolver::with_config(config);
    let mut console = Console::new();
    let report = solver.analyze_with(&circuit, &mut console)?;

    for message in console.messages() {
        println!("{}", message);
    }

    if let Some(title) = &circuit.title {
        println!("{}", title);
    }
    println!("Source {} ({})", report.source, format_value(report.source_voltage, "V"));
    println!("Equivalent resistance: {}", format_value(report.resistance, "Ω"));
    match report.source_current {
        Some(current) => println!("Source current: {}", format_value(current, "A")),
        None => println!("Source current: unbounded (short circuit)"),
    }

    Ok(())
}
