//! # CircuitSim Core
//!
//! Schematic graph and DC resistance solver for the CircuitSim editor.
//!
//! This library provides:
//! - An arena-based schematic graph of components, terminals and wires
//! - A text format for saving and loading schematics
//! - A series/parallel solver for the resistance seen by a voltage source
//! - Diagnostics for every traversal step, delivered to a pluggable sink
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the schematic description language
//! - [`circuit`] - Circuit graph representation and validation
//! - [`components`] - Component models (resistor, voltage source, generic device)
//! - [`solver`] - Equivalent resistance by series/parallel folding
//! - [`units`] - Engineering notation for reported values
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! circuitsim divider.sch --trace
//! ```
//!
//! ### Library
//!
//! ```
//! use circuitsim_core::{Circuit, ResistanceSolver};
//!
//! let mut circuit = Circuit::new();
//! circuit.add_voltage_source("V1", 5.0)?;
//! circuit.add_resistor("R1", 10.0)?;
//!
//! let pos = circuit.find_terminal("V1:pos").unwrap();
//! let neg = circuit.find_terminal("V1:neg").unwrap();
//! let a = circuit.find_terminal("R1:a").unwrap();
//! let b = circuit.find_terminal("R1:b").unwrap();
//! circuit.connect("W1", &[pos, a])?;
//! circuit.connect("W2", &[b, neg])?;
//!
//! let ohms = ResistanceSolver::new().solve(&circuit)?;
//! assert_eq!(ohms, 10.0);
//! # Ok::<(), circuitsim_core::CircuitSimError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmResistanceSolver } from 'circuitsim_core';
//!
//! const solver = new WasmResistanceSolver(schematicText);
//! console.log(solver.equivalent_resistance());
//! ```

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod solver;
pub mod units;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{CircuitSimError, Result};
pub use solver::{ResistanceSolver, SolveReport, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmResistanceSolver;

/// Parse, build and validate a schematic from DSL text.
///
/// Validation warnings are logged and otherwise ignored.
pub fn load_schematic(input: &str) -> Result<Circuit> {
    let ast = dsl::parse(input)?;
    let circuit = Circuit::from_ast(ast)?;
    circuit::validate_circuit(&circuit)?;
    Ok(circuit)
}
