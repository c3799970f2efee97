//! WASM bindings for CircuitSim Core.
//!
//! This module provides JavaScript-friendly bindings so a browser-hosted
//! editor can recompute the network resistance whenever the schematic
//! changes.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmResistanceSolver } from 'circuitsim_core';
//!
//! await init();
//!
//! const schematic = `
//!   V1 5
//!   R1 10
//!   W1 V1:pos R1:a
//!   W2 R1:b V1:neg
//! `;
//!
//! const solver = new WasmResistanceSolver(schematic);
//! solver.equivalent_resistance(); // 10
//! solver.source_current();        // 0.5
//! solver.diagnostics();           // ["Current terminal: V1:pos", ...]
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Circuit;
use crate::error::CircuitSimError;
use crate::solver::{Console, ResistanceSolver, SolveReport};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: CircuitSimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible resistance solver for one schematic.
///
/// The schematic is parsed, validated and solved once on construction; the
/// getters return the stored results.
#[wasm_bindgen]
pub struct WasmResistanceSolver {
    circuit: Circuit,
    report: SolveReport,
    console: Console,
}

#[wasm_bindgen]
impl WasmResistanceSolver {
    /// Build and solve a schematic given in CircuitSim DSL format.
    ///
    /// # Returns
    /// A new `WasmResistanceSolver` or an error message if the schematic is
    /// invalid or cannot be solved.
    #[wasm_bindgen(constructor)]
    pub fn new(schematic: &str) -> Result<WasmResistanceSolver, JsValue> {
        let circuit = crate::load_schematic(schematic).map_err(to_js)?;

        let mut console = Console::new();
        let report = ResistanceSolver::new()
            .analyze_with(&circuit, &mut console)
            .map_err(to_js)?;

        Ok(WasmResistanceSolver {
            circuit,
            report,
            console,
        })
    }

    /// Equivalent resistance seen by the source, in ohms.
    #[wasm_bindgen]
    pub fn equivalent_resistance(&self) -> f64 {
        self.report.resistance
    }

    /// Current drawn from the source in amperes, or `undefined` for a short.
    #[wasm_bindgen]
    pub fn source_current(&self) -> Option<f64> {
        self.report.source_current
    }

    /// Name of the measured voltage source.
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> String {
        self.report.source.clone()
    }

    /// Console messages from the solve, oldest first.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Vec<String> {
        self.console.messages()
    }

    /// Number of components in the schematic.
    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.circuit.components().len()
    }

    /// Number of wires in the schematic.
    #[wasm_bindgen(getter)]
    pub fn wire_count(&self) -> usize {
        self.circuit.wires().len()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
