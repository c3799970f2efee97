//! Voltage sources.

use crate::circuit::{ComponentId, TerminalId};

/// Terminal names of a voltage source, in terminal order.
pub const SOURCE_TERMINALS: [&str; 2] = ["pos", "neg"];

/// Voltage used when a source is placed without an explicit value.
pub const DEFAULT_SOURCE_VOLTAGE: f64 = 5.0;

/// An ideal DC voltage source.
///
/// The resistance solver measures the network between the positive and
/// negative terminals of the first source in the circuit.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    pub id: ComponentId,
    pub name: String,
    pub terminals: [TerminalId; 2], // [positive, negative]
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(id: ComponentId, name: String, terminals: [TerminalId; 2], voltage: f64) -> Self {
        Self {
            id,
            name,
            terminals,
            voltage,
        }
    }

    /// Get the positive terminal.
    pub fn positive(&self) -> TerminalId {
        self.terminals[0]
    }

    /// Get the negative terminal.
    pub fn negative(&self) -> TerminalId {
        self.terminals[1]
    }

    /// Get the source voltage.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }
}
