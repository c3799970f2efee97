//! Linear passive components.

use crate::circuit::{ComponentId, TerminalId};

/// Terminal names of a resistor, in terminal order.
pub const RESISTOR_TERMINALS: [&str; 2] = ["a", "b"];

/// A resistor component.
///
/// Resistors are unpolarised; `terminals[0]` is `a` and `terminals[1]` is `b`
/// only so they can be addressed by name.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub id: ComponentId,
    pub name: String,
    pub terminals: [TerminalId; 2],
    /// Resistance in ohms (finite, >= 0)
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(id: ComponentId, name: String, terminals: [TerminalId; 2], resistance: f64) -> Self {
        Self {
            id,
            name,
            terminals,
            resistance,
        }
    }

    /// Get the resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }
}
