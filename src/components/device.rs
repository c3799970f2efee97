//! Generic two-terminal parts.

use crate::circuit::{ComponentId, TerminalId};

/// Terminal names of a generic device, in terminal order.
pub const DEVICE_TERMINALS: [&str; 2] = ["a", "b"];

/// Any two-terminal part the solver has no model for (lamp, switch, meter).
///
/// Devices take part in the schematic graph but add no resistance: a series
/// step that lands on a device ends the fold along that path.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: ComponentId,
    pub name: String,
    pub terminals: [TerminalId; 2],
    /// Free-form label, e.g. `lamp`
    pub kind: String,
}

impl Device {
    /// Create a new device.
    pub fn new(id: ComponentId, name: String, terminals: [TerminalId; 2], kind: String) -> Self {
        Self {
            id,
            name,
            terminals,
            kind,
        }
    }
}
