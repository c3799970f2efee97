//! Circuit validation.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use super::{Circuit, TerminalId, WireId};
use crate::error::{CircuitSimError, Result};

/// A problem that does not prevent solving but usually means the schematic
/// is not what the user intended.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// More than one voltage source; only the first is measured
    MultipleSources { used: String, ignored: Vec<String> },
    /// A terminal appears on more than one wire; the first wire is used
    TerminalOnMultipleWires { terminal: String, wires: Vec<String> },
    /// Two wires join exactly the same set of terminals
    DuplicateWire { first: String, second: String },
    /// A terminal is not attached to any wire
    UnconnectedTerminal { terminal: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleSources { used, ignored } => write!(
                f,
                "multiple voltage sources; measuring {} and ignoring {}",
                used,
                ignored.join(", ")
            ),
            Self::TerminalOnMultipleWires { terminal, wires } => write!(
                f,
                "terminal {} is on several wires ({}); only the first is followed",
                terminal,
                wires.join(", ")
            ),
            Self::DuplicateWire { first, second } => {
                write!(f, "wires {} and {} join the same terminals", first, second)
            }
            Self::UnconnectedTerminal { terminal } => {
                write!(f, "terminal {} is not connected", terminal)
            }
        }
    }
}

/// Validate a circuit for solving.
///
/// Checks:
/// - The circuit has components and at least one voltage source
/// - Every terminal is on at most one wire (warning)
/// - No two wires join the same terminal set (warning)
/// - Every terminal is wired (warning)
pub fn validate_circuit(circuit: &Circuit) -> Result<Vec<ValidationWarning>> {
    if circuit.components().is_empty() {
        return Err(CircuitSimError::InvalidTopology {
            message: "Circuit has no components".to_string(),
        });
    }

    let mut sources = circuit.voltage_sources();
    let used = sources.next().ok_or(CircuitSimError::NoSourceFound)?;

    let mut warnings = Vec::new();

    let ignored: Vec<String> = sources.map(|v| v.name.clone()).collect();
    if !ignored.is_empty() {
        warnings.push(ValidationWarning::MultipleSources {
            used: used.name.clone(),
            ignored,
        });
    }

    let mut incidence: HashMap<TerminalId, Vec<WireId>> = HashMap::new();
    for wire in circuit.wires() {
        for &t in wire.terminals() {
            incidence.entry(t).or_default().push(wire.id);
        }
    }

    for terminal in circuit.terminals() {
        match incidence.get(&terminal.id) {
            None => warnings.push(ValidationWarning::UnconnectedTerminal {
                terminal: circuit.terminal_label(terminal.id),
            }),
            Some(wires) if wires.len() > 1 => warnings.push(ValidationWarning::TerminalOnMultipleWires {
                terminal: circuit.terminal_label(terminal.id),
                wires: wires
                    .iter()
                    .filter_map(|&w| circuit.wire(w))
                    .map(|w| w.name.clone())
                    .collect(),
            }),
            Some(_) => {}
        }
    }

    let mut seen: HashMap<Vec<TerminalId>, &str> = HashMap::new();
    for wire in circuit.wires() {
        let mut key = wire.terminals().to_vec();
        key.sort();
        if let Some(first) = seen.get(&key) {
            warnings.push(ValidationWarning::DuplicateWire {
                first: first.to_string(),
                second: wire.name.clone(),
            });
        } else {
            seen.insert(key, &wire.name);
        }
    }

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(warnings)
}
