//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for a component in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A unique identifier for a terminal in the circuit.
///
/// Terminals live in the circuit's terminal arena; wires and the solver only
/// ever hold these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub usize);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A unique identifier for a wire in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// A named connection point owned by exactly one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub id: TerminalId,
    /// Name local to the owning component (`a`, `b`, `pos`, `neg`)
    pub name: String,
    /// Component this terminal belongs to
    pub component: ComponentId,
}

/// An undirected connection joining two or more terminals.
///
/// A wire with more than two terminals is a junction. Terminal order is the
/// order in which they were connected and is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub name: String,
    pub(crate) terminals: Vec<TerminalId>,
}

impl Wire {
    /// Terminals joined by this wire, in connection order.
    pub fn terminals(&self) -> &[TerminalId] {
        &self.terminals
    }

    /// Check whether `terminal` is on this wire.
    pub fn contains(&self, terminal: TerminalId) -> bool {
        self.terminals.contains(&terminal)
    }

    /// Terminals on this wire other than `terminal`.
    pub fn others(&self, terminal: TerminalId) -> impl Iterator<Item = TerminalId> + '_ {
        self.terminals.iter().copied().filter(move |&t| t != terminal)
    }

    /// Check whether this wire joins more than two terminals.
    pub fn is_junction(&self) -> bool {
        self.terminals.len() > 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(terminals: &[usize]) -> Wire {
        Wire {
            id: WireId(0),
            name: "W1".to_string(),
            terminals: terminals.iter().copied().map(TerminalId).collect(),
        }
    }

    #[test]
    fn test_wire_others_excludes_current() {
        let w = wire(&[0, 3, 5]);
        let others: Vec<_> = w.others(TerminalId(3)).collect();
        assert_eq!(others, vec![TerminalId(0), TerminalId(5)]);
        assert!(w.is_junction());
        assert!(w.contains(TerminalId(5)));
        assert!(!w.contains(TerminalId(4)));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TerminalId(4).to_string(), "T4");
        assert_eq!(WireId(2).to_string(), "W2");
    }
}
