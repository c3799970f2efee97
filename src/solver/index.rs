//! Terminal to wire lookup.

use crate::circuit::{Circuit, TerminalId, WireId};

use super::diagnostics::{Diagnostic, DiagnosticSink};

/// Maps each terminal to the wire the traversal follows from it.
///
/// Built once per solve. When a terminal is on several wires the first one
/// in wire order wins and the rest are reported.
#[derive(Debug, Clone)]
pub struct WireIndex {
    wire_at: Vec<Option<WireId>>,
}

impl WireIndex {
    /// Index every wire of `circuit`.
    pub fn build(circuit: &Circuit, sink: &mut dyn DiagnosticSink) -> Self {
        let mut wire_at = vec![None; circuit.terminals().len()];

        for wire in circuit.wires() {
            for &t in wire.terminals() {
                let Some(slot) = wire_at.get_mut(t.0) else {
                    continue;
                };
                match *slot {
                    None => *slot = Some(wire.id),
                    Some(used) => {
                        let used = circuit.wire(used).map(|w| w.name.clone()).unwrap_or_default();
                        sink.report(Diagnostic::MultipleWiresAtTerminal {
                            terminal: circuit.terminal_label(t),
                            used,
                        });
                    }
                }
            }
        }

        Self { wire_at }
    }

    /// The wire followed from `terminal`, if it is connected.
    pub fn wire_at(&self, terminal: TerminalId) -> Option<WireId> {
        self.wire_at.get(terminal.0).copied().flatten()
    }
}
