//! Diagnostics emitted while folding a network.
//!
//! The solver never prints or logs directly. Every traversal step and every
//! locally recovered numeric problem is handed to a [`DiagnosticSink`]
//! supplied by the caller.

use std::fmt;

use tracing::Level;

/// Something the solver wants to tell its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The traversal entered a terminal
    Visit { terminal: String },
    /// A wire reached the source's negative terminal
    TargetReached { terminal: String },
    /// A series step landed on a component that has no resistance model
    NonResistiveStep { terminal: String, component: String },
    /// A parallel branch resolved to a resistance at or below the threshold and was skipped
    InvalidBranchResistance { junction: String, resistance: f64 },
    /// No branch of a parallel group could be combined
    NoValidParallelBranches { junction: String },
    /// More than one voltage source; only `used` is measured
    MultipleSources { used: String, ignored: Vec<String> },
    /// A terminal is on several wires; only `used` is followed
    MultipleWiresAtTerminal { terminal: String, used: String },
}

impl Diagnostic {
    /// Severity used when forwarding to `tracing`.
    pub fn level(&self) -> Level {
        match self {
            Self::Visit { .. } | Self::TargetReached { .. } => Level::TRACE,
            Self::NonResistiveStep { .. } => Level::DEBUG,
            Self::InvalidBranchResistance { .. }
            | Self::NoValidParallelBranches { .. }
            | Self::MultipleSources { .. }
            | Self::MultipleWiresAtTerminal { .. } => Level::WARN,
        }
    }

    /// Check whether this diagnostic reports a recovered problem rather than progress.
    pub fn is_warning(&self) -> bool {
        self.level() == Level::WARN
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visit { terminal } => write!(f, "Current terminal: {}", terminal),
            Self::TargetReached { terminal } => write!(f, "Target terminal found from {}", terminal),
            Self::NonResistiveStep { terminal, component } => write!(
                f,
                "Path through {} ends at non-resistive component {}",
                terminal, component
            ),
            Self::InvalidBranchResistance { junction, resistance } => write!(
                f,
                "Invalid branch resistance encountered at {}: {}",
                junction, resistance
            ),
            Self::NoValidParallelBranches { junction } => {
                write!(f, "Parallel branch at {} has no valid conductances", junction)
            }
            Self::MultipleSources { used, ignored } => write!(
                f,
                "Multiple voltage sources, using {} and ignoring {}",
                used,
                ignored.join(", ")
            ),
            Self::MultipleWiresAtTerminal { terminal, used } => {
                write!(f, "Terminal {} is on several wires, following {}", terminal, used)
            }
        }
    }
}

/// Receiver for solver diagnostics.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at their [`Diagnostic::level`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let level = diagnostic.level();
        if level == Level::WARN {
            tracing::warn!("{}", diagnostic);
        } else if level == Level::DEBUG {
            tracing::debug!("{}", diagnostic);
        } else {
            tracing::trace!("{}", diagnostic);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Collects diagnostics in order, like the editor's console pane.
#[derive(Debug, Default, Clone)]
pub struct Console {
    entries: Vec<Diagnostic>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected diagnostics, oldest first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Collected diagnostics rendered as console lines.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Collected diagnostics that report recovered problems.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_warning())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for Console {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}
