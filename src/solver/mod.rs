//! DC resistance solver.
//!
//! This module computes the equivalent resistance a circuit presents to its
//! voltage source.
//!
//! ## Series/parallel folding
//!
//! Rather than assembling and solving a conductance matrix, the solver walks
//! the schematic from the source's positive terminal and folds what it finds:
//!
//! ```text
//!   V1:pos ── R1 ──┬── R2 ──┬── V1:neg        R = R1 + 1 / (1/R2 + 1/R3)
//!                  └── R3 ──┘
//! ```
//!
//! - series:   R = R1 + R2 + ...
//! - parallel: R = 1 / (1/R1 + 1/R2 + ...)
//!
//! This is exact for series/parallel-reducible networks and an approximation
//! for anything else (bridges, meshes). It runs in one pass, visiting each
//! terminal at most once, which keeps it cheap enough to rerun on every edit.
//!
//! Diagnostics (traversal steps, skipped branches) go to a caller-supplied
//! [`DiagnosticSink`]; the plain entry points forward them to `tracing`.

mod diagnostics;
mod index;
mod resistance;

pub use diagnostics::{Console, Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use index::WireIndex;
pub use resistance::{ResistanceSolver, SolveReport, SolverConfig};

use crate::circuit::Circuit;
use crate::error::Result;

/// Parallel branches must resolve to more than this many ohms by default.
pub const DEFAULT_MIN_BRANCH_RESISTANCE: f64 = 0.0;

/// Equivalent resistance of `circuit` with the default configuration.
pub fn solve(circuit: &Circuit) -> Result<f64> {
    ResistanceSolver::new().solve(circuit)
}
