//! Circuit graph representation and validation.
//!
//! This module provides the schematic graph the editor builds and the solver
//! reads. The [`Circuit`] struct owns all terminals, components and wires;
//! everything else refers to them by index.

mod graph;
mod types;
mod validate;

pub use graph::Circuit;
pub use types::*;
pub use validate::{validate_circuit, ValidationWarning};
