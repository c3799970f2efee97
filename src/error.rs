//! Error types for the CircuitSim core.
//!
//! This module provides a unified error type [`CircuitSimError`] that covers
//! all error conditions that can occur while parsing a schematic, building
//! the circuit graph, and solving for its equivalent resistance.
//!
//! Numeric edge cases inside the solver (zero-ohm branches, parallel groups
//! with no usable branch) are not errors; they are reported through
//! [`crate::solver::Diagnostic`] and the solve continues.

use thiserror::Error;

/// Result type alias using [`CircuitSimError`].
pub type Result<T> = std::result::Result<T, CircuitSimError>;

/// Unified error type for all CircuitSim operations.
#[derive(Error, Debug)]
pub enum CircuitSimError {
    // ============ DSL Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    // ============ Circuit Graph Errors ============
    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    /// Duplicate component name
    #[error("Duplicate component name '{name}'")]
    DuplicateComponent { name: String },

    /// Duplicate wire name
    #[error("Duplicate wire name '{name}'")]
    DuplicateWire { name: String },

    /// Terminal reference that does not resolve
    #[error("Unknown terminal '{reference}'")]
    UnknownTerminal { reference: String },

    /// Wire that does not join at least two distinct terminals
    #[error("Invalid wire '{name}': {message}")]
    InvalidWire { name: String, message: String },

    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Solver Errors ============
    /// The circuit contains no voltage source to measure from
    #[error("No voltage source found in circuit")]
    NoSourceFound,

    /// A terminal on the traversal path is not attached to any wire
    #[error("Terminal '{terminal}' is not connected to any wire")]
    DisconnectedTerminal { terminal: String },

    // ============ I/O Errors ============
    /// Error reading schematic file
    #[error("Failed to read schematic file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CircuitSimError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid wire error
    pub fn invalid_wire(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidWire {
            name: name.into(),
            message: message.into(),
        }
    }
}
