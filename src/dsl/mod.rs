//! DSL (Domain Specific Language) parser for schematic descriptions.
//!
//! This module provides a SPICE-inspired text format for saving and loading
//! editor schematics. The DSL is line-oriented and human-editable. Unlike a
//! SPICE netlist it keeps wires explicit, since the resistance solver walks
//! wires terminal by terminal.
//!
//! # Grammar Overview
//!
//! ```text
//! schematic   = { line }
//! line        = comment | directive | component | wire | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".title" { word } | ".wire" terminal terminal { terminal }
//! component   = name [value | kind]
//! wire        = wire_name terminal terminal { terminal }
//! terminal    = identifier ':' identifier
//!
//! name        = ('R' | 'V' | 'X') { letter | digit | '_' }
//! wire_name   = 'W' { letter | digit | '_' }
//! value       = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Component Types
//!
//! | Type | Description | Syntax | Terminals |
//! |------|-------------|--------|-----------|
//! | R | Resistor | `R<name> <value>` | `a`, `b` |
//! | V | DC Voltage Source | `V<name> [volts]` (default 5) | `pos`, `neg` |
//! | X | Generic device | `X<name> [kind]` | `a`, `b` |
//! | W | Wire | `W<name> <ref> <ref> [<ref>...]` | |
//!
//! # Example
//!
//! ```text
//! # R1 in series with R2 || R3
//! .title Series-parallel
//! V1 9
//! R1 100
//! R2 220
//! R3 330
//!
//! W1 V1:pos R1:a
//! W2 R1:b R2:a R3:a
//! W3 R2:b R3:b V1:neg
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a schematic DSL string into an AST.
pub fn parse(input: &str) -> Result<SchematicAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a schematic DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<SchematicAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CircuitSimError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
