//! Abstract Syntax Tree types for the schematic DSL.

use std::fmt;

use crate::components::{DEVICE_TERMINALS, RESISTOR_TERMINALS, SOURCE_TERMINALS};

/// Complete AST representation of a parsed schematic.
#[derive(Debug, Clone, Default)]
pub struct SchematicAst {
    /// Optional schematic title (`.title`)
    pub title: Option<String>,
    /// All component instances, in declaration order
    pub components: Vec<ComponentDef>,
    /// All wires, in declaration order
    pub wires: Vec<WireDef>,
}

impl SchematicAst {
    /// Create a new empty schematic AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component definition from the DSL.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Component type (R, V, X)
    pub component_type: ComponentType,
    /// Unique component name
    pub name: String,
    /// Component value (resistance or source voltage)
    pub value: Option<f64>,
    /// Device kind label (`X1 lamp`)
    pub label: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A wire definition from the DSL.
#[derive(Debug, Clone)]
pub struct WireDef {
    /// Wire name; `None` for `.wire` statements
    pub name: Option<String>,
    /// Terminals joined by the wire
    pub terminals: Vec<TerminalRef>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A `COMPONENT:TERMINAL` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRef {
    pub component: String,
    pub terminal: String,
}

impl TerminalRef {
    pub fn new(component: impl Into<String>, terminal: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            terminal: terminal.into(),
        }
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.terminal)
    }
}

/// Component types supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Resistor
    Resistor,
    /// DC Voltage Source
    VoltageSource,
    /// Generic two-terminal device
    Device,
}

impl ComponentType {
    /// Parse a component type from its DSL prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'V' => Some(Self::VoltageSource),
            'X' => Some(Self::Device),
            _ => None,
        }
    }

    /// Names of this component type's terminals, in terminal order.
    pub fn terminal_names(&self) -> [&'static str; 2] {
        match self {
            Self::Resistor => RESISTOR_TERMINALS,
            Self::VoltageSource => SOURCE_TERMINALS,
            Self::Device => DEVICE_TERMINALS,
        }
    }
}
