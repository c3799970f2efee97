//! Circuit graph structure.

use std::collections::HashMap;

use tracing::debug;

use super::types::{ComponentId, Terminal, TerminalId, Wire, WireId};
use crate::components::{self, Component, Device, Resistor, VoltageSource};
use crate::dsl::{ComponentType, SchematicAst, TerminalRef};
use crate::error::{CircuitSimError, Result};

/// A complete schematic: components, the terminals they own, and the wires
/// joining those terminals.
///
/// Terminals are stored in an arena indexed by [`TerminalId`]. Components
/// record the ids of the terminals they own; wires hold ids only.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Optional schematic title
    pub title: Option<String>,

    terminals: Vec<Terminal>,
    components: Vec<Component>,
    wires: Vec<Wire>,

    /// Mapping from component names to component IDs
    component_map: HashMap<String, ComponentId>,

    /// Mapping from wire names to wire IDs
    wire_map: HashMap<String, WireId>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from a parsed AST.
    pub fn from_ast(ast: SchematicAst) -> Result<Self> {
        let mut circuit = Circuit::new();
        circuit.title = ast.title;

        for def in &ast.components {
            if circuit.component_map.contains_key(&def.name) {
                return Err(CircuitSimError::DuplicateComponent {
                    name: def.name.clone(),
                });
            }
            let id = ComponentId(circuit.components.len());
            let terminals = circuit.allocate_terminals(id, def.component_type);
            let component = Component::from_def(id, def, terminals)?;
            circuit.insert_component(component);
        }

        for def in &ast.wires {
            let terminals = def
                .terminals
                .iter()
                .map(|r| circuit.resolve_terminal(r))
                .collect::<Result<Vec<_>>>()?;
            let name = match &def.name {
                Some(name) => name.clone(),
                None => circuit.next_wire_name(),
            };
            circuit.connect(&name, &terminals)?;
        }

        Ok(circuit)
    }

    /// Add a resistor and return its ID.
    pub fn add_resistor(&mut self, name: &str, resistance: f64) -> Result<ComponentId> {
        let resistance = components::check_resistance(name, resistance)?;
        let id = self.reserve(name, ComponentType::Resistor)?;
        let terminals = self.allocate_terminals(id, ComponentType::Resistor);
        self.insert_component(Component::Resistor(Resistor::new(
            id,
            name.to_string(),
            terminals,
            resistance,
        )));
        Ok(id)
    }

    /// Add a DC voltage source and return its ID.
    pub fn add_voltage_source(&mut self, name: &str, voltage: f64) -> Result<ComponentId> {
        let voltage = components::check_voltage(name, voltage)?;
        let id = self.reserve(name, ComponentType::VoltageSource)?;
        let terminals = self.allocate_terminals(id, ComponentType::VoltageSource);
        self.insert_component(Component::VoltageSource(VoltageSource::new(
            id,
            name.to_string(),
            terminals,
            voltage,
        )));
        Ok(id)
    }

    /// Add a generic two-terminal device and return its ID.
    pub fn add_device(&mut self, name: &str, kind: &str) -> Result<ComponentId> {
        let id = self.reserve(name, ComponentType::Device)?;
        let terminals = self.allocate_terminals(id, ComponentType::Device);
        self.insert_component(Component::Device(Device::new(
            id,
            name.to_string(),
            terminals,
            kind.to_string(),
        )));
        Ok(id)
    }

    /// Join terminals with a new wire.
    ///
    /// The wire must join at least two distinct terminals of this circuit.
    /// Repeated terminals are collapsed, keeping the first occurrence.
    pub fn connect(&mut self, name: &str, terminals: &[TerminalId]) -> Result<WireId> {
        if self.wire_map.contains_key(name) {
            return Err(CircuitSimError::DuplicateWire {
                name: name.to_string(),
            });
        }

        let mut joined: Vec<TerminalId> = Vec::with_capacity(terminals.len());
        for &t in terminals {
            if t.0 >= self.terminals.len() {
                return Err(CircuitSimError::UnknownTerminal {
                    reference: t.to_string(),
                });
            }
            if !joined.contains(&t) {
                joined.push(t);
            }
        }

        if joined.len() < 2 {
            return Err(CircuitSimError::invalid_wire(
                name,
                format!("must join at least two distinct terminals, got {}", joined.len()),
            ));
        }

        let id = WireId(self.wires.len());
        self.wires.push(Wire {
            id,
            name: name.to_string(),
            terminals: joined,
        });
        self.wire_map.insert(name.to_string(), id);
        Ok(id)
    }

    /// All components, in placement order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All wires, in placement order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// All terminals, indexed by [`TerminalId`].
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Get a component by ID.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    /// Get a wire by ID.
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id.0)
    }

    /// Get a terminal by ID.
    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.get(id.0)
    }

    /// Get the component owning a terminal.
    pub fn owner(&self, id: TerminalId) -> Option<&Component> {
        self.terminal(id).and_then(|t| self.component(t.component))
    }

    /// Find a component by name.
    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.component_map.get(name).and_then(|&id| self.component(id))
    }

    /// Find a wire by name.
    pub fn find_wire(&self, name: &str) -> Option<&Wire> {
        self.wire_map.get(name).and_then(|&id| self.wire(id))
    }

    /// Find a terminal by qualified name, e.g. `R1:a`.
    pub fn find_terminal(&self, qualified: &str) -> Option<TerminalId> {
        let (component, terminal) = qualified.split_once(':')?;
        self.resolve_terminal(&TerminalRef::new(component, terminal)).ok()
    }

    /// Qualified name of a terminal (`R1:a`), for messages.
    pub fn terminal_label(&self, id: TerminalId) -> String {
        match self.terminal(id) {
            Some(t) => match self.component(t.component) {
                Some(c) => format!("{}:{}", c.name(), t.name),
                None => t.name.clone(),
            },
            None => id.to_string(),
        }
    }

    /// Iterate over the voltage sources, in placement order.
    pub fn voltage_sources(&self) -> impl Iterator<Item = &VoltageSource> {
        self.components.iter().filter_map(Component::as_voltage_source)
    }

    /// Emit one debug event per wire listing the terminals it joins.
    pub fn log_wires(&self) {
        for wire in &self.wires {
            let labels: Vec<String> = wire.terminals().iter().map(|&t| self.terminal_label(t)).collect();
            debug!(
                wire = %wire.name,
                junction = wire.is_junction(),
                terminals = %labels.join(", "),
                "wire"
            );
        }
    }

    fn reserve(&self, name: &str, component_type: ComponentType) -> Result<ComponentId> {
        if self.component_map.contains_key(name) {
            return Err(CircuitSimError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        let prefix = name.chars().next().unwrap_or('?');
        if ComponentType::from_prefix(prefix) != Some(component_type) {
            debug!(component = name, ?component_type, "name prefix does not match component type");
        }
        Ok(ComponentId(self.components.len()))
    }

    fn allocate_terminals(&mut self, component: ComponentId, component_type: ComponentType) -> [TerminalId; 2] {
        component_type.terminal_names().map(|name| {
            let id = TerminalId(self.terminals.len());
            self.terminals.push(Terminal {
                id,
                name: name.to_string(),
                component,
            });
            id
        })
    }

    fn insert_component(&mut self, component: Component) {
        self.component_map.insert(component.name().to_string(), component.id());
        self.components.push(component);
    }

    fn resolve_terminal(&self, reference: &TerminalRef) -> Result<TerminalId> {
        let unknown = || CircuitSimError::UnknownTerminal {
            reference: reference.to_string(),
        };
        let component = self.find_component(&reference.component).ok_or_else(unknown)?;
        component
            .terminals()
            .iter()
            .copied()
            .find(|&t| self.terminals[t.0].name == reference.terminal)
            .ok_or_else(unknown)
    }

    fn next_wire_name(&self) -> String {
        let mut n = self.wires.len() + 1;
        loop {
            let name = format!("W{}", n);
            if !self.wire_map.contains_key(&name) {
                return name;
            }
            n += 1;
        }
    }
}
