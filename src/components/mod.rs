//! Component models for the schematic graph.
//!
//! This module provides the closed set of component kinds the editor can
//! place:
//! - Linear: Resistor
//! - Sources: DC Voltage Source
//! - Generic: any other two-terminal Device
//!
//! Every component owns exactly two terminals, allocated in the circuit's
//! terminal arena when the component is added.

mod device;
mod linear;
mod sources;

pub use device::{Device, DEVICE_TERMINALS};
pub use linear::{Resistor, RESISTOR_TERMINALS};
pub use sources::{VoltageSource, DEFAULT_SOURCE_VOLTAGE, SOURCE_TERMINALS};

use crate::circuit::{ComponentId, TerminalId};
use crate::dsl::{ComponentDef, ComponentType};
use crate::error::{CircuitSimError, Result};

/// A circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
    Device(Device),
}

impl Component {
    /// Create a component from a DSL definition.
    ///
    /// `terminals` must already be allocated in the circuit's arena, in the
    /// order given by [`ComponentType::terminal_names`].
    pub fn from_def(id: ComponentId, def: &ComponentDef, terminals: [TerminalId; 2]) -> Result<Self> {
        match def.component_type {
            ComponentType::Resistor => {
                let value = def.value.ok_or_else(|| {
                    CircuitSimError::invalid_component(&def.name, def.line, "resistor requires a value")
                })?;
                let resistance = check_resistance(&def.name, value)?;
                Ok(Component::Resistor(Resistor::new(
                    id,
                    def.name.clone(),
                    terminals,
                    resistance,
                )))
            }

            ComponentType::VoltageSource => {
                let voltage = check_voltage(&def.name, def.value.unwrap_or(DEFAULT_SOURCE_VOLTAGE))?;
                Ok(Component::VoltageSource(VoltageSource::new(
                    id,
                    def.name.clone(),
                    terminals,
                    voltage,
                )))
            }

            ComponentType::Device => {
                let kind = def.label.clone().unwrap_or_else(|| "device".to_string());
                Ok(Component::Device(Device::new(id, def.name.clone(), terminals, kind)))
            }
        }
    }

    /// Get the component ID.
    pub fn id(&self) -> ComponentId {
        match self {
            Component::Resistor(r) => r.id,
            Component::VoltageSource(v) => v.id,
            Component::Device(d) => d.id,
        }
    }

    /// Get the component name.
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor(r) => &r.name,
            Component::VoltageSource(v) => &v.name,
            Component::Device(d) => &d.name,
        }
    }

    /// Get the component's terminals, in terminal-name order.
    pub fn terminals(&self) -> &[TerminalId; 2] {
        match self {
            Component::Resistor(r) => &r.terminals,
            Component::VoltageSource(v) => &v.terminals,
            Component::Device(d) => &d.terminals,
        }
    }

    /// Human-readable kind, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Component::Resistor(_) => "resistor",
            Component::VoltageSource(_) => "voltage source",
            Component::Device(d) => &d.kind,
        }
    }

    /// Given one of this component's terminals, return the other one.
    ///
    /// Returns `None` if `terminal` does not belong to this component.
    pub fn far_terminal(&self, terminal: TerminalId) -> Option<TerminalId> {
        match *self.terminals() {
            [a, b] if a == terminal => Some(b),
            [a, b] if b == terminal => Some(a),
            _ => None,
        }
    }

    /// Get the resistor model, if this is a resistor.
    pub fn as_resistor(&self) -> Option<&Resistor> {
        match self {
            Component::Resistor(r) => Some(r),
            _ => None,
        }
    }

    /// Get the voltage source model, if this is a voltage source.
    pub fn as_voltage_source(&self) -> Option<&VoltageSource> {
        match self {
            Component::VoltageSource(v) => Some(v),
            _ => None,
        }
    }
}

/// Validate a resistance value.
pub(crate) fn check_resistance(component: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CircuitSimError::InvalidParameter {
            component: component.to_string(),
            param: "resistance".to_string(),
            message: format!("must be a finite value >= 0, got {}", value),
        });
    }
    Ok(value)
}

/// Validate a source voltage.
pub(crate) fn check_voltage(component: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CircuitSimError::InvalidParameter {
            component: component.to_string(),
            param: "voltage".to_string(),
            message: format!("must be finite, got {}", value),
        });
    }
    Ok(value)
}
