//! Linear passive components: Resistor, Capacitor.

use crate::error::{RectifierError, Result};

/// The load resistor.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    /// Resistance (ohms)
    pub resistance: f64,
    /// Power rating (watts)
    pub power: f64,
}

impl Default for Resistor {
    fn default() -> Self {
        Self {
            resistance: 1000.0,
            power: 0.25,
        }
    }
}

impl Resistor {
    /// Set a property by name.
    pub fn set(&mut self, property: &str, value: f64) -> Result<()> {
        match property {
            "resistance" => self.resistance = value,
            "power" => self.power = value,
            _ => return Err(RectifierError::unknown_property("resistor", property)),
        }
        Ok(())
    }

    /// Numeric properties in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![("resistance", self.resistance), ("power", self.power)]
    }
}

/// The smoothing capacitor.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    /// Capacitance (microfarads)
    pub capacitance: f64,
    /// Voltage rating (volts)
    pub voltage: f64,
}

impl Default for Capacitor {
    fn default() -> Self {
        Self {
            capacitance: 100.0,
            voltage: 16.0,
        }
    }
}

impl Capacitor {
    /// Set a property by name.
    pub fn set(&mut self, property: &str, value: f64) -> Result<()> {
        match property {
            "capacitance" => self.capacitance = value,
            "voltage" => self.voltage = value,
            _ => return Err(RectifierError::unknown_property("capacitor", property)),
        }
        Ok(())
    }

    /// Numeric properties in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![("capacitance", self.capacitance), ("voltage", self.voltage)]
    }
}
