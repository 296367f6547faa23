//! Diode model.
//!
//! The rectifier treats the diode as an ideal switch in series with a
//! constant forward drop. Only the drop reaches the model, through
//! [`Workspace::to_config`](crate::circuit::Workspace::to_config).

use crate::error::{RectifierError, Result};

/// Parameters for a rectifier diode.
#[derive(Debug, Clone, PartialEq)]
pub struct DiodeParams {
    /// Part number shown on the diagram
    pub model: String,
    /// Forward voltage drop, typically 0.6-0.7V for silicon
    pub vf: f64,
    /// Maximum average forward current (A)
    pub max_current: f64,
}

impl Default for DiodeParams {
    fn default() -> Self {
        Self::in4001()
    }
}

impl DiodeParams {
    /// General purpose 1A silicon rectifier.
    pub fn in4001() -> Self {
        Self {
            model: "IN4001".to_string(),
            vf: 0.7,
            max_current: 1.0,
        }
    }

    /// Set a property by name.
    pub fn set(&mut self, property: &str, value: f64) -> Result<()> {
        match property {
            "forwardVoltage" | "forward_voltage" | "vf" => self.vf = value,
            "maxCurrent" | "max_current" => self.max_current = value,
            _ => return Err(RectifierError::unknown_property("diode", property)),
        }
        Ok(())
    }

    /// Numeric properties in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![("forwardVoltage", self.vf), ("maxCurrent", self.max_current)]
    }
}
