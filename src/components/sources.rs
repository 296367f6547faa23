//! AC voltage source.

use crate::error::{RectifierError, Result};

/// A sinusoidal voltage source (the transformer secondary).
#[derive(Debug, Clone, PartialEq)]
pub struct AcSource {
    /// RMS voltage (volts)
    pub voltage: f64,
    /// Frequency (Hz)
    pub frequency: f64,
    /// Phase (degrees)
    pub phase: f64,
}

impl Default for AcSource {
    fn default() -> Self {
        Self {
            voltage: 6.0,
            frequency: 50.0,
            phase: 0.0,
        }
    }
}

impl AcSource {
    /// Phase in radians.
    pub fn phase_radians(&self) -> f64 {
        self.phase.to_radians()
    }

    /// Set a property by name.
    pub fn set(&mut self, property: &str, value: f64) -> Result<()> {
        match property {
            "voltage" => self.voltage = value,
            "frequency" => self.frequency = value,
            "phase" => self.phase = value,
            _ => return Err(RectifierError::unknown_property("ac-source", property)),
        }
        Ok(())
    }

    /// Numeric properties in display order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("voltage", self.voltage),
            ("frequency", self.frequency),
            ("phase", self.phase),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_radians() {
        let mut src = AcSource::default();
        src.set("phase", 90.0).unwrap();
        assert!((src.phase_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_set_unknown_property() {
        let mut src = AcSource::default();
        let err = src.set("resistance", 1.0).unwrap_err();
        assert!(err.to_string().contains("ac-source"));
    }
}
