//! Circuit configuration consumed by the rectifier model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RectifierError, Result};

/// Default RMS input voltage (volts).
pub const DEFAULT_INPUT_VOLTAGE_RMS: f64 = 6.0;
/// Default mains frequency (Hz).
pub const DEFAULT_FREQUENCY_HZ: f64 = 50.0;
/// Default load resistance (ohms).
pub const DEFAULT_LOAD_RESISTANCE_OHMS: f64 = 1000.0;
/// Default filter capacitance (microfarads).
pub const DEFAULT_CAPACITANCE_MICRO_FARADS: f64 = 100.0;
/// Default diode forward drop used by the measurement panel (volts).
pub const DEFAULT_DIODE_FORWARD_DROP_VOLTS: f64 = 0.6;

/// Rectifier topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Diode and load only; pulsed DC output.
    #[default]
    WithoutFilter,
    /// Smoothing capacitor across the load.
    WithFilter,
}

impl Topology {
    /// Whether a smoothing capacitor is present.
    pub fn has_filter(&self) -> bool {
        matches!(self, Topology::WithFilter)
    }
}

impl FromStr for Topology {
    type Err = RectifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "without" | "without_filter" | "without-filter" | "none" => Ok(Topology::WithoutFilter),
            "with" | "with_filter" | "with-filter" | "filter" => Ok(Topology::WithFilter),
            _ => Err(RectifierError::ConfigParseError {
                message: format!("unknown topology '{}' (expected 'with' or 'without')", s),
            }),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::WithoutFilter => write!(f, "without filter"),
            Topology::WithFilter => write!(f, "with filter"),
        }
    }
}

/// Electrical parameters of the rectifier for one evaluation.
///
/// Rebuilt by the caller whenever a control changes. No validation is
/// performed here; see [`crate::config::ControlRanges`] for clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    pub topology: Topology,
    /// RMS input voltage (volts)
    pub input_voltage_rms: f64,
    /// Input frequency (Hz)
    pub frequency_hz: f64,
    /// Load resistance (ohms)
    pub load_resistance_ohms: f64,
    /// Filter capacitance (microfarads); ignored without a filter
    pub capacitance_micro_farads: f64,
    /// Diode forward voltage drop (volts)
    pub diode_forward_drop_volts: f64,
    /// Phase of the AC source (radians)
    pub phase_radians: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            input_voltage_rms: DEFAULT_INPUT_VOLTAGE_RMS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            load_resistance_ohms: DEFAULT_LOAD_RESISTANCE_OHMS,
            capacitance_micro_farads: DEFAULT_CAPACITANCE_MICRO_FARADS,
            diode_forward_drop_volts: DEFAULT_DIODE_FORWARD_DROP_VOLTS,
            phase_radians: 0.0,
        }
    }
}

impl CircuitConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_input_voltage_rms(mut self, volts: f64) -> Self {
        self.input_voltage_rms = volts;
        self
    }

    pub fn with_frequency(mut self, hz: f64) -> Self {
        self.frequency_hz = hz;
        self
    }

    pub fn with_load_resistance(mut self, ohms: f64) -> Self {
        self.load_resistance_ohms = ohms;
        self
    }

    pub fn with_capacitance_micro_farads(mut self, micro_farads: f64) -> Self {
        self.capacitance_micro_farads = micro_farads;
        self
    }

    pub fn with_diode_drop(mut self, volts: f64) -> Self {
        self.diode_forward_drop_volts = volts;
        self
    }

    pub fn with_phase(mut self, radians: f64) -> Self {
        self.phase_radians = radians;
        self
    }

    /// Peak input voltage, `Vrms * sqrt(2)`.
    pub fn peak_voltage(&self) -> f64 {
        self.input_voltage_rms * std::f64::consts::SQRT_2
    }

    /// Input period in seconds.
    pub fn period(&self) -> f64 {
        1.0 / self.frequency_hz
    }

    /// Filter time constant R·C in seconds; zero without a filter.
    pub fn time_constant(&self) -> f64 {
        if self.topology.has_filter() {
            self.load_resistance_ohms * self.capacitance_micro_farads * 1e-6
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_control_panel() {
        let config = CircuitConfig::default();
        assert_eq!(config.topology, Topology::WithoutFilter);
        assert_eq!(config.input_voltage_rms, 6.0);
        assert_eq!(config.frequency_hz, 50.0);
        assert_eq!(config.load_resistance_ohms, 1000.0);
        assert_eq!(config.capacitance_micro_farads, 100.0);
        assert_eq!(config.diode_forward_drop_volts, 0.6);
    }

    #[test]
    fn test_time_constant() {
        let config = CircuitConfig::new()
            .with_topology(Topology::WithFilter)
            .with_load_resistance(1000.0)
            .with_capacitance_micro_farads(100.0);
        assert_relative_eq!(config.time_constant(), 0.1, max_relative = 1e-12);

        let unfiltered = config.with_topology(Topology::WithoutFilter);
        assert_eq!(unfiltered.time_constant(), 0.0);
    }

    #[test]
    fn test_topology_from_str() {
        assert_eq!("with".parse::<Topology>().unwrap(), Topology::WithFilter);
        assert_eq!("Without".parse::<Topology>().unwrap(), Topology::WithoutFilter);
        assert!("bridge".parse::<Topology>().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CircuitConfig = toml::from_str("input_voltage_rms = 12.0\ntopology = \"with_filter\"").unwrap();
        assert_eq!(config.input_voltage_rms, 12.0);
        assert_eq!(config.topology, Topology::WithFilter);
        assert_eq!(config.frequency_hz, DEFAULT_FREQUENCY_HZ);
    }
}
