//! Configuration file loading and control ranges.
//!
//! A configuration file is TOML with three optional tables:
//!
//! ```toml
//! [circuit]
//! topology = "with_filter"
//! input_voltage_rms = 12.0
//! capacitance_micro_farads = 470.0
//!
//! [display]
//! width = 800.0
//! height = 400.0
//!
//! [animation]
//! frames = 60
//! fps = 30.0
//! ```
//!
//! Missing keys take their defaults. Values are clamped into
//! [`ControlRanges`] after loading, the same way the page sliders bound them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RectifierError, Result};
use crate::model::CircuitConfig;
use crate::render::PlotLayout;
use crate::simulation::DEFAULT_TIME_DILATION;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Circuit parameters
    pub circuit: CircuitConfig,
    /// Plot canvas layout
    pub display: PlotLayout,
    /// Animation settings
    pub animation: AnimationConfig,
}

/// Animation frame settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames to render
    pub frames: usize,
    /// Frames per second of wall-clock time
    pub fps: f64,
    /// Slow-down from wall-clock to waveform time
    pub time_dilation: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            fps: 30.0,
            time_dilation: DEFAULT_TIME_DILATION,
        }
    }
}

impl AnimationConfig {
    /// Wall-clock seconds between frames.
    pub fn frame_interval(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text and clamp it into range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(text).map_err(|e| RectifierError::ConfigParseError {
            message: e.to_string(),
        })?;
        ControlRanges::default().check_finite(&config.circuit)?;
        config.circuit = ControlRanges::default().clamp(&config.circuit);
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RectifierError::ConfigReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), topology = %config.circuit.topology, "loaded config");
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RectifierError::ConfigParseError {
            message: e.to_string(),
        })
    }
}

/// Inclusive bounds of one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub min: f64,
    pub max: f64,
}

impl ControlRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Slider bounds for every circuit control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRanges {
    pub input_voltage_rms: ControlRange,
    pub frequency_hz: ControlRange,
    pub load_resistance_ohms: ControlRange,
    pub capacitance_micro_farads: ControlRange,
    pub diode_forward_drop_volts: ControlRange,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            input_voltage_rms: ControlRange::new(1.0, 24.0),
            frequency_hz: ControlRange::new(1.0, 1000.0),
            load_resistance_ohms: ControlRange::new(10.0, 100_000.0),
            capacitance_micro_farads: ControlRange::new(1.0, 10_000.0),
            diode_forward_drop_volts: ControlRange::new(0.1, 1.5),
        }
    }
}

impl ControlRanges {
    fn fields(&self, config: &CircuitConfig) -> [(&'static str, f64, ControlRange); 5] {
        [
            ("input_voltage_rms", config.input_voltage_rms, self.input_voltage_rms),
            ("frequency_hz", config.frequency_hz, self.frequency_hz),
            ("load_resistance_ohms", config.load_resistance_ohms, self.load_resistance_ohms),
            (
                "capacitance_micro_farads",
                config.capacitance_micro_farads,
                self.capacitance_micro_farads,
            ),
            (
                "diode_forward_drop_volts",
                config.diode_forward_drop_volts,
                self.diode_forward_drop_volts,
            ),
        ]
    }

    /// Reject NaN and infinite values, which cannot be clamped.
    pub fn check_finite(&self, config: &CircuitConfig) -> Result<()> {
        for (name, value, _) in self.fields(config) {
            if !value.is_finite() {
                return Err(RectifierError::invalid_setting(name, value, "must be a finite number"));
            }
        }
        if !config.phase_radians.is_finite() {
            return Err(RectifierError::invalid_setting(
                "phase_radians",
                config.phase_radians,
                "must be a finite number",
            ));
        }
        Ok(())
    }

    /// Report the first control outside its range.
    pub fn check(&self, config: &CircuitConfig) -> Result<()> {
        self.check_finite(config)?;
        for (name, value, range) in self.fields(config) {
            if !range.contains(value) {
                return Err(RectifierError::invalid_setting(
                    name,
                    value,
                    format!("must be between {} and {}", range.min, range.max),
                ));
            }
        }
        Ok(())
    }

    /// Clamp every control into range.
    pub fn clamp(&self, config: &CircuitConfig) -> CircuitConfig {
        for (name, value, range) in self.fields(config) {
            if !range.contains(value) {
                tracing::warn!(setting = name, value, min = range.min, max = range.max, "clamping out-of-range setting");
            }
        }
        CircuitConfig {
            input_voltage_rms: self.input_voltage_rms.clamp(config.input_voltage_rms),
            frequency_hz: self.frequency_hz.clamp(config.frequency_hz),
            load_resistance_ohms: self.load_resistance_ohms.clamp(config.load_resistance_ohms),
            capacitance_micro_farads: self.capacitance_micro_farads.clamp(config.capacitance_micro_farads),
            diode_forward_drop_volts: self.diode_forward_drop_volts.clamp(config.diode_forward_drop_volts),
            ..*config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Topology;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.circuit.input_voltage_rms, 6.0);
        assert_eq!(config.display.width, 800.0);
        assert_eq!(config.animation.frames, 60);
    }

    #[test]
    fn test_partial_config() {
        let text = r#"
            [circuit]
            topology = "with_filter"
            input_voltage_rms = 12.0

            [animation]
            fps = 10.0
        "#;
        let config = AppConfig::from_toml_str(text).unwrap();
        assert_eq!(config.circuit.topology, Topology::WithFilter);
        assert_eq!(config.circuit.input_voltage_rms, 12.0);
        assert_eq!(config.circuit.frequency_hz, 50.0);
        assert_eq!(config.animation.frame_interval(), 0.1);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let text = r#"
            [circuit]
            input_voltage_rms = 100.0
            load_resistance_ohms = 1.0
        "#;
        let config = AppConfig::from_toml_str(text).unwrap();
        assert_eq!(config.circuit.input_voltage_rms, 24.0);
        assert_eq!(config.circuit.load_resistance_ohms, 10.0);
    }

    #[test]
    fn test_parse_error() {
        let err = AppConfig::from_toml_str("[circuit]\ntopology = \"full_wave\"").unwrap_err();
        assert!(matches!(err, RectifierError::ConfigParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/nonexistent/rectifier.toml").unwrap_err();
        assert!(matches!(err, RectifierError::ConfigReadError { .. }));
    }

    #[test]
    fn test_check_reports_setting() {
        let ranges = ControlRanges::default();
        assert!(ranges.check(&CircuitConfig::default()).is_ok());

        let err = ranges.check(&CircuitConfig::default().with_frequency(5000.0)).unwrap_err();
        match err {
            RectifierError::InvalidSetting { name, value, .. } => {
                assert_eq!(name, "frequency_hz");
                assert_eq!(value, 5000.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = ranges.check(&CircuitConfig::default().with_phase(f64::NAN)).unwrap_err();
        assert!(matches!(err, RectifierError::InvalidSetting { .. }));
    }

    #[test]
    fn test_control_range_bounds() {
        let range = ControlRanges::default().frequency_hz;
        assert!(range.contains(1.0));
        assert!(range.contains(1000.0));
        assert!(!range.contains(1000.5));
        assert_eq!(range.clamp(0.2), 1.0);
        assert_eq!(range.clamp(2000.0), 1000.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.circuit.topology = Topology::WithFilter;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("with_filter"));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
