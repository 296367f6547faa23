//! Scalar measurements of the rectifier output.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{CircuitConfig, Topology};

/// Theoretical ripple factor of an unfiltered half-wave rectifier.
pub const RIPPLE_FACTOR_UNFILTERED: f64 = 1.21;
/// Ripple factor with the smoothing capacitor in place.
pub const RIPPLE_FACTOR_FILTERED: f64 = 0.48;
/// Theoretical half-wave rectification efficiency (percent).
pub const HALF_WAVE_EFFICIENCY_PERCENT: f64 = 40.6;
/// Flat ripple allowance subtracted from the filtered DC level (volts).
pub const FILTER_RIPPLE_ALLOWANCE_VOLTS: f64 = 0.5;

/// Measurements derived from a [`CircuitConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectifierMeasurements {
    /// RMS input voltage echoed from the config (volts)
    pub input_voltage_rms: f64,
    /// Peak input voltage (volts)
    pub peak_voltage: f64,
    /// Average output voltage (volts)
    pub dc_output_voltage: f64,
    /// Ratio of AC to DC content of the output
    pub ripple_factor: f64,
    /// Rectification efficiency (percent)
    pub efficiency_percent: f64,
}

/// Compute the measurements for a configuration.
///
/// Total over all inputs: degenerate values produce degenerate numbers,
/// never a panic.
pub fn compute_measurements(config: &CircuitConfig) -> RectifierMeasurements {
    let vm = config.peak_voltage();
    let vd = config.diode_forward_drop_volts;

    let (dc_output_voltage, ripple_factor) = match config.topology {
        Topology::WithoutFilter => ((vm - vd) / PI, RIPPLE_FACTOR_UNFILTERED),
        Topology::WithFilter => (vm - vd - FILTER_RIPPLE_ALLOWANCE_VOLTS, RIPPLE_FACTOR_FILTERED),
    };

    RectifierMeasurements {
        input_voltage_rms: config.input_voltage_rms,
        peak_voltage: vm,
        dc_output_voltage,
        ripple_factor,
        // The capacitor does not change the diode's theoretical efficiency
        efficiency_percent: HALF_WAVE_EFFICIENCY_PERCENT,
    }
}

impl fmt::Display for RectifierMeasurements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input RMS:      {:.2} V", self.input_voltage_rms)?;
        writeln!(f, "Input Peak:     {:.2} V", self.peak_voltage)?;
        writeln!(f, "Output DC:      {:.2} V", self.dc_output_voltage)?;
        writeln!(f, "Ripple Factor:  {:.2}", self.ripple_factor)?;
        write!(f, "Efficiency:     {:.1}%", self.efficiency_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn config(topology: Topology) -> CircuitConfig {
        CircuitConfig::new()
            .with_topology(topology)
            .with_input_voltage_rms(6.0)
            .with_diode_drop(0.6)
    }

    #[test]
    fn test_unfiltered_example() {
        let m = compute_measurements(&config(Topology::WithoutFilter));
        assert_abs_diff_eq!(m.peak_voltage, 8.485, epsilon = 1e-3);
        assert_abs_diff_eq!(m.dc_output_voltage, 2.510, epsilon = 1e-3);
        assert_eq!(m.ripple_factor, 1.21);
        assert_eq!(m.efficiency_percent, 40.6);
    }

    #[test]
    fn test_filtered_example() {
        let m = compute_measurements(&config(Topology::WithFilter));
        assert_abs_diff_eq!(m.dc_output_voltage, 7.385, epsilon = 1e-3);
        assert_eq!(m.ripple_factor, 0.48);
        assert_eq!(m.efficiency_percent, 40.6);
    }

    #[test]
    fn test_peak_is_rms_times_sqrt2() {
        for vrms in [0.5, 1.0, 6.0, 12.0, 230.0] {
            let m = compute_measurements(&CircuitConfig::new().with_input_voltage_rms(vrms));
            assert_relative_eq!(m.peak_voltage, vrms * 2f64.sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_unfiltered_dc_increases_with_vrms() {
        let mut previous = f64::NEG_INFINITY;
        for vrms in [1.0, 2.0, 5.0, 9.0, 24.0] {
            let m = compute_measurements(&CircuitConfig::new().with_input_voltage_rms(vrms));
            assert!(m.dc_output_voltage > previous);
            previous = m.dc_output_voltage;
        }
    }

    #[test]
    fn test_unfiltered_dc_ignores_load_and_capacitance() {
        let base = compute_measurements(&config(Topology::WithoutFilter));
        let other = compute_measurements(
            &config(Topology::WithoutFilter)
                .with_load_resistance(47.0)
                .with_capacitance_micro_farads(4700.0),
        );
        assert_eq!(base, other);
    }

    #[test]
    fn test_constants_independent_of_inputs() {
        for (vrms, r, c, f) in [(1.0, 10.0, 1.0, 1.0), (24.0, 1e5, 1e4, 1000.0)] {
            let cfg = CircuitConfig::new()
                .with_input_voltage_rms(vrms)
                .with_load_resistance(r)
                .with_capacitance_micro_farads(c)
                .with_frequency(f);
            let without = compute_measurements(&cfg);
            let with = compute_measurements(&cfg.with_topology(Topology::WithFilter));
            assert_eq!(without.ripple_factor, RIPPLE_FACTOR_UNFILTERED);
            assert_eq!(with.ripple_factor, RIPPLE_FACTOR_FILTERED);
            assert_eq!(without.efficiency_percent, HALF_WAVE_EFFICIENCY_PERCENT);
            assert_eq!(with.efficiency_percent, HALF_WAVE_EFFICIENCY_PERCENT);
        }
    }

    #[test]
    fn test_idempotent() {
        let cfg = config(Topology::WithFilter);
        assert_eq!(compute_measurements(&cfg), compute_measurements(&cfg));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let m = compute_measurements(
            &CircuitConfig::new()
                .with_input_voltage_rms(0.0)
                .with_load_resistance(0.0)
                .with_capacitance_micro_farads(0.0)
                .with_topology(Topology::WithFilter),
        );
        assert!(m.dc_output_voltage < 0.0);
    }

    #[test]
    fn test_readout_formatting() {
        let text = compute_measurements(&config(Topology::WithoutFilter)).to_string();
        assert!(text.contains("Input RMS:      6.00 V"));
        assert!(text.contains("Input Peak:     8.49 V"));
        assert!(text.contains("Output DC:      2.51 V"));
        assert!(text.contains("Ripple Factor:  1.21"));
        assert!(text.contains("Efficiency:     40.6%"));
    }
}
