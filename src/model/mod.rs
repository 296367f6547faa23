//! The rectifier output model.
//!
//! Pure functions from a [`CircuitConfig`] to scalar measurements and to a
//! sampled waveform. Nothing here holds state between calls; animation
//! state lives in [`crate::simulation::SimulationState`].
//!
//! ## Equations
//!
//! With `Vm = Vrms * sqrt(2)` and diode drop `Vd`:
//!
//! | Topology | DC output | Ripple factor | Efficiency |
//! |----------|-----------|---------------|------------|
//! | without filter | `(Vm - Vd) / π` | 1.21 | 40.6 % |
//! | with filter | `Vm - Vd - 0.5` | 0.48 | 40.6 % |

mod config;
mod measurements;
mod waveform;

pub use config::{
    CircuitConfig, Topology, DEFAULT_CAPACITANCE_MICRO_FARADS, DEFAULT_DIODE_FORWARD_DROP_VOLTS,
    DEFAULT_FREQUENCY_HZ, DEFAULT_INPUT_VOLTAGE_RMS, DEFAULT_LOAD_RESISTANCE_OHMS,
};
pub use measurements::{
    compute_measurements, RectifierMeasurements, FILTER_RIPPLE_ALLOWANCE_VOLTS,
    HALF_WAVE_EFFICIENCY_PERCENT, RIPPLE_FACTOR_FILTERED, RIPPLE_FACTOR_UNFILTERED,
};
pub use waveform::{
    diode_conducts, input_at, sample_waveform, Waveform, WaveformPoint, WaveformSamples,
    WINDOW_PERIODS,
};
