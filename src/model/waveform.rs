//! Time-domain waveform sampling.
//!
//! The input is a sine of peak `Vm`. The unfiltered output is the input
//! less the diode drop, clipped at zero. With the filter, the capacitor
//! follows the rectified input while the diode conducts and otherwise
//! discharges through the load:
//!
//!   v[n] = max(v_in[n] - Vd, v[n-1] * exp(-dt / (R * C)), 0)
//!
//! The first filtered sample is seeded with the steady-state capacitor
//! voltage, i.e. the peak discharged over the time since the last input
//! peak, so windows taken at successive offsets line up approximately.
//! The seam is bounded by the sampling step, since the samples miss the
//! exact input peak.

use std::f64::consts::{FRAC_PI_2, PI};
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::config::CircuitConfig;

/// Number of input periods covered by one sampled window.
pub const WINDOW_PERIODS: f64 = 2.0;

/// One sample of the input and rectified output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformPoint {
    /// Sample time (seconds)
    pub time: f64,
    /// Input voltage (volts)
    pub input: f64,
    /// Output voltage across the load (volts)
    pub output: f64,
}

impl From<WaveformPoint> for (f64, f64) {
    fn from(p: WaveformPoint) -> Self {
        (p.input, p.output)
    }
}

/// Instantaneous input voltage at time `t`.
pub fn input_at(config: &CircuitConfig, t: f64) -> f64 {
    config.peak_voltage() * (2.0 * PI * config.frequency_hz * t + config.phase_radians).sin()
}

/// Whether the diode is forward biased by the input at time `t`.
pub fn diode_conducts(config: &CircuitConfig, t: f64) -> bool {
    input_at(config, t) > config.diode_forward_drop_volts
}

/// Sample `sample_count` points spanning [`WINDOW_PERIODS`] input periods,
/// starting at `time_offset` seconds.
///
/// The returned [`Waveform`] is lazy and can be iterated any number of
/// times.
pub fn sample_waveform(config: &CircuitConfig, time_offset: f64, sample_count: usize) -> Waveform {
    Waveform {
        config: *config,
        time_offset,
        sample_count,
    }
}

/// A restartable, finite sequence of waveform samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    config: CircuitConfig,
    time_offset: f64,
    sample_count: usize,
}

impl Waveform {
    /// The configuration the samples are drawn from.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// Time of the first sample (seconds).
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.sample_count
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Spacing between samples (seconds).
    pub fn time_step(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        WINDOW_PERIODS * self.config.period() / self.sample_count as f64
    }

    /// Duration covered by the window (seconds).
    pub fn duration(&self) -> f64 {
        WINDOW_PERIODS * self.config.period()
    }

    /// Iterate from the first sample.
    pub fn iter(&self) -> WaveformSamples {
        let dt = self.time_step();
        let tau = self.config.time_constant();
        let decay = if tau > 0.0 { Some((-dt / tau).exp()) } else { None };

        WaveformSamples {
            config: self.config,
            time_offset: self.time_offset,
            dt,
            index: 0,
            count: self.sample_count,
            decay,
            held: None,
        }
    }

    /// Iterate `(input, output)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> {
        self.iter().map(<(f64, f64)>::from)
    }

    /// Largest and smallest output over the window, if any samples exist.
    pub fn output_range(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, p| match acc {
            None => Some((p.output, p.output)),
            Some((lo, hi)) => Some((lo.min(p.output), hi.max(p.output))),
        })
    }
}

impl IntoIterator for Waveform {
    type Item = WaveformPoint;
    type IntoIter = WaveformSamples;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a Waveform {
    type Item = WaveformPoint;
    type IntoIter = WaveformSamples;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the samples of a [`Waveform`].
#[derive(Debug, Clone)]
pub struct WaveformSamples {
    config: CircuitConfig,
    time_offset: f64,
    dt: f64,
    index: usize,
    count: usize,
    /// Per-sample discharge factor; `None` when there is no usable filter
    decay: Option<f64>,
    /// Capacitor voltage at the previous sample
    held: Option<f64>,
}

impl WaveformSamples {
    /// Steady-state capacitor voltage at time `t`: the peak output
    /// discharged over the time since the most recent input peak.
    fn seed_capacitor(&self, t: f64, tau: f64) -> f64 {
        let period = self.config.period();
        let peak = (self.config.peak_voltage() - self.config.diode_forward_drop_volts).max(0.0);
        let first_peak = (FRAC_PI_2 - self.config.phase_radians) / (2.0 * PI * self.config.frequency_hz);
        let since_peak = (t - first_peak).rem_euclid(period);
        peak * (-since_peak / tau).exp()
    }
}

impl Iterator for WaveformSamples {
    type Item = WaveformPoint;

    fn next(&mut self) -> Option<WaveformPoint> {
        if self.index >= self.count {
            return None;
        }

        let t = self.time_offset + self.index as f64 * self.dt;
        self.index += 1;

        let input = input_at(&self.config, t);
        let rectified = (input - self.config.diode_forward_drop_volts).max(0.0);

        let output = match self.decay {
            None => rectified,
            Some(decay) => {
                let discharged = match self.held {
                    Some(prev) => prev * decay,
                    None => self.seed_capacitor(t, self.config.time_constant()),
                };
                let v = rectified.max(discharged);
                self.held = Some(v);
                v
            }
        };

        Some(WaveformPoint { time: t, input, output })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WaveformSamples {}

impl FusedIterator for WaveformSamples {}
