//! Animation driver.
//!
//! The model is stateless; the only state an animation needs is the
//! current time offset and whether it is running. [`SimulationState`] holds
//! exactly that and is owned by whoever drives the frame loop, which calls
//! [`tick`] once per frame.

use crate::error::Result;
use crate::model::{compute_measurements, diode_conducts, sample_waveform, CircuitConfig, RectifierMeasurements};
use crate::render::Renderer;

/// Default slow-down between wall-clock time and waveform time.
pub const DEFAULT_TIME_DILATION: f64 = 20.0;

/// Default number of samples per frame.
pub const DEFAULT_SAMPLE_COUNT: usize = 700;

/// Animation state owned by the frame loop.
#[derive(Debug, Clone)]
pub struct SimulationState {
    running: bool,
    /// Waveform time of the first sample (seconds)
    time_offset: f64,
    /// Frames advanced since the last reset
    frames: u64,
    /// Samples per rendered frame
    sample_count: usize,
    /// Wall-clock seconds per second of waveform time
    time_dilation: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            running: false,
            time_offset: 0.0,
            frames: 0,
            sample_count: DEFAULT_SAMPLE_COUNT,
            time_dilation: DEFAULT_TIME_DILATION,
        }
    }
}

impl SimulationState {
    /// Create a stopped state at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples per frame.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the wall-clock to waveform time ratio.
    ///
    /// - 1.0: real time (a 50Hz trace is a blur)
    /// - 20.0 (default): slow enough to follow the diode switching
    pub fn with_time_dilation(mut self, time_dilation: f64) -> Self {
        self.time_dilation = time_dilation;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Start animating. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        tracing::info!(time_offset = self.time_offset, "simulation started");
        self.running = true;
        true
    }

    /// Pause without losing the current position.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and return to time zero.
    pub fn reset(&mut self) {
        tracing::info!(frames = self.frames, "simulation reset");
        self.running = false;
        self.time_offset = 0.0;
        self.frames = 0;
    }

    /// Advance waveform time by `elapsed` wall-clock seconds if running.
    pub fn advance(&mut self, elapsed: f64) {
        if !self.running {
            return;
        }
        if self.time_dilation > 0.0 {
            self.time_offset += elapsed / self.time_dilation;
        }
        self.frames += 1;
    }
}

/// Recompute the measurements for a changed configuration and redraw the
/// readout and schematic.
pub fn update_measurements<R: Renderer + ?Sized>(
    config: &CircuitConfig,
    renderer: &mut R,
) -> Result<RectifierMeasurements> {
    let measurements = compute_measurements(config);
    tracing::debug!(
        peak = measurements.peak_voltage,
        dc = measurements.dc_output_voltage,
        "measurements updated"
    );
    renderer.render_measurements(&measurements)?;
    renderer.render_schematic(config, false)?;
    Ok(measurements)
}

/// Run one animation frame: advance the state by `elapsed` wall-clock
/// seconds, then sample and render the waveform at the new offset.
///
/// A stopped state still renders, at its current offset, so the same call
/// redraws after a reset or a control change.
pub fn tick<R: Renderer + ?Sized>(
    state: &mut SimulationState,
    config: &CircuitConfig,
    elapsed: f64,
    renderer: &mut R,
) -> Result<()> {
    state.advance(elapsed);

    let waveform = sample_waveform(config, state.time_offset, state.sample_count);
    renderer.render_waveform(&waveform)?;
    renderer.render_schematic(config, state.running && diode_conducts(config, state.time_offset))?;
    Ok(())
}
