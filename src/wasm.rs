//! WASM bindings for the rectifier model.
//!
//! Lets a browser page drive the model and draw with the SVG renderer.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRectifier } from 'rectifier_core';
//!
//! await init();
//!
//! const rect = new WasmRectifier();
//! rect.set_topology('with_filter');
//! rect.set_input_voltage(12);
//!
//! document.getElementById('dcOutput').textContent = rect.dc_output_voltage.toFixed(2) + ' V';
//!
//! rect.start();
//! let last = performance.now();
//! function frame(now) {
//!   rect.tick((now - last) / 1000);
//!   last = now;
//!   plot.innerHTML = rect.plot_svg();
//!   schematic.innerHTML = rect.schematic_svg();
//!   requestAnimationFrame(frame);
//! }
//! requestAnimationFrame(frame);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{ComponentId, Workspace};
use crate::components::ComponentKind;
use crate::config::ControlRanges;
use crate::error::RectifierError;
use crate::model::{compute_measurements, sample_waveform, CircuitConfig, RectifierMeasurements, Topology};
use crate::render::{PlotLayout, SvgRenderer};
use crate::simulation::{self, SimulationState};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

impl From<RectifierError> for JsValue {
    fn from(e: RectifierError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Browser-facing rectifier: a configuration, its animation state and the
/// most recently rendered SVG documents.
#[wasm_bindgen]
pub struct WasmRectifier {
    config: CircuitConfig,
    ranges: ControlRanges,
    state: SimulationState,
    renderer: SvgRenderer,
}

#[wasm_bindgen]
impl WasmRectifier {
    /// Create a rectifier with default settings and an 800x400 plot.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmRectifier, JsValue> {
        Self::with_canvas(800.0, 400.0)
    }

    /// Create a rectifier whose plot targets a canvas of the given size.
    #[wasm_bindgen]
    pub fn with_canvas(width: f64, height: f64) -> Result<WasmRectifier, JsValue> {
        let layout = PlotLayout::new(width, height);
        let mut rect = WasmRectifier {
            config: CircuitConfig::default(),
            ranges: ControlRanges::default(),
            state: SimulationState::new().with_sample_count(layout.sample_count()),
            renderer: SvgRenderer::new(layout),
        };
        rect.redraw()?;
        Ok(rect)
    }

    /// Select the topology: `"with_filter"` or `"without_filter"`.
    #[wasm_bindgen]
    pub fn set_topology(&mut self, topology: &str) -> Result<(), JsValue> {
        self.config.topology = topology.parse::<Topology>()?;
        self.redraw()
    }

    #[wasm_bindgen]
    pub fn set_input_voltage(&mut self, volts_rms: f64) -> Result<(), JsValue> {
        self.config.input_voltage_rms = self.ranges.input_voltage_rms.clamp(volts_rms);
        self.redraw()
    }

    #[wasm_bindgen]
    pub fn set_frequency(&mut self, hz: f64) -> Result<(), JsValue> {
        self.config.frequency_hz = self.ranges.frequency_hz.clamp(hz);
        self.redraw()
    }

    #[wasm_bindgen]
    pub fn set_load_resistance(&mut self, ohms: f64) -> Result<(), JsValue> {
        self.config.load_resistance_ohms = self.ranges.load_resistance_ohms.clamp(ohms);
        self.redraw()
    }

    #[wasm_bindgen]
    pub fn set_capacitance(&mut self, micro_farads: f64) -> Result<(), JsValue> {
        self.config.capacitance_micro_farads = self.ranges.capacitance_micro_farads.clamp(micro_farads);
        self.redraw()
    }

    #[wasm_bindgen]
    pub fn set_diode_drop(&mut self, volts: f64) -> Result<(), JsValue> {
        self.config.diode_forward_drop_volts = self.ranges.diode_forward_drop_volts.clamp(volts);
        self.redraw()
    }

    /// Shift the source phase, in degrees.
    #[wasm_bindgen]
    pub fn set_phase(&mut self, degrees: f64) -> Result<(), JsValue> {
        if !degrees.is_finite() {
            return Err(RectifierError::invalid_setting("phase", degrees, "must be a finite number").into());
        }
        self.config.phase_radians = degrees.to_radians();
        self.redraw()
    }

    #[wasm_bindgen(getter)]
    pub fn phase_degrees(&self) -> f64 {
        self.config.phase_radians.to_degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn peak_voltage(&self) -> f64 {
        self.measurements().peak_voltage
    }

    #[wasm_bindgen(getter)]
    pub fn dc_output_voltage(&self) -> f64 {
        self.measurements().dc_output_voltage
    }

    #[wasm_bindgen(getter)]
    pub fn ripple_factor(&self) -> f64 {
        self.measurements().ripple_factor
    }

    #[wasm_bindgen(getter)]
    pub fn efficiency_percent(&self) -> f64 {
        self.measurements().efficiency_percent
    }

    /// Measurement readout as text.
    #[wasm_bindgen]
    pub fn readout(&self) -> String {
        self.renderer.readout().to_string()
    }

    /// Waveform samples at the current offset, flattened as
    /// `[t0, in0, out0, t1, in1, out1, ...]`.
    ///
    /// Returned to JavaScript as a Float64Array.
    #[wasm_bindgen]
    pub fn waveform_samples(&self, sample_count: usize) -> Vec<f64> {
        sample_waveform(&self.config, self.state.time_offset(), sample_count)
            .iter()
            .flat_map(|p| [p.time, p.input, p.output])
            .collect()
    }

    /// The waveform plot for the current frame.
    #[wasm_bindgen]
    pub fn plot_svg(&self) -> String {
        self.renderer.plot().to_string()
    }

    /// The schematic for the current frame.
    #[wasm_bindgen]
    pub fn schematic_svg(&self) -> String {
        self.renderer.schematic().to_string()
    }

    /// Start the animation. Returns false if it was already running.
    #[wasm_bindgen]
    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.state.stop();
    }

    /// Stop and redraw at time zero.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.state.reset();
        self.redraw()
    }

    /// Advance by `elapsed_seconds` of wall-clock time and redraw.
    #[wasm_bindgen]
    pub fn tick(&mut self, elapsed_seconds: f64) -> Result<(), JsValue> {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(RectifierError::WasmError {
                message: format!("elapsed time must be a non-negative number, got {}", elapsed_seconds),
            }
            .into());
        }
        simulation::tick(&mut self.state, &self.config, elapsed_seconds, &mut self.renderer)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.state.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn time_offset(&self) -> f64 {
        self.state.time_offset()
    }

    fn measurements(&self) -> RectifierMeasurements {
        compute_measurements(&self.config)
    }

    fn redraw(&mut self) -> Result<(), JsValue> {
        simulation::update_measurements(&self.config, &mut self.renderer)?;
        simulation::tick(&mut self.state, &self.config, 0.0, &mut self.renderer)?;
        Ok(())
    }
}

/// Browser-facing circuit builder workspace.
#[wasm_bindgen]
pub struct WasmWorkspace {
    workspace: Workspace,
}

#[wasm_bindgen]
impl WasmWorkspace {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmWorkspace {
        WasmWorkspace {
            workspace: Workspace::new(),
        }
    }

    /// Place a component by type name (`"ac-source"`, `"diode"`, ...).
    /// Returns its id.
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str, x: f64, y: f64) -> Result<u64, JsValue> {
        let kind = kind.parse::<ComponentKind>()?;
        Ok(self.workspace.add_component(kind, x, y).0)
    }

    /// Wire two components by placement index.
    #[wasm_bindgen]
    pub fn add_wire(&mut self, from: usize, to: usize) -> Result<u64, JsValue> {
        Ok(self.workspace.add_wire(from, to)?.0)
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.workspace.clear();
    }

    #[wasm_bindgen]
    pub fn build_half_wave(&mut self) -> Result<(), JsValue> {
        Ok(self.workspace.build_half_wave()?)
    }

    #[wasm_bindgen]
    pub fn build_half_wave_with_filter(&mut self) -> Result<(), JsValue> {
        Ok(self.workspace.build_half_wave_with_filter()?)
    }

    /// Mouse down: select the component under the pointer, if any.
    #[wasm_bindgen]
    pub fn select_at(&mut self, x: f64, y: f64) -> Option<u64> {
        self.workspace.select_at(x, y).map(|id| id.0)
    }

    /// Mouse move: drag the selection. Returns true if anything moved.
    #[wasm_bindgen]
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.workspace.drag_to(x, y)
    }

    /// Mouse up.
    #[wasm_bindgen]
    pub fn release(&mut self) {
        self.workspace.release();
    }

    #[wasm_bindgen]
    pub fn update_property(&mut self, id: u64, property: &str, value: f64) -> Result<(), JsValue> {
        Ok(self.workspace.update_property(ComponentId(id), property, value)?)
    }

    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.workspace.components().len()
    }

    /// Circuit analysis as display text.
    #[wasm_bindgen]
    pub fn analysis(&self) -> String {
        self.workspace.analyze().to_string()
    }

    /// Build a rectifier from the current workspace circuit.
    #[wasm_bindgen]
    pub fn to_rectifier(&self) -> Result<WasmRectifier, JsValue> {
        let config = self.workspace.to_config()?;
        let mut rect = WasmRectifier::new()?;
        rect.config = rect.ranges.clamp(&config);
        rect.redraw()?;
        Ok(rect)
    }
}

impl Default for WasmWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_set_phase_shifts_the_source() {
        let mut rect = WasmRectifier::new().unwrap();
        assert_eq!(rect.phase_degrees(), 0.0);

        rect.set_phase(90.0).unwrap();
        assert_abs_diff_eq!(rect.config.phase_radians, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.phase_degrees(), 90.0, epsilon = 1e-9);

        // At t = 0 a 90 degree source sits at its peak; rows are (time, input, output).
        let samples = rect.waveform_samples(4);
        assert_abs_diff_eq!(samples[1], rect.config.peak_voltage(), epsilon = 1e-9);
    }

    #[test]
    fn test_set_phase_keeps_measurements() {
        let mut rect = WasmRectifier::new().unwrap();
        let before = rect.dc_output_voltage();
        rect.set_phase(-45.0).unwrap();
        assert_eq!(rect.dc_output_voltage(), before);
    }
}
