//! Rendering of model output.
//!
//! The model never draws. A [`Renderer`] receives measurements, waveform
//! samples and the topology to show, and paints them onto whatever target
//! it owns:
//!
//! - [`SvgRenderer`] - standalone SVG documents (schematic and plot)
//! - [`TextRenderer`] - readouts and a box-drawing schematic for terminals

mod plot;
mod svg;
mod text;

pub use plot::{PlotLayout, GRID_COLOR, GRID_COLUMNS, GRID_ROWS, INPUT_COLOR, OUTPUT_COLOR};
pub use svg::{plot_svg, schematic_svg, SvgRenderer, SCHEMATIC_HEIGHT, SCHEMATIC_WIDTH};
pub use text::{ascii_schematic, TextRenderer};

use crate::error::Result;
use crate::model::{CircuitConfig, RectifierMeasurements, Waveform};

/// A drawing target for rectifier output.
pub trait Renderer {
    /// Show the scalar measurements.
    fn render_measurements(&mut self, measurements: &RectifierMeasurements) -> Result<()>;

    /// Plot one frame of input and output samples.
    fn render_waveform(&mut self, waveform: &Waveform) -> Result<()>;

    /// Draw the circuit for `config`, highlighting the diode while it conducts.
    fn render_schematic(&mut self, config: &CircuitConfig, diode_active: bool) -> Result<()>;
}
