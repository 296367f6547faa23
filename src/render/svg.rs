//! SVG renderer.
//!
//! Produces standalone SVG documents for the schematic and the waveform
//! plot. The schematic follows the page's fixed layout: source, transformer,
//! diode and load along a single line, with the capacitor shunted across
//! the load in the filtered topology.

use std::fmt::Write;

use crate::error::Result;
use crate::model::{CircuitConfig, RectifierMeasurements, Topology, Waveform};
use crate::units::{format_micro_farads, format_ohms};

use super::plot::{PlotLayout, GRID_COLOR, INPUT_COLOR, OUTPUT_COLOR};
use super::Renderer;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const INK: &str = "#2c3e50";
const MUTED: &str = "#7f8c8d";
const COIL: &str = "#e67e22";
const CORE: &str = "#95a5a6";
const RESISTOR_BODY: &str = "#f39c12";
const FIRST_BAND: &str = "#8e44ad";
const CAPACITOR_PLATE: &str = "#27ae60";

/// Schematic canvas width (pixels).
pub const SCHEMATIC_WIDTH: f64 = 600.0;
/// Schematic canvas height (pixels).
pub const SCHEMATIC_HEIGHT: f64 = 200.0;

/// Renders into in-memory SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    layout: PlotLayout,
    plot: String,
    schematic: String,
    readout: String,
}

impl SvgRenderer {
    /// Create a renderer for a plot canvas of the given layout.
    pub fn new(layout: PlotLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// The most recently rendered waveform plot.
    pub fn plot(&self) -> &str {
        &self.plot
    }

    /// The most recently rendered schematic.
    pub fn schematic(&self) -> &str {
        &self.schematic
    }

    /// The most recently rendered measurement readout.
    pub fn readout(&self) -> &str {
        &self.readout
    }
}

impl Renderer for SvgRenderer {
    fn render_measurements(&mut self, measurements: &RectifierMeasurements) -> Result<()> {
        self.readout = measurements.to_string();
        Ok(())
    }

    fn render_waveform(&mut self, waveform: &Waveform) -> Result<()> {
        self.plot = plot_svg(&self.layout, waveform)?;
        Ok(())
    }

    fn render_schematic(&mut self, config: &CircuitConfig, diode_active: bool) -> Result<()> {
        self.schematic = schematic_svg(config, diode_active)?;
        Ok(())
    }
}

fn open_document(out: &mut String, width: f64, height: f64) -> Result<()> {
    write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    out.push('\n');
    Ok(())
}

fn line(out: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) -> Result<()> {
    writeln!(
        out,
        r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{width}"/>"#
    )?;
    Ok(())
}

fn text(out: &mut String, x: f64, y: f64, fill: &str, size: u32, content: &str) -> Result<()> {
    writeln!(
        out,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" fill="{fill}" font-size="{size}">{content}</text>"#
    )?;
    Ok(())
}

/// Render the waveform plot for one frame.
pub fn plot_svg(layout: &PlotLayout, waveform: &Waveform) -> Result<String> {
    let (w, h) = (layout.width, layout.height);
    let mut out = String::new();
    open_document(&mut out, w, h)?;
    writeln!(out, r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="white"/>"#)?;

    for x in layout.grid_columns() {
        line(&mut out, x, 0.0, x, h, GRID_COLOR, 1.0)?;
    }
    for y in layout.grid_rows() {
        line(&mut out, 0.0, y, w, y, GRID_COLOR, 1.0)?;
    }

    // Axes
    let m = layout.margin;
    line(&mut out, m, layout.baseline(), w - m, layout.baseline(), "#000", 2.0)?;
    line(&mut out, m, 20.0, m, h - 20.0, "#000", 2.0)?;
    writeln!(out, r#"  <text x="{}" y="{}" font-size="12">Time</text>"#, w - 40.0, layout.baseline() + 20.0)?;
    writeln!(out, r#"  <text x="10" y="15" font-size="12">Voltage (V)</text>"#)?;

    let count = waveform.len();
    let mut input_points = String::new();
    let mut output_points = String::new();
    for (i, point) in waveform.iter().enumerate() {
        let ((xi, yi), (xo, yo)) = layout.project(i, count, &point);
        write!(input_points, "{:.2},{:.2} ", xi, yi)?;
        write!(output_points, "{:.2},{:.2} ", xo, yo)?;
    }
    writeln!(
        out,
        r#"  <polyline class="trace-input" fill="none" stroke="{INPUT_COLOR}" stroke-width="2" points="{}"/>"#,
        input_points.trim_end()
    )?;
    writeln!(
        out,
        r#"  <polyline class="trace-output" fill="none" stroke="{OUTPUT_COLOR}" stroke-width="2" points="{}"/>"#,
        output_points.trim_end()
    )?;

    // Legend
    writeln!(out, r#"  <rect x="{}" y="20" width="20" height="10" fill="{INPUT_COLOR}"/>"#, w - 150.0)?;
    writeln!(out, r#"  <text x="{}" y="30" font-size="12">Input AC</text>"#, w - 120.0)?;
    writeln!(out, r#"  <rect x="{}" y="40" width="20" height="10" fill="{OUTPUT_COLOR}"/>"#, w - 150.0)?;
    writeln!(out, r#"  <text x="{}" y="50" font-size="12">Output DC</text>"#, w - 120.0)?;

    out.push_str("</svg>\n");
    Ok(out)
}

fn ac_source(out: &mut String, x: f64, y: f64, width: f64, height: f64, volts_rms: f64) -> Result<()> {
    writeln!(out, r#"  <g class="component" id="ac-source">"#)?;
    writeln!(
        out,
        r#"  <path d="M{x},{y} C{},{} {},{} {},{y}" stroke="{INPUT_COLOR}" stroke-width="3" fill="none"/>"#,
        x + width / 4.0,
        y - height / 2.0,
        x + 3.0 * width / 4.0,
        y + height / 2.0,
        x + width,
    )?;
    writeln!(
        out,
        r#"  <text x="{}" y="{}" text-anchor="middle" fill="{INK}" font-weight="bold">AC Source</text>"#,
        x + width / 2.0,
        y - 20.0
    )?;
    text(out, x + width / 2.0, y - 5.0, MUTED, 12, &format!("{}V RMS", volts_rms))?;
    writeln!(out, "  </g>")?;
    Ok(())
}

fn transformer(out: &mut String, x: f64, y: f64, width: f64, height: f64, volts_rms: f64) -> Result<()> {
    writeln!(out, r#"  <g class="component" id="transformer">"#)?;
    for i in 0..4 {
        let yi = y + i as f64 * height / 3.0;
        line(out, x, yi, x + width / 2.0, yi, COIL, 2.0)?;
    }
    writeln!(
        out,
        r#"  <rect x="{}" y="{y}" width="4" height="{height}" fill="{CORE}"/>"#,
        x + width / 2.0 - 2.0
    )?;
    for i in 0..4 {
        let yi = y + i as f64 * height / 3.0;
        line(out, x + width / 2.0 + 4.0, yi, x + width, yi, COIL, 2.0)?;
    }
    text(out, x + width / 2.0, y + height + 15.0, INK, 12, &format!("{v}-0-{v}V", v = volts_rms))?;
    writeln!(out, "  </g>")?;
    Ok(())
}

fn diode(out: &mut String, x: f64, y: f64, width: f64, height: f64, active: bool) -> Result<()> {
    let class = if active { "component diode-active" } else { "component" };
    writeln!(out, r#"  <g class="{class}" id="D1">"#)?;
    writeln!(
        out,
        r##"  <polygon points="{x},{} {},{y} {x},{}" fill="#ecf0f1" stroke="{INK}" stroke-width="2"/>"##,
        y - height / 2.0,
        x + width,
        y + height / 2.0
    )?;
    line(out, x, y - height / 2.0, x, y + height / 2.0, INK, 2.0)?;
    line(out, x - 5.0, y + height / 2.0, x + 5.0, y + height / 2.0, INK, 2.0)?;
    text(out, x + width / 2.0, y - height / 2.0 - 10.0, INK, 12, "IN4001")?;
    writeln!(out, "  </g>")?;
    Ok(())
}

fn resistor(out: &mut String, x: f64, y: f64, width: f64, height: f64, ohms: f64) -> Result<()> {
    writeln!(out, r#"  <g class="component" id="R_L">"#)?;
    writeln!(
        out,
        r#"  <rect x="{x}" y="{}" width="{width}" height="{height}" fill="{RESISTOR_BODY}" stroke="{INK}" stroke-width="2" rx="5"/>"#,
        y - height / 2.0
    )?;
    let bands = 4;
    let band_width = width / (bands as f64 + 1.0);
    for i in 1..=bands {
        let fill = if i == 1 { FIRST_BAND } else { INK };
        writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="2" height="{height}" fill="{fill}"/>"#,
            x + i as f64 * band_width,
            y - height / 2.0
        )?;
    }
    text(out, x + width / 2.0, y - height / 2.0 - 10.0, INK, 12, &format_ohms(ohms))?;
    writeln!(out, "  </g>")?;
    Ok(())
}

fn capacitor(out: &mut String, x: f64, y: f64, width: f64, height: f64, micro_farads: f64, charging: bool) -> Result<()> {
    let class = if charging {
        "component capacitor-charging"
    } else {
        "component capacitor-discharging"
    };
    writeln!(out, r#"  <g class="{class}" id="C1">"#)?;
    line(out, x, y - height / 2.0, x, y + height / 2.0, CAPACITOR_PLATE, 3.0)?;
    line(out, x + width, y - height / 2.0, x + width, y + height / 2.0, CAPACITOR_PLATE, 3.0)?;
    text(out, x + width / 2.0, y - height / 2.0 - 10.0, INK, 12, &format_micro_farads(micro_farads))?;
    writeln!(out, "  </g>")?;
    Ok(())
}

fn ground(out: &mut String, x: f64, y: f64, size: f64) -> Result<()> {
    writeln!(out, r#"  <g id="ground">"#)?;
    for i in 0..3 {
        let i = i as f64;
        line(
            out,
            x - size + i * size / 2.0,
            y + i * size / 2.0,
            x + size - i * size / 2.0,
            y + i * size / 2.0,
            INK,
            2.0,
        )?;
    }
    writeln!(out, "  </g>")?;
    Ok(())
}

/// Render the circuit schematic for a configuration.
///
/// `diode_active` highlights the diode (and marks the capacitor as
/// charging) for the conducting half-cycle.
pub fn schematic_svg(config: &CircuitConfig, diode_active: bool) -> Result<String> {
    let mut out = String::new();
    open_document(&mut out, SCHEMATIC_WIDTH, SCHEMATIC_HEIGHT)?;

    let vrms = config.input_voltage_rms;
    ac_source(&mut out, 100.0, 100.0, 60.0, 30.0, vrms)?;
    transformer(&mut out, 200.0, 80.0, 40.0, 60.0, vrms)?;
    diode(&mut out, 300.0, 100.0, 40.0, 20.0, diode_active)?;

    match config.topology {
        Topology::WithoutFilter => {
            resistor(&mut out, 400.0, 100.0, 40.0, 20.0, config.load_resistance_ohms)?;
            ground(&mut out, 500.0, 120.0, 20.0)?;

            line(&mut out, 100.0, 115.0, 200.0, 115.0, INK, 2.0)?;
            line(&mut out, 240.0, 115.0, 280.0, 115.0, INK, 2.0)?;
            line(&mut out, 340.0, 115.0, 380.0, 115.0, INK, 2.0)?;
            line(&mut out, 440.0, 115.0, 500.0, 115.0, INK, 2.0)?;
            line(&mut out, 100.0, 85.0, 200.0, 85.0, INK, 2.0)?;
            line(&mut out, 240.0, 85.0, 500.0, 85.0, INK, 2.0)?;
        }
        Topology::WithFilter => {
            resistor(&mut out, 450.0, 100.0, 40.0, 20.0, config.load_resistance_ohms)?;
            capacitor(
                &mut out,
                380.0,
                80.0,
                30.0,
                40.0,
                config.capacitance_micro_farads,
                diode_active,
            )?;
            ground(&mut out, 520.0, 120.0, 20.0)?;

            line(&mut out, 100.0, 115.0, 200.0, 115.0, INK, 2.0)?;
            line(&mut out, 240.0, 115.0, 280.0, 115.0, INK, 2.0)?;
            line(&mut out, 340.0, 115.0, 450.0, 115.0, INK, 2.0)?;
            line(&mut out, 490.0, 115.0, 520.0, 115.0, INK, 2.0)?;
            line(&mut out, 100.0, 85.0, 200.0, 85.0, INK, 2.0)?;
            line(&mut out, 240.0, 85.0, 520.0, 85.0, INK, 2.0)?;
            line(&mut out, 380.0, 115.0, 380.0, 85.0, INK, 2.0)?;
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{compute_measurements, sample_waveform};

    #[test]
    fn test_schematic_without_filter() {
        let svg = schematic_svg(&CircuitConfig::default(), false).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("6V RMS"));
        assert!(svg.contains("6-0-6V"));
        assert!(svg.contains("IN4001"));
        assert!(svg.contains("1kΩ"));
        assert!(!svg.contains("id=\"C1\""));
        assert!(!svg.contains("diode-active"));
    }

    #[test]
    fn test_schematic_with_filter_and_active_diode() {
        let config = CircuitConfig::default()
            .with_topology(Topology::WithFilter)
            .with_capacitance_micro_farads(470.0);
        let svg = schematic_svg(&config, true).unwrap();
        assert!(svg.contains("id=\"C1\""));
        assert!(svg.contains("470μF"));
        assert!(svg.contains("class=\"component diode-active\""));
        assert!(svg.contains("capacitor-charging"));
        // shunt wire to the capacitor
        assert!(svg.contains(r#"x1="380" y1="115" x2="380" y2="85""#));
    }

    #[test]
    fn test_plot_contains_both_traces() {
        let layout = PlotLayout::default();
        let waveform = sample_waveform(&CircuitConfig::default(), 0.0, layout.sample_count());
        let svg = plot_svg(&layout, &waveform).unwrap();
        assert!(svg.contains("trace-input"));
        assert!(svg.contains("trace-output"));
        assert!(svg.contains("Input AC"));
        assert!(svg.contains("Output DC"));
        // first input sample sits on the baseline at the left margin
        assert!(svg.contains(r#"points="50.00,200.00 "#));
    }

    #[test]
    fn test_renderer_keeps_last_frame() {
        let config = CircuitConfig::default();
        let mut renderer = SvgRenderer::new(PlotLayout::new(400.0, 200.0));
        renderer.render_measurements(&compute_measurements(&config)).unwrap();
        renderer.render_waveform(&sample_waveform(&config, 0.0, 300)).unwrap();
        renderer.render_schematic(&config, false).unwrap();

        assert!(renderer.readout().contains("Output DC"));
        assert!(renderer.plot().contains("width=\"400\""));
        assert!(renderer.schematic().contains("AC Source"));
    }
}
