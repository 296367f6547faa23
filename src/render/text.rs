//! Plain-text renderer for terminals.

use std::io::Write;

use crate::error::{RectifierError, Result};
use crate::model::{CircuitConfig, RectifierMeasurements, Topology, Waveform};
use crate::units::{format_micro_farads, format_ohms};

use super::Renderer;

/// Writes readouts and a box-drawing schematic to any [`Write`] sink.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text).map_err(|e| RectifierError::output("<text>", e))
    }
}

/// Vertical box-drawing schematic, top to bottom.
pub fn ascii_schematic(config: &CircuitConfig, diode_active: bool) -> String {
    let diode = if diode_active { "│▶│" } else { "│▷│" };
    let mut lines = vec![
        "AC Source ~".to_string(),
        "│".to_string(),
        format!("│ {}V RMS", config.input_voltage_rms),
        "│".to_string(),
        "┌─┐".to_string(),
        "│ │ Transformer".to_string(),
        "└─┘".to_string(),
        "│".to_string(),
        "┌─┐".to_string(),
        format!("{} Diode (IN4001)", diode),
        "└─┘".to_string(),
        "│".to_string(),
        "┌─┐".to_string(),
        format!("│ │ R = {}", format_ohms(config.load_resistance_ohms)),
        "└─┘".to_string(),
        "│".to_string(),
    ];
    if config.topology == Topology::WithFilter {
        lines.push(format!("┌─┐ C = {}", format_micro_farads(config.capacitance_micro_farads)));
        lines.push("│ │".to_string());
        lines.push("└─┘".to_string());
        lines.push("│".to_string());
    }
    lines.push("─── Ground".to_string());
    lines.join("\n")
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_measurements(&mut self, measurements: &RectifierMeasurements) -> Result<()> {
        self.emit(&measurements.to_string())
    }

    fn render_waveform(&mut self, waveform: &Waveform) -> Result<()> {
        let summary = match waveform.output_range() {
            Some((lo, hi)) => format!(
                "Output {:.2} V to {:.2} V over {} samples ({:.1} ms from t = {:.2} ms)",
                lo,
                hi,
                waveform.len(),
                waveform.duration() * 1e3,
                waveform.time_offset() * 1e3
            ),
            None => "No samples".to_string(),
        };
        self.emit(&summary)
    }

    fn render_schematic(&mut self, config: &CircuitConfig, diode_active: bool) -> Result<()> {
        self.emit(&ascii_schematic(config, diode_active))
    }
}
