//! Output writers for the CLI frontend.
//!
//! Everything is written through a generic [`Write`] so the same code
//! serves stdout and files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RectifierError, Result};
use crate::model::{RectifierMeasurements, Waveform};

/// Format for measurement output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Write the measurement readout in the requested format.
pub fn write_measurements<W: Write + ?Sized>(
    out: &mut W,
    measurements: &RectifierMeasurements,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", measurements),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(measurements)?;
            writeln!(out, "{}", json)
        }
        OutputFormat::Csv => {
            writeln!(out, "metric,value")?;
            writeln!(out, "input_voltage_rms,{}", measurements.input_voltage_rms)?;
            writeln!(out, "peak_voltage,{}", measurements.peak_voltage)?;
            writeln!(out, "dc_output_voltage,{}", measurements.dc_output_voltage)?;
            writeln!(out, "ripple_factor,{}", measurements.ripple_factor)?;
            writeln!(out, "efficiency_percent,{}", measurements.efficiency_percent)
        }
    }
}

/// Write waveform samples as `time,input,output` rows.
pub fn write_waveform_csv<W: Write + ?Sized>(out: &mut W, waveform: &Waveform) -> io::Result<()> {
    writeln!(out, "time,input,output")?;
    for point in waveform {
        writeln!(out, "{:.9},{:.6},{:.6}", point.time, point.input, point.output)?;
    }
    Ok(())
}

/// Write `contents` to `path`, or to stdout when `path` is `None`.
pub fn write_text(path: Option<&Path>, contents: &str) -> Result<()> {
    with_writer(path, |w| w.write_all(contents.as_bytes()))
}

/// Run `body` against a buffered writer for `path` (stdout if `None`).
pub fn with_writer<F>(path: Option<&Path>, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    match path {
        Some(path) => {
            let label = path.display().to_string();
            let file = File::create(path).map_err(|e| RectifierError::output(&label, e))?;
            let mut writer = BufWriter::new(file);
            body(&mut writer)
                .and_then(|_| writer.flush())
                .map_err(|e| RectifierError::output(&label, e))?;
            tracing::info!("Wrote {}", label);
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            body(&mut lock)
                .and_then(|_| lock.flush())
                .map_err(|e| RectifierError::output("<stdout>", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{compute_measurements, sample_waveform, CircuitConfig};

    #[test]
    fn test_measurements_formats() {
        let m = compute_measurements(&CircuitConfig::default());

        let mut text = Vec::new();
        write_measurements(&mut text, &m, OutputFormat::Text).unwrap();
        assert!(String::from_utf8(text).unwrap().contains("Efficiency:     40.6%"));

        let mut json = Vec::new();
        write_measurements(&mut json, &m, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["ripple_factor"], 1.21);

        let mut csv = Vec::new();
        write_measurements(&mut csv, &m, OutputFormat::Csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(csv.lines().count(), 6);
        assert!(csv.starts_with("metric,value\n"));
    }

    #[test]
    fn test_waveform_csv() {
        let waveform = sample_waveform(&CircuitConfig::default(), 0.0, 4);
        let mut out = Vec::new();
        write_waveform_csv(&mut out, &waveform).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "time,input,output");
        assert_eq!(lines[1], "0.000000000,0.000000,0.000000");
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!("rectifier-output-{}.txt", std::process::id()));
        write_text(Some(&path), "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        std::fs::remove_file(&path).unwrap();
    }
}
