//! Waveform plot geometry.
//!
//! Maps waveform samples onto a canvas laid out like the simulator page:
//! a 10 x 6 background grid, the time axis across the vertical middle, the
//! voltage axis 50px in from the left, and 10 pixels per volt.

use serde::{Deserialize, Serialize};

use crate::model::WaveformPoint;

/// Stroke colour of the input trace.
pub const INPUT_COLOR: &str = "#3498db";
/// Stroke colour of the output trace.
pub const OUTPUT_COLOR: &str = "#e74c3c";
/// Grid line colour.
pub const GRID_COLOR: &str = "#e0e0e0";

/// Vertical grid divisions.
pub const GRID_COLUMNS: usize = 10;
/// Horizontal grid divisions.
pub const GRID_ROWS: usize = 6;

/// Canvas size and scaling for the waveform plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotLayout {
    /// Canvas width (pixels)
    pub width: f64,
    /// Canvas height (pixels)
    pub height: f64,
    /// Inset of the plot area from the left and right edges (pixels)
    pub margin: f64,
    /// Vertical scale (pixels per volt)
    pub pixels_per_volt: f64,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: 50.0,
            pixels_per_volt: 10.0,
        }
    }
}

impl PlotLayout {
    /// Create a layout for a canvas of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Y coordinate of the time axis.
    pub fn baseline(&self) -> f64 {
        self.height / 2.0
    }

    /// Width of the plot area between the margins.
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// One sample per horizontal pixel of the plot area.
    pub fn sample_count(&self) -> usize {
        self.plot_width().round() as usize
    }

    /// X coordinate of sample `index` out of `count`.
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count == 0 {
            return self.margin;
        }
        self.margin + index as f64 * self.plot_width() / count as f64
    }

    /// Y coordinate of a voltage.
    pub fn y_for(&self, volts: f64) -> f64 {
        self.baseline() - volts * self.pixels_per_volt
    }

    /// Canvas coordinates of the input and output traces for a sample.
    pub fn project(&self, index: usize, count: usize, point: &WaveformPoint) -> ((f64, f64), (f64, f64)) {
        let x = self.x_at(index, count);
        ((x, self.y_for(point.input)), (x, self.y_for(point.output)))
    }

    /// X positions of the vertical grid lines.
    pub fn grid_columns(&self) -> impl Iterator<Item = f64> + '_ {
        (0..GRID_COLUMNS).map(move |k| k as f64 * self.width / GRID_COLUMNS as f64)
    }

    /// Y positions of the horizontal grid lines.
    pub fn grid_rows(&self) -> impl Iterator<Item = f64> + '_ {
        (0..GRID_ROWS).map(move |k| k as f64 * self.height / GRID_ROWS as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = PlotLayout::default();
        assert_eq!(layout.baseline(), 200.0);
        assert_eq!(layout.plot_width(), 700.0);
        assert_eq!(layout.sample_count(), 700);
    }

    #[test]
    fn test_projection() {
        let layout = PlotLayout::default();
        let p = WaveformPoint { time: 0.0, input: 5.0, output: 0.0 };
        let ((xi, yi), (xo, yo)) = layout.project(350, 700, &p);
        assert_eq!(xi, 400.0);
        assert_eq!(xo, 400.0);
        assert_eq!(yi, 150.0);
        assert_eq!(yo, 200.0);
    }

    #[test]
    fn test_grid_lines() {
        let layout = PlotLayout::new(600.0, 300.0);
        let cols: Vec<f64> = layout.grid_columns().collect();
        let rows: Vec<f64> = layout.grid_rows().collect();
        assert_eq!(cols.len(), 10);
        assert_eq!(cols[1], 60.0);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5], 250.0);
    }

    #[test]
    fn test_tiny_canvas() {
        let layout = PlotLayout::new(80.0, 40.0);
        assert_eq!(layout.plot_width(), 0.0);
        assert_eq!(layout.sample_count(), 0);
        assert_eq!(layout.x_at(0, 0), 50.0);
    }
}
