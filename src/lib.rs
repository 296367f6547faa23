//! # Rectifier Core
//!
//! A half-wave rectifier model for interactive educational diagrams.
//!
//! This library provides:
//! - A closed-form rectifier model: peak voltage, DC output, ripple factor
//!   and efficiency, with or without a smoothing capacitor
//! - Time-domain waveform sampling for drawing and animation
//! - A drag-and-drop circuit workspace with quick-build presets
//! - SVG and text renderers behind a [`render::Renderer`] trait
//!
//! ## Architecture
//!
//! - [`model`] - Circuit parameters, measurements and waveform samples
//! - [`components`] - Component kinds and their editable properties
//! - [`circuit`] - Workspace placement, wiring, selection and analysis
//! - [`render`] - Plot geometry and the SVG / text renderers
//! - [`simulation`] - Animation state and the frame tick
//! - [`config`] - TOML configuration and control ranges
//! - [`output`] - Text / JSON / CSV writers (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rectifier measure --filter --voltage 12 --capacitance 470u
//! rectifier plot --offset-ms 5 -o plot.svg
//! ```
//!
//! ### Library
//!
//! ```
//! use rectifier_core::{compute_measurements, sample_waveform, CircuitConfig, Topology};
//!
//! let config = CircuitConfig::default().with_topology(Topology::WithFilter);
//! let m = compute_measurements(&config);
//! assert!((m.dc_output_voltage - 7.385).abs() < 1e-3);
//!
//! let ceiling = m.peak_voltage - config.diode_forward_drop_volts;
//! for (_input, output) in sample_waveform(&config, 0.0, 100).pairs() {
//!     assert!(output <= ceiling + 1e-9);
//! }
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmRectifier } from 'rectifier_core';
//!
//! const rect = new WasmRectifier();
//! rect.tick(1 / 60);
//! svg.innerHTML = rect.plot_svg();
//! ```
//!
//! ## Model
//!
//! With peak voltage `Vm = Vrms * sqrt(2)` and diode drop `Vd`, the
//! unfiltered output follows the positive half cycle less `Vd` and averages
//! `(Vm - Vd) / pi`. With a capacitor the output charges to `Vm - Vd` and
//! decays through the load as `exp(-t / RC)` between peaks.

pub mod circuit;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod simulation;
pub mod units;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use error::{RectifierError, Result};
pub use model::{compute_measurements, sample_waveform, CircuitConfig, RectifierMeasurements, Topology, Waveform};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{WasmRectifier, WasmWorkspace};
