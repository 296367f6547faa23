//! Rectifier - Half-Wave Rectifier Explorer
//!
//! Computes measurements and draws waveforms and schematics for a half-wave
//! rectifier, with or without a smoothing capacitor.
//!
//! # Usage
//!
//! ```bash
//! rectifier measure --filter --voltage 12 --capacitance 470u
//! rectifier waveform --samples 500 -o waveform.csv
//! rectifier animate --frames 60 -o frames/
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rectifier_core::{
    circuit::Workspace,
    config::{AppConfig, ControlRanges},
    error::{RectifierError, Result},
    model::{compute_measurements, diode_conducts, sample_waveform, CircuitConfig, Topology},
    output::{self, OutputFormat},
    render::{ascii_schematic, plot_svg, schematic_svg, PlotLayout, Renderer, SvgRenderer, TextRenderer},
    simulation::{self, SimulationState},
    units,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Half-wave rectifier explorer
#[derive(Parser, Debug)]
#[command(name = "rectifier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file supplying defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Circuit overrides shared by every subcommand that evaluates the model.
#[derive(Args, Debug)]
struct CircuitArgs {
    /// Add the smoothing capacitor
    #[arg(long)]
    filter: bool,

    /// Input voltage (V RMS), e.g. 6 or 12
    #[arg(long, value_parser = parse_number)]
    voltage: Option<f64>,

    /// Input frequency (Hz), e.g. 50 or 1k
    #[arg(long, value_parser = parse_number)]
    frequency: Option<f64>,

    /// Load resistance (ohms), e.g. 1k or 470
    #[arg(long, value_parser = parse_number)]
    resistance: Option<f64>,

    /// Filter capacitance: 100u, 2.2m, or a bare number of microfarads
    #[arg(long, value_parser = parse_capacitance)]
    capacitance: Option<f64>,

    /// Diode forward drop (V)
    #[arg(long, value_parser = parse_number)]
    diode_drop: Option<f64>,

    /// Source phase (degrees)
    #[arg(long, value_parser = parse_number, allow_hyphen_values = true)]
    phase: Option<f64>,
}

impl CircuitArgs {
    fn apply(&self, base: CircuitConfig) -> CircuitConfig {
        let mut config = base;
        if self.filter {
            config.topology = Topology::WithFilter;
        }
        if let Some(v) = self.voltage {
            config.input_voltage_rms = v;
        }
        if let Some(f) = self.frequency {
            config.frequency_hz = f;
        }
        if let Some(r) = self.resistance {
            config.load_resistance_ohms = r;
        }
        if let Some(c) = self.capacitance {
            config.capacitance_micro_farads = c;
        }
        if let Some(vd) = self.diode_drop {
            config.diode_forward_drop_volts = vd;
        }
        if let Some(deg) = self.phase {
            config.phase_radians = deg.to_radians();
        }
        config
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Source, diode, load and ground
    HalfWave,
    /// Half-wave with a smoothing capacitor
    HalfWaveFilter,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rectifier measurements
    Measure {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write waveform samples as CSV (time,input,output)
    Waveform {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Number of samples
        #[arg(short, long, default_value_t = 700)]
        samples: usize,

        /// Time of the first sample (ms)
        #[arg(long, default_value_t = 0.0)]
        offset_ms: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draw the circuit schematic
    Diagram {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Draw the diode as conducting
        #[arg(long)]
        active: bool,

        /// Box-drawing text instead of SVG
        #[arg(long)]
        ascii: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draw the waveform plot as SVG
    Plot {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Time of the first sample (ms)
        #[arg(long, default_value_t = 0.0)]
        offset_ms: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render animation frames of the waveform plot
    Animate {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Number of frames (overrides the config file)
        #[arg(long)]
        frames: Option<usize>,

        /// Frames per second (overrides the config file)
        #[arg(long)]
        fps: Option<f64>,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        output: PathBuf,
    },

    /// Lay out a preset circuit and analyze it
    Build {
        /// Circuit preset
        #[arg(value_enum)]
        preset: Preset,

        /// Output format for the measurements
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn parse_number(text: &str) -> std::result::Result<f64, String> {
    units::parse_value_strict(text).map_err(|e| e.to_string())
}

fn parse_capacitance(text: &str) -> std::result::Result<f64, String> {
    units::parse_micro_farads(text).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let app = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Measure { circuit, format } => {
            let config = resolve(&app, &circuit)?;
            let measurements = compute_measurements(&config);
            output::with_writer(None, |w| output::write_measurements(w, &measurements, format))?;
        }
        Commands::Waveform {
            circuit,
            samples,
            offset_ms,
            output,
        } => {
            let config = resolve(&app, &circuit)?;
            let waveform = sample_waveform(&config, offset_ms * 1e-3, samples);
            output::with_writer(output.as_deref(), |w| output::write_waveform_csv(w, &waveform))?;
        }
        Commands::Diagram {
            circuit,
            active,
            ascii,
            output,
        } => {
            let config = resolve(&app, &circuit)?;
            if ascii {
                let mut text = ascii_schematic(&config, active);
                text.push('\n');
                output::write_text(output.as_deref(), &text)?;
            } else {
                output::write_text(output.as_deref(), &schematic_svg(&config, active)?)?;
            }
        }
        Commands::Plot {
            circuit,
            offset_ms,
            output,
        } => {
            let config = resolve(&app, &circuit)?;
            let layout = app.display;
            let waveform = sample_waveform(&config, offset_ms * 1e-3, layout.sample_count());
            output::write_text(output.as_deref(), &plot_svg(&layout, &waveform)?)?;
        }
        Commands::Animate {
            circuit,
            frames,
            fps,
            output,
        } => {
            let config = resolve(&app, &circuit)?;
            let mut animation = app.animation;
            if let Some(frames) = frames {
                animation.frames = frames;
            }
            if let Some(fps) = fps {
                animation.fps = fps;
            }
            animate(&config, app.display, animation.frames, animation.frame_interval(), animation.time_dilation, &output)?;
        }
        Commands::Build { preset, format } => {
            build(preset, format)?;
        }
    }

    Ok(())
}

/// Merge config file and flags, then clamp into the control ranges.
fn resolve(app: &AppConfig, args: &CircuitArgs) -> Result<CircuitConfig> {
    let config = args.apply(app.circuit);
    let ranges = ControlRanges::default();
    ranges.check_finite(&config)?;
    Ok(ranges.clamp(&config))
}

fn animate(
    config: &CircuitConfig,
    layout: PlotLayout,
    frames: usize,
    frame_interval: f64,
    time_dilation: f64,
    dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| RectifierError::output(dir.display().to_string(), e))?;

    let mut state = SimulationState::new()
        .with_sample_count(layout.sample_count())
        .with_time_dilation(time_dilation);
    let mut renderer = SvgRenderer::new(layout);

    simulation::update_measurements(config, &mut renderer)?;
    output::write_text(Some(&dir.join("schematic.svg")), renderer.schematic())?;

    // Frame 0 is drawn before the clock starts.
    simulation::tick(&mut state, config, 0.0, &mut renderer)?;
    state.start();
    for frame in 0..frames {
        if frame > 0 {
            simulation::tick(&mut state, config, frame_interval, &mut renderer)?;
        }
        let path = dir.join(format!("frame_{:04}.svg", frame));
        output::write_text(Some(&path), renderer.plot())?;
        tracing::debug!(
            frame,
            time_offset = state.time_offset(),
            diode = diode_conducts(config, state.time_offset()),
            "rendered frame"
        );
    }

    println!("Wrote {} frames to {}", frames, dir.display());
    Ok(())
}

fn build(preset: Preset, format: OutputFormat) -> Result<()> {
    let mut workspace = Workspace::new();
    match preset {
        Preset::HalfWave => workspace.build_half_wave()?,
        Preset::HalfWaveFilter => workspace.build_half_wave_with_filter()?,
    }

    let analysis = workspace.analyze();
    println!("{}", analysis);
    println!();
    for placed in workspace.components() {
        println!("  [{}] {} at ({}, {})", placed.id, placed.component.label(), placed.position.x, placed.position.y);
    }
    println!();

    let config = ControlRanges::default().clamp(&workspace.to_config()?);
    let stdout = std::io::stdout();
    let mut renderer = TextRenderer::new(stdout.lock());
    renderer.render_schematic(&config, false)?;
    drop(renderer);

    println!();
    let measurements = compute_measurements(&config);
    output::with_writer(None, |w| output::write_measurements(w, &measurements, format))?;
    Ok(())
}
