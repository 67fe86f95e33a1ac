//! Command-line arguments and their translation into configuration overrides.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use room_wavefronts_core::{RoomDimensions, SimulationConfig};

/// Visualise first-order acoustic reflections inside a rectangular room.
#[derive(Debug, Parser)]
#[command(name = "room-wavefronts", version, about, long_about = None)]
pub(crate) struct Args {
    /// TOML file providing defaults for the simulation inputs.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Room length, width and height in meters.
    #[arg(
        long,
        num_args = 3,
        value_names = ["L", "W", "H"],
        allow_negative_numbers = true
    )]
    pub(crate) room: Option<Vec<f64>>,

    /// Driving frequency in Hz. Recorded but does not affect propagation.
    #[arg(long, value_name = "HZ")]
    pub(crate) frequency: Option<f64>,

    /// Source position; repeat for several sources.
    #[arg(
        long = "source",
        value_name = "X,Y,Z",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    pub(crate) sources: Vec<[f64; 3]>,

    /// Reference level at 1 m in dB; repeat once per source.
    #[arg(long = "spl", value_name = "DB", allow_negative_numbers = true)]
    pub(crate) levels: Vec<f64>,

    /// Simulated end time in seconds.
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub(crate) tmax: Option<f64>,

    /// Clock steps advanced per rendered frame.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub(crate) steps_per_frame: u64,

    /// Restart from time zero after the final step instead of holding it.
    #[arg(long = "loop")]
    pub(crate) looping: bool,

    /// Run without a window, logging frame summaries until the final step.
    #[arg(long)]
    pub(crate) headless: bool,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_enum, value_name = "MODE", default_value_t = VsyncMode::On)]
    pub(crate) vsync: VsyncMode,

    /// Log the render loop frame rate once per second.
    #[arg(long)]
    pub(crate) show_fps: bool,
}

/// Vertical synchronisation preference for the windowed backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum VsyncMode {
    /// Wait for the display refresh.
    On,
    /// Present as fast as possible.
    Off,
}

impl VsyncMode {
    pub(crate) const fn is_enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

impl Args {
    /// Inputs given on the command line, with absent flags left unset so the
    /// config file can supply them.
    pub(crate) fn overrides(&self) -> SimulationConfig {
        SimulationConfig {
            room: self.room.as_deref().and_then(room_dimensions),
            frequency: self.frequency,
            sources: (!self.sources.is_empty()).then(|| self.sources.clone()),
            spl: (!self.levels.is_empty()).then(|| self.levels.clone()),
            tmax: self.tmax,
        }
    }
}

fn room_dimensions(values: &[f64]) -> Option<RoomDimensions> {
    match *values {
        [length, width, height] => Some(RoomDimensions {
            length,
            width,
            height,
        }),
        _ => None,
    }
}

fn parse_point(value: &str) -> Result<[f64; 3], String> {
    let components = value
        .split(',')
        .map(|component| {
            component
                .trim()
                .parse::<f64>()
                .map_err(|error| format!("invalid coordinate `{component}`: {error}"))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    match components[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => Err(format!(
            "expected three comma-separated coordinates, received {}",
            components.len()
        )),
    }
}
