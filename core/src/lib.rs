#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the room wavefront simulator.
//!
//! This crate defines the geometric vocabulary that connects adapters, the
//! authoritative world, and pure systems. The world owns a validated [`Room`],
//! its [`Source`] set and a [`SimulationClock`]; adapters submit [`Command`]
//! values to move the clock and the world answers with [`Event`] values.
//! Systems read immutable snapshots and derive [`Wavefront`] geometry, which is
//! recomputed from scratch on every step and never stored.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Speed of sound in air at room temperature, in meters per second.
pub const SPEED_OF_SOUND: f64 = 343.0;

/// Distance at which a source's reference level is defined, in meters.
pub const REFERENCE_DISTANCE: f64 = 1.0;

/// Reference level assigned to sources when none is configured, in dB.
pub const DEFAULT_REFERENCE_SPL: f64 = 110.0;

/// Simulated duration used when no end time is configured, in seconds.
pub const DEFAULT_DURATION: f64 = 0.05;

/// Radius below which a wavefront is treated as degenerate and not emitted.
pub const MIN_RADIUS: f64 = 1e-6;

/// Number of grid cells spanning the room's largest dimension.
pub const GRID_DIVISIONS: f64 = 100.0;

/// Number of clock steps taken per grid cell.
pub const STEPS_PER_CELL: f64 = 100.0;

/// Slack applied when converting the end time into a whole step count.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Cartesian axis of the room's coordinate frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Axis running along the room's length.
    X,
    /// Axis running along the room's width.
    Y,
    /// Axis running along the room's height.
    Z,
}

impl Axis {
    /// Reads the component of `point` that lies along this axis.
    #[must_use]
    pub fn component(self, point: DVec3) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
            Self::Z => point.z,
        }
    }

    /// Returns `point` with the component along this axis replaced by `value`.
    #[must_use]
    pub fn with_component(self, point: DVec3, value: f64) -> DVec3 {
        match self {
            Self::X => DVec3::new(value, point.y, point.z),
            Self::Y => DVec3::new(point.x, value, point.z),
            Self::Z => DVec3::new(point.x, point.y, value),
        }
    }
}

/// One of the six axis-aligned planes bounding a [`Room`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    /// Plane `x = 0`.
    XLow,
    /// Plane `x = length`.
    XHigh,
    /// Plane `y = 0`.
    YLow,
    /// Plane `y = width`.
    YHigh,
    /// Plane `z = 0`.
    ZLow,
    /// Plane `z = height`.
    ZHigh,
}

impl Wall {
    /// Every wall in emission order.
    pub const ALL: [Wall; 6] = [
        Wall::XLow,
        Wall::XHigh,
        Wall::YLow,
        Wall::YHigh,
        Wall::ZLow,
        Wall::ZHigh,
    ];

    /// Axis the wall is perpendicular to.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::XLow | Self::XHigh => Axis::X,
            Self::YLow | Self::YHigh => Axis::Y,
            Self::ZLow | Self::ZHigh => Axis::Z,
        }
    }

    /// Short lowercase label used in logs and headless output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XLow => "x-low",
            Self::XHigh => "x-high",
            Self::YLow => "y-low",
            Self::YHigh => "y-high",
            Self::ZLow => "z-low",
            Self::ZHigh => "z-high",
        }
    }
}

/// Rectangular enclosure spanning `[0, length] x [0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Room {
    length: f64,
    width: f64,
    height: f64,
}

impl Room {
    /// Creates a room, rejecting non-positive or non-finite dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Result<Self, ConfigError> {
        for (axis, value) in [(Axis::X, length), (Axis::Y, width), (Axis::Z, height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidRoomDimension { axis, value });
            }
        }

        Ok(Self {
            length,
            width,
            height,
        })
    }

    /// Extent along the x axis in meters.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Extent along the y axis in meters.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Extent along the z axis in meters.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Extents packed into a vector.
    #[must_use]
    pub fn dimensions(&self) -> DVec3 {
        DVec3::new(self.length, self.width, self.height)
    }

    /// Largest of the three dimensions.
    #[must_use]
    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    /// Geometric center of the room volume.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.dimensions() * 0.5
    }

    /// Coordinate of `wall` along its own axis.
    #[must_use]
    pub const fn plane_coordinate(&self, wall: Wall) -> f64 {
        match wall {
            Wall::XLow | Wall::YLow | Wall::ZLow => 0.0,
            Wall::XHigh => self.length,
            Wall::YHigh => self.width,
            Wall::ZHigh => self.height,
        }
    }

    /// Determines whether `point` lies inside the room or on its boundary.
    #[must_use]
    pub fn contains(&self, point: DVec3) -> bool {
        let dimensions = self.dimensions();
        point.cmpge(DVec3::ZERO).all() && point.cmple(dimensions).all()
    }
}

/// Omnidirectional point emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Source {
    position: DVec3,
    reference_spl: f64,
}

impl Source {
    /// Creates a source with its level defined at [`REFERENCE_DISTANCE`].
    #[must_use]
    pub const fn new(position: DVec3, reference_spl: f64) -> Self {
        Self {
            position,
            reference_spl,
        }
    }

    /// Location of the emitter in room coordinates.
    #[must_use]
    pub const fn position(&self) -> DVec3 {
        self.position
    }

    /// Sound pressure level measured one meter from the emitter, in dB.
    #[must_use]
    pub const fn reference_spl(&self) -> f64 {
        self.reference_spl
    }
}

/// Integer-stepped simulation clock.
///
/// Time is always derived as `step * dt` so long runs never accumulate
/// floating point drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationClock {
    dt: f64,
    step: u64,
    total_steps: u64,
}

impl SimulationClock {
    /// Creates a clock whose resolution is tied to the room's grid spacing.
    ///
    /// The grid spacing is the largest dimension split into
    /// [`GRID_DIVISIONS`] cells and each cell spans [`STEPS_PER_CELL`] steps.
    pub fn for_room(room: &Room, duration: f64) -> Result<Self, ConfigError> {
        let cell = room.max_dimension() / GRID_DIVISIONS;
        Self::with_step(cell / STEPS_PER_CELL, duration)
    }

    /// Creates a clock with an explicit step size.
    pub fn with_step(dt: f64, duration: f64) -> Result<Self, ConfigError> {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(ConfigError::InvalidDuration { duration });
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidStep { dt });
        }

        let steps = (duration / dt + STEP_COUNT_TOLERANCE).floor();
        if steps >= u64::MAX as f64 {
            return Err(ConfigError::StepCountOverflow { duration, dt });
        }

        let total_steps = steps as u64;
        Ok(Self {
            dt,
            step: 0,
            total_steps,
        })
    }

    /// Fixed step size in seconds.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of the current step.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Index of the final step; the clock visits `0..=total_steps`.
    #[must_use]
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Elapsed simulated time at the current step, in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time_at(self.step)
    }

    /// Simulated time at an arbitrary step index.
    #[must_use]
    pub fn time_at(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }

    /// Reports whether the clock sits on its final step.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.step >= self.total_steps
    }

    /// Moves forward by up to `steps`, stopping at the final step.
    ///
    /// Returns the number of steps actually taken.
    pub fn advance(&mut self, steps: u64) -> u64 {
        let target = self.step.saturating_add(steps).min(self.total_steps);
        let taken = target - self.step;
        self.step = target;
        taken
    }

    /// Rewinds the clock to step zero.
    pub fn restart(&mut self) {
        self.step = 0;
    }
}

/// Spherical wavefront expanding from a center point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wavefront {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius of the sphere in meters.
    pub radius: f64,
    /// Sound pressure level carried by the wavefront, in dB.
    pub spl: f64,
}

impl Wavefront {
    /// Creates a new wavefront descriptor.
    #[must_use]
    pub const fn new(center: DVec3, radius: f64, spl: f64) -> Self {
        Self {
            center,
            radius,
            spl,
        }
    }

    /// Color bucket selected by the wavefront's level.
    #[must_use]
    pub fn bucket(&self) -> ColorBucket {
        ColorBucket::classify(self.spl)
    }
}

/// Wavefront mirrored across a single wall by the image-source construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectedWavefront {
    /// Wall the image source was mirrored across.
    pub wall: Wall,
    /// Geometry of the mirrored sphere.
    pub wavefront: Wavefront,
}

/// RGB triple attached to a [`ColorBucket`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BucketColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl BucketColor {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Discrete level band used to color a wavefront.
///
/// Variants are declared from loudest to quietest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorBucket {
    /// 100 dB and above.
    Extreme,
    /// From 90 dB up to 100 dB.
    VeryLoud,
    /// From 80 dB up to 90 dB.
    Loud,
    /// From 70 dB up to 80 dB.
    Moderate,
    /// From 60 dB up to 70 dB.
    Quiet,
    /// Below 60 dB.
    Faint,
}

impl ColorBucket {
    /// Every bucket ordered from loudest to quietest.
    pub const ALL: [ColorBucket; 6] = [
        ColorBucket::Extreme,
        ColorBucket::VeryLoud,
        ColorBucket::Loud,
        ColorBucket::Moderate,
        ColorBucket::Quiet,
        ColorBucket::Faint,
    ];

    /// Maps a level in dB to exactly one bucket.
    ///
    /// NaN fails every threshold and lands in [`ColorBucket::Faint`].
    #[must_use]
    pub fn classify(spl: f64) -> Self {
        if spl >= 100.0 {
            Self::Extreme
        } else if spl >= 90.0 {
            Self::VeryLoud
        } else if spl >= 80.0 {
            Self::Loud
        } else if spl >= 70.0 {
            Self::Moderate
        } else if spl >= 60.0 {
            Self::Quiet
        } else {
            Self::Faint
        }
    }

    /// Inclusive lower bound of the band, or `None` for the open-ended bottom band.
    #[must_use]
    pub const fn lower_bound_db(self) -> Option<f64> {
        match self {
            Self::Extreme => Some(100.0),
            Self::VeryLoud => Some(90.0),
            Self::Loud => Some(80.0),
            Self::Moderate => Some(70.0),
            Self::Quiet => Some(60.0),
            Self::Faint => None,
        }
    }

    /// Fixed display color of the band.
    #[must_use]
    pub const fn color(self) -> BucketColor {
        match self {
            Self::Extreme => BucketColor::from_rgb(220, 20, 20),
            Self::VeryLoud => BucketColor::from_rgb(255, 140, 0),
            Self::Loud => BucketColor::from_rgb(240, 220, 40),
            Self::Moderate => BucketColor::from_rgb(40, 180, 70),
            Self::Quiet => BucketColor::from_rgb(30, 160, 220),
            Self::Faint => BucketColor::from_rgb(40, 60, 200),
        }
    }
}

/// Room extents as written in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    /// Extent along the x axis in meters.
    pub length: f64,
    /// Extent along the y axis in meters.
    pub width: f64,
    /// Extent along the z axis in meters.
    pub height: f64,
}

/// Partially specified simulation input prior to default resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Room extents; required.
    pub room: Option<RoomDimensions>,
    /// Driving frequency in Hz. Accepted and stored but has no effect on output.
    pub frequency: Option<f64>,
    /// Source positions in room coordinates.
    pub sources: Option<Vec<[f64; 3]>>,
    /// Reference levels in dB, one per source.
    pub spl: Option<Vec<f64>>,
    /// Simulated end time in seconds.
    pub tmax: Option<f64>,
}

/// Validation failures raised before a simulation starts.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// No room extents were provided.
    #[error("room dimensions are required")]
    MissingRoom,
    /// A room extent was zero, negative or not finite.
    #[error("room dimension along {axis:?} must be positive (received {value})")]
    InvalidRoomDimension {
        /// Axis of the rejected extent.
        axis: Axis,
        /// Rejected value.
        value: f64,
    },
    /// The source and level lists disagree in length.
    #[error("{sources} source(s) but {levels} reference level(s) were provided")]
    SourceCountMismatch {
        /// Number of source positions.
        sources: usize,
        /// Number of reference levels.
        levels: usize,
    },
    /// The source list was provided but empty.
    #[error("at least one source is required")]
    EmptySourceList,
    /// The end time was negative or not finite.
    #[error("simulation duration must be a non-negative finite number (received {duration})")]
    InvalidDuration {
        /// Rejected duration in seconds.
        duration: f64,
    },
    /// The derived step size was not positive.
    #[error("clock step must be positive (received {dt})")]
    InvalidStep {
        /// Rejected step size in seconds.
        dt: f64,
    },
    /// The duration holds more steps than the clock can count.
    #[error("simulation duration {duration} s needs too many steps of {dt} s")]
    StepCountOverflow {
        /// Requested duration in seconds.
        duration: f64,
        /// Step size in seconds.
        dt: f64,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the simulation clock forward.
    AdvanceClock {
        /// Number of steps to advance; clamped at the final step.
        steps: u64,
    },
    /// Rewinds the simulation clock to time zero.
    RestartClock,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The clock moved to a new step.
    ClockAdvanced {
        /// Step index after advancing.
        step: u64,
        /// Simulated time after advancing, in seconds.
        time: f64,
    },
    /// The clock reached its final step.
    ClockExhausted {
        /// Index of the final step.
        step: u64,
    },
    /// The clock was rewound to step zero.
    ClockRestarted,
}
