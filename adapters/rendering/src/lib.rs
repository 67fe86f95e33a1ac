#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for room wavefront adapters.
//!
//! Backends receive a [`Scene`] per frame and own their draw/clear cycle; the
//! simulation never touches drawing state. Scenes are plain data built from a
//! timeline [`Frame`] so any backend, windowed or headless, draws the same
//! geometry.

use anyhow::Result as AnyResult;
use glam::{DVec3, Vec3};
use room_wavefronts_core::{BucketColor, ColorBucket, Room};
use room_wavefronts_system_timeline::{EmittedWavefront, Frame, WavefrontKind};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<BucketColor> for Color {
    fn from(color: BucketColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the adapter detected a pause toggle on this frame.
    pub toggle_pause: bool,
    /// Whether the adapter detected a restart request on this frame.
    pub restart: bool,
}

/// Wire box outlining the room volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomPresentation {
    /// Extents along x, y and z in meters.
    pub dimensions: Vec3,
    /// Color used when drawing the room edges.
    pub line_color: Color,
}

impl RoomPresentation {
    /// Creates a new room outline descriptor.
    ///
    /// Returns an error when any extent is not a positive finite number.
    pub fn new(dimensions: Vec3, line_color: Color) -> std::result::Result<Self, RenderingError> {
        if !dimensions.is_finite() || dimensions.min_element() <= 0.0 {
            return Err(RenderingError::InvalidRoomExtent { dimensions });
        }

        Ok(Self {
            dimensions,
            line_color,
        })
    }

    /// Creates an outline matching a validated room.
    #[must_use]
    pub fn from_room(room: &Room, line_color: Color) -> Self {
        Self {
            dimensions: room.dimensions().as_vec3(),
            line_color,
        }
    }

    /// Geometric center of the outlined volume.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.dimensions * 0.5
    }

    /// Length of the volume's diagonal, useful for framing a camera.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        self.dimensions.length()
    }
}

/// Single sphere to be drawn for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpherePresentation {
    /// Center of the sphere in room coordinates.
    pub center: Vec3,
    /// Radius of the sphere in meters. May be larger than the room.
    pub radius: f32,
    /// Color of the sphere's level band.
    pub color: Color,
    /// Whether the sphere is the direct wavefront or a mirrored copy.
    pub kind: WavefrontKind,
}

impl SpherePresentation {
    /// Creates a new sphere descriptor.
    #[must_use]
    pub const fn new(center: Vec3, radius: f32, color: Color, kind: WavefrontKind) -> Self {
        Self {
            center,
            radius,
            color,
            kind,
        }
    }
}

impl From<&EmittedWavefront> for SpherePresentation {
    fn from(emitted: &EmittedWavefront) -> Self {
        Self::new(
            to_render_space(emitted.wavefront.center),
            emitted.wavefront.radius as f32,
            emitted.bucket.color().into(),
            emitted.kind,
        )
    }
}

fn to_render_space(point: DVec3) -> Vec3 {
    point.as_vec3()
}

/// Legend row describing one level band.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// Human readable band label, for example `90-100 dB`.
    pub label: String,
    /// Color used by spheres in this band.
    pub color: Color,
}

/// Builds legend rows for every band, loudest first.
#[must_use]
pub fn bucket_legend() -> Vec<LegendEntry> {
    ColorBucket::ALL
        .iter()
        .enumerate()
        .map(|(index, bucket)| {
            let ceiling = index
                .checked_sub(1)
                .and_then(|louder| ColorBucket::ALL[louder].lower_bound_db());
            let label = match (bucket.lower_bound_db(), ceiling) {
                (Some(floor), Some(ceiling)) => format!("{floor:.0}-{ceiling:.0} dB"),
                (Some(floor), None) => format!(">= {floor:.0} dB"),
                (None, Some(ceiling)) => format!("< {ceiling:.0} dB"),
                (None, None) => String::from("all levels"),
            };
            LegendEntry {
                label,
                color: bucket.color().into(),
            }
        })
        .collect()
}

/// Scene description combining the room outline and the current spheres.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Outline of the enclosure.
    pub room: RoomPresentation,
    /// Spheres visible on this frame in draw order.
    pub spheres: Vec<SpherePresentation>,
    /// Legend rows describing the level bands.
    pub legend: Vec<LegendEntry>,
    /// Clock step shown by the scene.
    pub step: u64,
    /// Simulated time shown by the scene, in seconds.
    pub time: f64,
    /// Whether playback is paused.
    pub paused: bool,
    /// Whether playback has reached the final step.
    pub finished: bool,
}

impl Scene {
    /// Creates an empty scene at time zero.
    #[must_use]
    pub fn new(room: RoomPresentation) -> Self {
        Self {
            room,
            spheres: Vec::new(),
            legend: bucket_legend(),
            step: 0,
            time: 0.0,
            paused: false,
            finished: false,
        }
    }

    /// Replaces the scene's spheres and clock readout with `frame`'s contents.
    pub fn show_frame(&mut self, frame: &Frame) {
        self.spheres.clear();
        self.spheres
            .extend(frame.wavefronts.iter().map(SpherePresentation::from));
        self.step = frame.step;
        self.time = frame.time;
    }

    /// Text describing the simulated time, for example `t = 12.500 ms`.
    #[must_use]
    pub fn time_label(&self) -> String {
        let mut label = format!("t = {:.3} ms", self.time * 1_000.0);
        if self.paused {
            label.push_str(" (paused)");
        } else if self.finished {
            label.push_str(" (end)");
        }
        label
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Control returned by the scene update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the backend after presenting the current frame.
    Exit,
}

/// Rendering backend capable of presenting wavefront scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives per-frame input captured
    /// by the adapter and rewrites the scene before it is drawn. The backend
    /// clears the previous frame itself before drawing the new one.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Room extents must be positive and finite to draw an outline.
    InvalidRoomExtent {
        /// Provided extents that failed validation.
        dimensions: Vec3,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoomExtent { dimensions } => {
                write!(
                    f,
                    "room extents must be positive and finite (received {dimensions})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
