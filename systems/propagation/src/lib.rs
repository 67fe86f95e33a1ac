#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives the direct wavefront of a point source.
//!
//! The wavefront is a sphere centred on the source whose radius grows at the
//! speed of sound. Its level follows the inverse-square law relative to the
//! source's reference level at [`REFERENCE_DISTANCE`].

use room_wavefronts_core::{Source, Wavefront, MIN_RADIUS, REFERENCE_DISTANCE, SPEED_OF_SOUND};

/// Free-field propagation model with inverse-square attenuation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropagationModel {
    speed_of_sound: f64,
}

impl Default for PropagationModel {
    fn default() -> Self {
        Self {
            speed_of_sound: SPEED_OF_SOUND,
        }
    }
}

impl PropagationModel {
    /// Creates a model travelling at [`SPEED_OF_SOUND`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the propagation speed in meters per second.
    #[must_use]
    pub fn with_speed_of_sound(mut self, speed_of_sound: f64) -> Self {
        self.speed_of_sound = speed_of_sound;
        self
    }

    /// Propagation speed in meters per second.
    #[must_use]
    pub const fn speed_of_sound(&self) -> f64 {
        self.speed_of_sound
    }

    /// Distance travelled after `time` seconds.
    #[must_use]
    pub fn radius_at(&self, time: f64) -> f64 {
        self.speed_of_sound * time
    }

    /// Computes the direct wavefront of `source` after `time` seconds.
    ///
    /// Returns `None` while the radius is below [`MIN_RADIUS`]: the level is
    /// singular at the source itself, so no sphere is emitted or classified
    /// until it has a measurable size.
    #[must_use]
    pub fn compute_direct_wavefront(&self, source: &Source, time: f64) -> Option<Wavefront> {
        let radius = self.radius_at(time);
        if radius.is_nan() || radius < MIN_RADIUS {
            return None;
        }

        Some(Wavefront::new(
            source.position(),
            radius,
            level_at_distance(source.reference_spl(), radius),
        ))
    }
}

/// Level in dB at `distance` meters from a source rated `reference_spl` at one meter.
#[must_use]
pub fn level_at_distance(reference_spl: f64, distance: f64) -> f64 {
    reference_spl - 20.0 * (distance / REFERENCE_DISTANCE).log10()
}
