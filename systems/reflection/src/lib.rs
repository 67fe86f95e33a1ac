#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that mirrors a direct wavefront across the room's walls.
//!
//! Each wall contributes one first-order image source. The image sphere keeps
//! the direct wavefront's radius and level; only its center moves, and only
//! along the axis perpendicular to the wall. Spheres are never clipped to the
//! room volume.

use room_wavefronts_core::{ReflectedWavefront, Room, Wall, Wavefront};

/// Image-source expander for the six planes of a rectangular room.
#[derive(Debug, Default)]
pub struct ReflectionExpander;

impl ReflectionExpander {
    /// Creates a new reflection expander.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the six first-order reflections of `direct` inside `room`.
    ///
    /// Reflections are ordered as [`Wall::ALL`]: x-low, x-high, y-low,
    /// y-high, z-low, z-high.
    #[must_use]
    pub fn compute_reflections(&self, direct: &Wavefront, room: &Room) -> [ReflectedWavefront; 6] {
        Wall::ALL.map(|wall| reflect(direct, room, wall))
    }
}

/// Mirrors `direct` across a single wall of `room`.
#[must_use]
pub fn reflect(direct: &Wavefront, room: &Room, wall: Wall) -> ReflectedWavefront {
    let axis = wall.axis();
    let source_coordinate = axis.component(direct.center);
    let image = image_coordinate(
        room.plane_coordinate(wall),
        source_coordinate,
        source_coordinate,
    );

    ReflectedWavefront {
        wall,
        wavefront: Wavefront::new(
            axis.with_component(direct.center, image),
            direct.radius,
            direct.spl,
        ),
    }
}

/// Image coordinate along the mirrored axis.
///
/// `origin` is the coordinate of the wavefront being mirrored; for a direct
/// wavefront it equals `source`.
#[must_use]
pub fn image_coordinate(plane: f64, source: f64, origin: f64) -> f64 {
    2.0 * (plane - source) + origin
}
