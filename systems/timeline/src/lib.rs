#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-stepped orchestration of the propagation and reflection systems.
//!
//! A [`Frame`] is the complete geometry for one clock step: for every source,
//! in configuration order, the direct wavefront followed by its six
//! reflections in [`Wall::ALL`] order. Frames depend only on the room, the
//! sources and the step's time, so any step can be rebuilt independently.

mod playback;

pub use playback::{Playback, PlaybackInput};

use room_wavefronts_core::{ColorBucket, Room, SimulationClock, Source, Wall, Wavefront};
use room_wavefronts_system_propagation::PropagationModel;
use room_wavefronts_system_reflection::ReflectionExpander;
use room_wavefronts_world::{query, World};

/// Number of geometries emitted per source per step.
pub const WAVEFRONTS_PER_SOURCE: usize = 1 + Wall::ALL.len();

/// Distinguishes the direct sphere from its mirrored copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavefrontKind {
    /// Sphere centred on the source itself.
    Direct,
    /// Sphere centred on the image source behind the given wall.
    Reflected(Wall),
}

/// Single colored sphere ready to be handed to a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmittedWavefront {
    /// Index of the emitting source in configuration order.
    pub source: usize,
    /// Whether the sphere is direct or reflected.
    pub kind: WavefrontKind,
    /// Sphere geometry and level.
    pub wavefront: Wavefront,
    /// Color band chosen from the direct wavefront's level.
    pub bucket: ColorBucket,
}

/// Complete geometry for one clock step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Clock step the frame was built for.
    pub step: u64,
    /// Simulated time of the step in seconds.
    pub time: f64,
    /// Emitted spheres in draw order.
    pub wavefronts: Vec<EmittedWavefront>,
}

/// Builds frames by running propagation then reflection for every source.
#[derive(Debug, Default)]
pub struct Timeline {
    propagation: PropagationModel,
    reflection: ReflectionExpander,
}

impl Timeline {
    /// Creates a timeline using the default propagation model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timeline around a custom propagation model.
    #[must_use]
    pub fn with_propagation(propagation: PropagationModel) -> Self {
        Self {
            propagation,
            reflection: ReflectionExpander::new(),
        }
    }

    /// Builds the frame for the world's current clock step.
    #[must_use]
    pub fn frame(&self, world: &World) -> Frame {
        let clock = query::clock(world);
        self.frame_at(query::room(world), query::sources(world), clock.step(), clock.time())
    }

    /// Builds the frame for an arbitrary step and time.
    #[must_use]
    pub fn frame_at(&self, room: &Room, sources: &[Source], step: u64, time: f64) -> Frame {
        let mut wavefronts = Vec::with_capacity(sources.len() * WAVEFRONTS_PER_SOURCE);
        self.emit(room, sources, time, &mut wavefronts);
        Frame {
            step,
            time,
            wavefronts,
        }
    }

    /// Appends every sphere visible at `time` to `out`.
    ///
    /// Sources whose direct wavefront is still degenerate contribute nothing.
    pub fn emit(
        &self,
        room: &Room,
        sources: &[Source],
        time: f64,
        out: &mut Vec<EmittedWavefront>,
    ) {
        for (index, source) in sources.iter().enumerate() {
            let Some(direct) = self.propagation.compute_direct_wavefront(source, time) else {
                continue;
            };

            let bucket = direct.bucket();
            out.push(EmittedWavefront {
                source: index,
                kind: WavefrontKind::Direct,
                wavefront: direct,
                bucket,
            });
            out.extend(
                self.reflection
                    .compute_reflections(&direct, room)
                    .into_iter()
                    .map(|reflected| EmittedWavefront {
                        source: index,
                        kind: WavefrontKind::Reflected(reflected.wall),
                        wavefront: reflected.wavefront,
                        bucket,
                    }),
            );
        }
    }

    /// Iterates every frame the clock visits, from step zero to its final step.
    ///
    /// The provided clock's current position is ignored.
    pub fn frames<'a>(
        &'a self,
        room: &'a Room,
        sources: &'a [Source],
        clock: &SimulationClock,
    ) -> impl Iterator<Item = Frame> + 'a {
        let clock = *clock;
        (0..=clock.total_steps())
            .map(move |step| self.frame_at(room, sources, step, clock.time_at(step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn degenerate_sources_are_skipped_but_others_emit() {
        let room = Room::new(5.0, 5.0, 3.0).expect("valid room");
        let sources = [Source::new(DVec3::new(1.0, 1.0, 1.0), 100.0)];
        let mut out = Vec::new();

        Timeline::new().emit(&room, &sources, 0.0, &mut out);
        assert!(out.is_empty());

        Timeline::new().emit(&room, &sources, 0.001, &mut out);
        assert_eq!(out.len(), WAVEFRONTS_PER_SOURCE);
    }

    #[test]
    fn reflected_spheres_inherit_direct_bucket() {
        let room = Room::new(5.0, 5.0, 3.0).expect("valid room");
        let sources = [Source::new(room.center(), 110.0)];
        let frame = Timeline::new().frame_at(&room, &sources, 20, 0.01);

        let direct_bucket = frame.wavefronts[0].bucket;
        assert!(frame
            .wavefronts
            .iter()
            .all(|emitted| emitted.bucket == direct_bucket));
    }
}
