#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that turns user configuration into a world.
//!
//! Omitted values are filled from an enumerated set of defaults and the
//! result is validated in full before any simulation step runs:
//!
//! * no source list: one source at the room center;
//! * no level list: [`DEFAULT_REFERENCE_SPL`] for every source;
//! * no end time: [`DEFAULT_DURATION`].
//!
//! Explicit lists whose lengths disagree are rejected rather than truncated.

use glam::DVec3;
use log::{info, warn};
use room_wavefronts_core::{
    ConfigError, Room, SimulationClock, SimulationConfig, Source, DEFAULT_DURATION,
    DEFAULT_REFERENCE_SPL,
};
use room_wavefronts_world::World;

/// Resolves defaults and validates a [`SimulationConfig`].
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds a ready-to-run world from `config`.
    pub fn world(&self, config: &SimulationConfig) -> Result<World, ConfigError> {
        let dimensions = config.room.ok_or(ConfigError::MissingRoom)?;
        let room = Room::new(dimensions.length, dimensions.width, dimensions.height)?;
        let sources = resolve_sources(&room, config.sources.as_deref(), config.spl.as_deref())?;

        let duration = config.tmax.unwrap_or(DEFAULT_DURATION);
        let clock = SimulationClock::for_room(&room, duration)?;

        if let Some(frequency) = config.frequency {
            info!("driving frequency {frequency} Hz recorded; it does not affect propagation");
        }
        for (index, source) in sources.iter().enumerate() {
            if !room.contains(source.position()) {
                warn!(
                    "source {index} at {} lies outside the room; its wavefronts may render oddly",
                    source.position()
                );
            }
        }
        info!(
            "room {}x{}x{} m, {} source(s), dt {:.3e} s, {} step(s)",
            room.length(),
            room.width(),
            room.height(),
            sources.len(),
            clock.dt(),
            clock.total_steps().saturating_add(1)
        );

        Ok(World::new(room, sources, clock, config.frequency))
    }
}

/// Pairs source positions with reference levels, filling omitted lists.
pub fn resolve_sources(
    room: &Room,
    positions: Option<&[[f64; 3]]>,
    levels: Option<&[f64]>,
) -> Result<Vec<Source>, ConfigError> {
    let positions: Vec<DVec3> = match positions {
        Some([]) => return Err(ConfigError::EmptySourceList),
        Some(positions) => positions.iter().copied().map(DVec3::from_array).collect(),
        None => {
            info!("no sources configured; placing one at the room center");
            vec![room.center()]
        }
    };

    let levels: Vec<f64> = match levels {
        Some(levels) => levels.to_vec(),
        None => vec![DEFAULT_REFERENCE_SPL; positions.len()],
    };

    if levels.len() != positions.len() {
        return Err(ConfigError::SourceCountMismatch {
            sources: positions.len(),
            levels: levels.len(),
        });
    }

    Ok(positions
        .into_iter()
        .zip(levels)
        .map(|(position, level)| Source::new(position, level))
        .collect())
}
