#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for the room wavefront simulator.
//!
//! The world owns the validated room, the ordered source list and the
//! simulation clock. Nothing else in the state changes between steps: the
//! clock is mutated through [`apply`] and every other system reads the world
//! through the [`query`] module.

use room_wavefronts_core::{Command, Event, Room, SimulationClock, Source};

/// Validated scenario advanced one clock step at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    room: Room,
    sources: Vec<Source>,
    clock: SimulationClock,
    driving_frequency: Option<f64>,
}

impl World {
    /// Creates a world from already validated parts.
    ///
    /// `driving_frequency` is carried for callers that display it; it does not
    /// influence any computed geometry or level.
    #[must_use]
    pub fn new(
        room: Room,
        sources: Vec<Source>,
        clock: SimulationClock,
        driving_frequency: Option<f64>,
    ) -> Self {
        Self {
            room,
            sources,
            clock,
            driving_frequency,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdvanceClock { steps } => {
            if world.clock.advance(steps) == 0 {
                return;
            }

            out_events.push(Event::ClockAdvanced {
                step: world.clock.step(),
                time: world.clock.time(),
            });
            if world.clock.is_exhausted() {
                out_events.push(Event::ClockExhausted {
                    step: world.clock.step(),
                });
            }
        }
        Command::RestartClock => {
            world.clock.restart();
            out_events.push(Event::ClockRestarted);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use room_wavefronts_core::{Room, SimulationClock, Source};

    /// Provides read-only access to the enclosure.
    #[must_use]
    pub fn room(world: &World) -> &Room {
        &world.room
    }

    /// Provides the sources in configuration order.
    #[must_use]
    pub fn sources(world: &World) -> &[Source] {
        &world.sources
    }

    /// Provides read-only access to the simulation clock.
    #[must_use]
    pub fn clock(world: &World) -> &SimulationClock {
        &world.clock
    }

    /// Elapsed simulated time in seconds.
    #[must_use]
    pub fn time(world: &World) -> f64 {
        world.clock.time()
    }

    /// Configured driving frequency in Hz, if any.
    #[must_use]
    pub fn driving_frequency(world: &World) -> Option<f64> {
        world.driving_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn world(duration: f64) -> World {
        let room = Room::new(4.0, 3.0, 2.5).expect("valid room");
        let clock = SimulationClock::with_step(0.01, duration).expect("valid clock");
        World::new(
            room,
            vec![Source::new(DVec3::new(1.0, 1.0, 1.0), 100.0)],
            clock,
            Some(250.0),
        )
    }

    #[test]
    fn advance_reports_new_step_and_time() {
        let mut world = world(0.1);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceClock { steps: 3 }, &mut events);

        assert_eq!(query::clock(&world).step(), 3);
        assert_eq!(
            events,
            vec![Event::ClockAdvanced {
                step: 3,
                time: 3.0 * 0.01,
            }]
        );
    }

    #[test]
    fn advance_past_end_reports_exhaustion_once() {
        let mut world = world(0.05);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceClock { steps: 10 }, &mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Event::ClockExhausted { step: 5 });

        events.clear();
        apply(&mut world, Command::AdvanceClock { steps: 1 }, &mut events);
        assert!(events.is_empty(), "exhausted clock must stay silent");
    }

    #[test]
    fn restart_rewinds_to_time_zero() {
        let mut world = world(0.05);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceClock { steps: 4 }, &mut events);
        events.clear();
        apply(&mut world, Command::RestartClock, &mut events);

        assert_eq!(query::time(&world), 0.0);
        assert_eq!(events, vec![Event::ClockRestarted]);
    }

    #[test]
    fn queries_expose_configuration_unchanged() {
        let world = world(0.05);

        assert_eq!(query::room(&world).length(), 4.0);
        assert_eq!(query::sources(&world).len(), 1);
        assert_eq!(query::driving_frequency(&world), Some(250.0));
    }
}
