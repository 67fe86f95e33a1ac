//! Per-frame glue between rendering backends and the simulation.

use log::{debug, info};
use room_wavefronts_core::{Command, Event};
use room_wavefronts_rendering::{FrameControl, FrameInput, Scene};
use room_wavefronts_system_timeline::{Playback, PlaybackInput, Timeline};
use room_wavefronts_world::{self as world, query, World};

/// Owns the world and playback state for the lifetime of a run.
#[derive(Debug)]
pub(crate) struct Driver {
    world: World,
    timeline: Timeline,
    playback: Playback,
    exit_when_finished: bool,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Driver {
    pub(crate) fn new(world: World, playback: Playback, exit_when_finished: bool) -> Self {
        Self {
            world,
            timeline: Timeline::new(),
            playback,
            exit_when_finished,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Presents the current step, then queues the clock movement for the next frame.
    pub(crate) fn update(&mut self, input: FrameInput, scene: &mut Scene) -> FrameControl {
        let frame = self.timeline.frame(&self.world);
        debug!(
            "step {} at {:.6} s: {} wavefront(s)",
            frame.step,
            frame.time,
            frame.wavefronts.len()
        );
        scene.show_frame(&frame);

        let exhausted = query::clock(&self.world).is_exhausted();
        if exhausted && self.exit_when_finished {
            scene.finished = true;
            return FrameControl::Exit;
        }

        self.playback.handle(
            &self.events,
            PlaybackInput {
                toggle_pause: input.toggle_pause,
                restart: input.restart,
            },
            &mut self.commands,
        );
        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in &self.events {
            match event {
                Event::ClockExhausted { step } => info!("reached final step {step}"),
                Event::ClockRestarted => info!("clock restarted"),
                Event::ClockAdvanced { .. } => {}
            }
        }

        scene.paused = self.playback.is_paused();
        scene.finished = exhausted;
        FrameControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use room_wavefronts_core::{RoomDimensions, SimulationConfig};
    use room_wavefronts_rendering::{Color, RoomPresentation};
    use room_wavefronts_system_bootstrap::Bootstrap;

    fn world() -> World {
        Bootstrap
            .world(&SimulationConfig {
                room: Some(RoomDimensions {
                    length: 5.0,
                    width: 5.0,
                    height: 3.0,
                }),
                tmax: Some(0.001),
                ..SimulationConfig::default()
            })
            .expect("valid config")
    }

    fn scene() -> Scene {
        Scene::new(
            RoomPresentation::new(Vec3::new(5.0, 5.0, 3.0), Color::from_rgb_u8(255, 255, 255))
                .expect("valid room"),
        )
    }

    #[test]
    fn exiting_driver_presents_every_step_once() {
        let world = world();
        let total_steps = query::clock(&world).total_steps();
        let mut driver = Driver::new(world, Playback::new(1, false), true);
        let mut scene = scene();
        let mut presented = Vec::new();

        loop {
            let control = driver.update(FrameInput::default(), &mut scene);
            presented.push(scene.step);
            if control == FrameControl::Exit {
                break;
            }
        }

        let expected: Vec<u64> = (0..=total_steps).collect();
        assert_eq!(presented, expected);
        assert!(scene.finished);
        assert_eq!(scene.spheres.len(), 7);
    }

    #[test]
    fn paused_driver_holds_the_current_step() {
        let mut driver = Driver::new(world(), Playback::new(1, false), false);
        let mut scene = scene();

        let _ = driver.update(FrameInput::default(), &mut scene);
        let _ = driver.update(
            FrameInput {
                toggle_pause: true,
                restart: false,
            },
            &mut scene,
        );
        let held = scene.step;
        for _ in 0..3 {
            let _ = driver.update(FrameInput::default(), &mut scene);
            assert_eq!(scene.step, held);
            assert!(scene.paused);
        }
    }

    #[test]
    fn restart_rewinds_to_step_zero() {
        let mut driver = Driver::new(world(), Playback::new(2, false), false);
        let mut scene = scene();
        for _ in 0..4 {
            let _ = driver.update(FrameInput::default(), &mut scene);
        }
        assert!(scene.step > 0);

        let _ = driver.update(
            FrameInput {
                toggle_pause: false,
                restart: true,
            },
            &mut scene,
        );
        let _ = driver.update(FrameInput::default(), &mut scene);

        assert_eq!(scene.step, 0);
        assert!(scene.spheres.is_empty());
    }
}
