#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the room wavefront simulation.

mod args;
mod config;
mod driver;
mod headless;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use room_wavefronts_core::SimulationConfig;
use room_wavefronts_rendering::{Color, Presentation, RenderingBackend, RoomPresentation, Scene};
use room_wavefronts_rendering_macroquad::MacroquadBackend;
use room_wavefronts_system_bootstrap::Bootstrap;
use room_wavefronts_system_timeline::Playback;
use room_wavefronts_world::query;

use crate::{args::Args, driver::Driver, headless::HeadlessBackend};

const WINDOW_TITLE: &str = "Room Wavefronts";
const ROOM_OUTLINE: Color = Color::from_rgb_u8(200, 200, 200);
const BACKGROUND: Color = Color::new(0.05, 0.05, 0.06, 1.0);

/// Entry point for the room wavefronts command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let base = match &args.config {
        Some(path) => config::load(path)?,
        None => SimulationConfig::default(),
    };
    let simulation = config::merge(base, args.overrides());

    let world = Bootstrap
        .world(&simulation)
        .context("invalid simulation configuration")?;

    let room = RoomPresentation::from_room(query::room(&world), ROOM_OUTLINE);
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND, Scene::new(room));
    let playback = Playback::new(args.steps_per_frame, args.looping);

    if args.headless {
        if args.looping {
            info!("--loop has no effect in headless mode; stopping at the final step");
        }
        let frame_limit = query::clock(&world).total_steps().saturating_add(1);
        let mut driver = Driver::new(world, playback, true);
        HeadlessBackend::with_frame_limit(frame_limit)
            .run(presentation, move |input, scene| driver.update(input, scene))
            .context("headless run failed")
    } else {
        let mut driver = Driver::new(world, playback, false);
        MacroquadBackend::new()
            .with_vsync(args.vsync.is_enabled())
            .with_show_fps(args.show_fps)
            .run(presentation, move |input, scene| driver.update(input, scene))
            .context("rendering backend failed")
    }
}
