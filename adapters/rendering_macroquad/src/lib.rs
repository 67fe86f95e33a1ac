#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the room wavefront simulator.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Room coordinates are z-up while Macroquad's 3D camera is y-up; every point
//! passes through [`to_macroquad_point`] before drawing. Overlay widgets live
//! in the local `overlay` module.

mod overlay;

use self::overlay::{draw_overlay, OverlayResult};
use anyhow::Result;
use glam::Vec3;
use log::info;
use macroquad::{
    camera::{set_camera, set_default_camera, Camera3D},
    input::{is_key_down, is_key_pressed, KeyCode},
    math::Vec3 as MacroquadVec3,
    models::{draw_cube_wires, draw_sphere_wires},
};
use room_wavefronts_rendering::{
    Color, FrameControl, FrameInput, Presentation, RenderingBackend, RoomPresentation, Scene,
};
use std::time::Duration;

const WINDOW_WIDTH: i32 = 1024;
const WINDOW_HEIGHT: i32 = 768;
const CAMERA_DISTANCE_FACTOR: f32 = 1.6;
const CAMERA_ELEVATION: f32 = 0.45;
const CAMERA_ORBIT_SPEED: f32 = 1.2;

/// Tracks overlay-sourced interactions so they can be merged with keyboard input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayInputState {
    pause_latched: bool,
    restart_latched: bool,
}

impl OverlayInputState {
    /// Returns whether the overlay requested a pause toggle and clears the latch so the
    /// action fires only once.
    pub fn take_pause_toggle(&mut self) -> bool {
        let latched = self.pause_latched;
        self.pause_latched = false;
        latched
    }

    /// Records that the overlay button requested a pause toggle this frame.
    pub fn register_pause_toggle(&mut self) {
        self.pause_latched = true;
    }

    /// Returns whether the overlay requested a restart and clears the latch.
    pub fn take_restart(&mut self) -> bool {
        let latched = self.restart_latched;
        self.restart_latched = false;
        latched
    }

    /// Records that the overlay button requested a restart this frame.
    pub fn register_restart(&mut self) {
        self.restart_latched = true;
    }
}

/// Snapshot of keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the render loop.
    quit_requested: bool,
    /// `Space` toggles pause.
    toggle_pause: bool,
    /// `R` restarts the simulation from time zero.
    restart: bool,
    /// Held arrow keys orbit the camera; negative is clockwise.
    orbit: f32,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let toggle_pause = is_key_pressed(KeyCode::Space);
        let restart = is_key_pressed(KeyCode::R);
        let orbit = match (is_key_down(KeyCode::Left), is_key_down(KeyCode::Right)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        Self {
            quit_requested,
            toggle_pause,
            restart,
            orbit,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut overlay_input = OverlayInputState::default();
            let mut azimuth = -std::f32::consts::FRAC_PI_2;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time().max(0.0);
                azimuth += keyboard.orbit * CAMERA_ORBIT_SPEED * dt_seconds;

                let frame_input = FrameInput {
                    toggle_pause: keyboard.toggle_pause || overlay_input.take_pause_toggle(),
                    restart: keyboard.restart || overlay_input.take_restart(),
                };
                let control = update_scene(frame_input, &mut scene);

                macroquad::window::clear_background(background);

                set_camera(&scene_camera(&scene.room, azimuth));
                draw_room(&scene.room);
                for sphere in &scene.spheres {
                    draw_sphere_wires(
                        to_macroquad_point(sphere.center),
                        sphere.radius,
                        None,
                        to_macroquad_color(sphere.color),
                    );
                }

                set_default_camera();
                let screen_width = macroquad::window::screen_width();
                let OverlayResult {
                    pause_pressed,
                    restart_pressed,
                } = draw_overlay(&mut macroquad::ui::root_ui(), &scene, screen_width);
                if pause_pressed {
                    overlay_input.register_pause_toggle();
                }
                if restart_pressed {
                    overlay_input.register_restart();
                }

                if let Some(per_second) =
                    fps_counter.record_frame(Duration::from_secs_f32(dt_seconds))
                {
                    if show_fps {
                        info!(
                            "FPS: {per_second:.2} | {} sphere(s) at step {}",
                            scene.spheres.len(),
                            scene.step
                        );
                    }
                }

                macroquad::window::next_frame().await;

                if control == FrameControl::Exit {
                    break;
                }
            }
        });

        Ok(())
    }
}

fn scene_camera(room: &RoomPresentation, azimuth: f32) -> Camera3D {
    let target = room.center();
    let position = orbit_position(target, room.diagonal() * CAMERA_DISTANCE_FACTOR, azimuth);

    Camera3D {
        position: to_macroquad_point(position),
        target: to_macroquad_point(target),
        up: MacroquadVec3::new(0.0, 1.0, 0.0),
        ..Camera3D::default()
    }
}

/// Camera position on a circle around `target` in room coordinates (z-up).
fn orbit_position(target: Vec3, distance: f32, azimuth: f32) -> Vec3 {
    let horizontal = distance * CAMERA_ELEVATION.cos();
    target
        + Vec3::new(
            horizontal * azimuth.cos(),
            horizontal * azimuth.sin(),
            distance * CAMERA_ELEVATION.sin(),
        )
}

fn draw_room(room: &RoomPresentation) {
    draw_cube_wires(
        to_macroquad_point(room.center()),
        to_macroquad_point(room.dimensions),
        to_macroquad_color(room.line_color),
    );
}

/// Maps a z-up room point onto Macroquad's y-up frame.
fn to_macroquad_point(point: Vec3) -> MacroquadVec3 {
    MacroquadVec3::new(point.x, point.z, point.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();

        for _ in 0..59 {
            assert!(counter.record_frame(Duration::from_millis(16)).is_none());
        }
        let per_second = counter
            .record_frame(Duration::from_millis(60))
            .expect("one second elapsed");

        assert!((per_second - 60.0).abs() < 0.5, "fps was {per_second}");
        assert!(counter.record_frame(Duration::from_millis(16)).is_none());
    }

    #[test]
    fn room_points_swap_height_onto_vertical_axis() {
        let mapped = to_macroquad_point(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(mapped, MacroquadVec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn orbit_camera_keeps_its_distance_over_a_full_turn() {
        let target = Vec3::new(2.5, 2.5, 1.5);
        let expected_horizontal = 10.0 * CAMERA_ELEVATION.cos();
        let expected_height = 10.0 * CAMERA_ELEVATION.sin();

        for index in 0..64 {
            let azimuth = index as f32 / 64.0 * std::f32::consts::TAU;
            let offset = orbit_position(target, 10.0, azimuth) - target;
            let horizontal = offset.truncate().length();

            assert!(
                (horizontal - expected_horizontal).abs() < 1e-4,
                "azimuth {azimuth}: horizontal offset {horizontal}"
            );
            assert!((offset.z - expected_height).abs() < 1e-4);
            assert!((offset.length() - 10.0).abs() < 1e-4);
        }
    }
}
