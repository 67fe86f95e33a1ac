//! Screen-space overlay for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` and 2D text drawing so the
//! rest of the adapter only deals with the 3D scene. The overlay shows the
//! clock readout, the level legend and the playback buttons.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    shapes::draw_rectangle,
    text::draw_text,
    ui::{hash, Ui},
};
use room_wavefronts_rendering::{LegendEntry, Scene};

use crate::to_macroquad_color;

const PANEL_MARGIN: f32 = 12.0;
const PANEL_WIDTH: f32 = 200.0;
const PANEL_HEIGHT: f32 = 96.0;
const LEGEND_ROW_HEIGHT: f32 = 22.0;
const LEGEND_SWATCH: f32 = 14.0;
const FONT_SIZE: f32 = 22.0;

/// Outcome of drawing the overlay during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct OverlayResult {
    /// Whether the pause button was pressed during this frame.
    pub pause_pressed: bool,
    /// Whether the restart button was pressed during this frame.
    pub restart_pressed: bool,
}

/// Draws the clock readout and legend, then the playback panel.
///
/// Must be called with the default 2D camera active.
pub(crate) fn draw_overlay(ui: &mut Ui, scene: &Scene, screen_width: f32) -> OverlayResult {
    let _ = draw_text(
        &scene.time_label(),
        PANEL_MARGIN,
        PANEL_MARGIN + FONT_SIZE,
        FONT_SIZE,
        WHITE,
    );
    draw_legend(&scene.legend, PANEL_MARGIN, PANEL_MARGIN + 2.0 * FONT_SIZE);

    draw_playback_panel(
        ui,
        Vec2::new(screen_width - PANEL_WIDTH - PANEL_MARGIN, PANEL_MARGIN),
        scene.paused,
    )
}

fn draw_legend(legend: &[LegendEntry], x: f32, top: f32) {
    for (row, entry) in legend.iter().enumerate() {
        let y = top + row as f32 * LEGEND_ROW_HEIGHT;
        draw_rectangle(
            x,
            y,
            LEGEND_SWATCH,
            LEGEND_SWATCH,
            to_macroquad_color(entry.color),
        );
        let _ = draw_text(
            &entry.label,
            x + LEGEND_SWATCH + 8.0,
            y + LEGEND_SWATCH,
            FONT_SIZE * 0.8,
            WHITE,
        );
    }
}

fn draw_playback_panel(ui: &mut Ui, origin: Vec2, paused: bool) -> OverlayResult {
    let background = Color::from_rgba(24, 24, 28, 220);
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(background)
        .color_hovered(background)
        .color_clicked(background)
        .color_inactive(background)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();
    skin.window_style = window_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(0.0, 0.0, 6.0, 6.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = OverlayResult::default();
    let _ = ui.window(
        hash!("playback_panel"),
        origin,
        Vec2::new(PANEL_WIDTH, PANEL_HEIGHT),
        |ui| {
            let pause_label = if paused { "Resume (Space)" } else { "Pause (Space)" };
            result.pause_pressed = ui.button(None, pause_label);
            result.restart_pressed = ui.button(None, "Restart (R)");
        },
    );

    ui.pop_skin();

    result
}
