//! Windowless backend used for batch runs and CI.

use anyhow::{bail, Result};
use log::{debug, info};
use room_wavefronts_rendering::{
    FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};

/// Presents scenes by logging them instead of drawing.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frame_limit: u64,
}

impl HeadlessBackend {
    /// Creates a backend that treats the run as stuck after `frame_limit` frames.
    ///
    /// Callers size the limit from the clock, which visits
    /// `total_steps + 1` steps before the driver asks to exit.
    pub(crate) fn with_frame_limit(frame_limit: u64) -> Self {
        Self {
            frame_limit: frame_limit.max(1),
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        info!("{window_title}: running headless");

        for presented in 1..=self.frame_limit {
            let control = update_scene(FrameInput::default(), &mut scene);
            debug!(
                "{} | {} sphere(s)",
                scene.time_label(),
                scene.spheres.len()
            );

            if control == FrameControl::Exit {
                info!(
                    "{window_title}: presented {presented} frame(s), final {}",
                    scene.time_label()
                );
                return Ok(());
            }
        }

        bail!(
            "headless run did not finish within {} frames",
            self.frame_limit
        )
    }
}
