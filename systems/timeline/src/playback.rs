//! Driver-side pacing that turns per-frame input into clock commands.

use room_wavefronts_core::{Command, Event};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackInput {
    /// Indicates whether the user toggled pause on this frame.
    pub toggle_pause: bool,
    /// Indicates whether the user requested a restart on this frame.
    pub restart: bool,
}

/// Playback state machine advancing the clock once per rendered frame.
#[derive(Clone, Debug)]
pub struct Playback {
    steps_per_frame: u64,
    looping: bool,
    paused: bool,
    finished: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(1, false)
    }
}

impl Playback {
    /// Creates a playing state machine.
    ///
    /// A `steps_per_frame` of zero is treated as one.
    #[must_use]
    pub fn new(steps_per_frame: u64, looping: bool) -> Self {
        Self {
            steps_per_frame: steps_per_frame.max(1),
            looping,
            paused: false,
            finished: false,
        }
    }

    /// Clock steps requested for each rendered frame.
    #[must_use]
    pub const fn steps_per_frame(&self) -> u64 {
        self.steps_per_frame
    }

    /// Reports whether playback is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reports whether the clock reached its end and playback is holding the last frame.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes the world's latest events and the frame's input, queueing clock commands.
    pub fn handle(&mut self, events: &[Event], input: PlaybackInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::ClockExhausted { .. } => self.finished = true,
                Event::ClockRestarted => self.finished = false,
                Event::ClockAdvanced { .. } => {}
            }
        }

        if input.toggle_pause {
            self.paused = !self.paused;
        }

        if input.restart {
            out.push(Command::RestartClock);
            self.finished = false;
            return;
        }

        if self.paused {
            return;
        }

        if self.finished {
            if self.looping {
                out.push(Command::RestartClock);
                self.finished = false;
            }
            return;
        }

        out.push(Command::AdvanceClock {
            steps: self.steps_per_frame,
        });
    }
}
