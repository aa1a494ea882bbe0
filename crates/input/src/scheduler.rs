//! Fixed-rate tick pacing and button sampling.
//!
//! The firmware's loop is "tick, then wait out the window". Where the buttons
//! are read inside that window is the only thing the modes change:
//!
//! - `SinglePoll`: one poll at the start of each tick. A press that begins
//!   and ends during the wait is never seen.
//! - `Accumulate`: the wait is cut into slices and the buttons are polled
//!   after each one; any press seen is latched until the next tick reads it.

use log::trace;

use crate::debounce::Debounce;
use crate::types::{Buttons, Peripheral, DEFAULT_SAMPLES, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    SinglePoll,
    Accumulate { samples: u32 },
}

impl InputMode {
    /// `1` (or `0`) is single poll, anything larger accumulates.
    pub fn from_samples(samples: u32) -> Self {
        if samples <= 1 {
            InputMode::SinglePoll
        } else {
            InputMode::Accumulate { samples }
        }
    }

    /// Button polls made per tick once running.
    pub fn polls_per_tick(self) -> u32 {
        match self {
            InputMode::SinglePoll => 1,
            InputMode::Accumulate { samples } => samples.max(1),
        }
    }
}

impl Default for InputMode {
    fn default() -> Self {
        Self::from_samples(DEFAULT_SAMPLES)
    }
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick_ms: u32,
    mode: InputMode,
    latch: Debounce,
    primed: bool,
}

impl TickScheduler {
    pub fn new(tick_ms: u32, mode: InputMode) -> Self {
        Self {
            tick_ms,
            mode,
            latch: Debounce::new(),
            primed: false,
        }
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Buttons for the coming tick.
    pub fn read<P: Peripheral + ?Sized>(&mut self, peripheral: &mut P) -> Buttons {
        match self.mode {
            InputMode::SinglePoll => peripheral.poll_buttons(),
            InputMode::Accumulate { .. } => {
                // Nothing has been latched before the first window.
                if !self.primed {
                    self.primed = true;
                    self.latch.observe(peripheral.poll_buttons());
                }
                self.latch.take()
            }
        }
    }

    /// Wait out one tick window.
    pub fn pace<P: Peripheral + ?Sized>(&mut self, peripheral: &mut P) {
        match self.mode {
            InputMode::SinglePoll => peripheral.delay(self.tick_ms),
            InputMode::Accumulate { samples } => {
                let samples = samples.max(1);
                let slice = self.tick_ms / samples;
                let mut extra = self.tick_ms % samples;
                for _ in 0..samples {
                    let ms = if extra > 0 {
                        extra -= 1;
                        slice + 1
                    } else {
                        slice
                    };
                    peripheral.delay(ms);
                    self.latch.observe(peripheral.poll_buttons());
                }
                self.primed = true;
                trace!("window latched {:?}", self.latch.peek());
            }
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_MS, InputMode::default())
    }
}
