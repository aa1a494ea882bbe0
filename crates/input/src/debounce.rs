//! Press latch for the accumulate input mode.

use crate::types::Buttons;

/// Remembers every button seen pressed since the last [`Debounce::take`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    latched: Buttons,
    samples: u32,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one poll result.
    pub fn observe(&mut self, buttons: Buttons) {
        self.latched |= buttons;
        self.samples = self.samples.saturating_add(1);
    }

    /// Buttons latched so far, without clearing.
    pub fn peek(&self) -> Buttons {
        self.latched
    }

    /// Polls recorded since the last take.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Return the latched buttons and start a new window.
    pub fn take(&mut self) -> Buttons {
        let latched = self.latched;
        *self = Self::default();
        latched
    }
}
