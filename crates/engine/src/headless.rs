//! A peripheral with no hardware behind it.
//!
//! Buttons come from an [`InputScript`], delays advance a virtual clock, and
//! the bus drives a [`BusScreen`] so the picture the game sent can be read
//! back.

use tinyboy_display::BusScreen;
use tinyboy_input::{InputMode, InputScript};

use crate::types::{BitSink, Buttons, Peripheral};

#[derive(Debug, Clone)]
pub struct HeadlessPeripheral {
    screen: BusScreen,
    script: InputScript,
    clock_ms: u64,
    polls: u64,
}

impl HeadlessPeripheral {
    pub fn new(script: InputScript) -> Self {
        Self {
            screen: BusScreen::new(),
            script,
            clock_ms: 0,
            polls: 0,
        }
    }

    /// A peripheral whose buttons are never pressed.
    pub fn idle() -> Self {
        Self::new(InputScript::from_pulses(Vec::new()))
    }

    pub fn screen(&self) -> &BusScreen {
        &self.screen
    }

    pub fn script(&self) -> &InputScript {
        &self.script
    }

    /// Milliseconds spent in `delay`.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Ticks needed for `mode` to consume the whole script.
    ///
    /// Accumulate mode polls once more on its first read, before the first
    /// window.
    pub fn ticks_for_script(&self, mode: InputMode) -> u64 {
        let total = self.script.total_polls();
        let per_tick = u64::from(mode.polls_per_tick());
        match mode {
            InputMode::SinglePoll => total.div_ceil(per_tick),
            InputMode::Accumulate { .. } if total == 0 => 0,
            InputMode::Accumulate { .. } => (total - 1).div_ceil(per_tick).max(1),
        }
    }
}

impl BitSink for HeadlessPeripheral {
    fn transmit_bit(&mut self, bit: bool) {
        self.screen.transmit_bit(bit);
    }
}

impl Peripheral for HeadlessPeripheral {
    fn poll_buttons(&mut self) -> Buttons {
        self.polls += 1;
        self.script.next_poll()
    }

    fn delay(&mut self, ms: u32) {
        self.clock_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_drives_polls() {
        let script = InputScript::parse("L+U D").unwrap();
        let mut pad = HeadlessPeripheral::new(script);
        assert_eq!(pad.poll_buttons(), Buttons::LEFT | Buttons::UP);
        assert_eq!(pad.poll_buttons(), Buttons::DOWN);
        assert_eq!(pad.poll_buttons(), Buttons::NONE);
        assert_eq!(pad.polls(), 3);
    }

    #[test]
    fn test_delay_advances_clock() {
        let mut pad = HeadlessPeripheral::idle();
        pad.delay(50);
        pad.delay(7);
        assert_eq!(pad.clock_ms(), 57);
    }

    #[test]
    fn test_ticks_for_script() {
        let pad = HeadlessPeripheral::new(InputScript::parse("LLLLL").unwrap().with_hold(2));
        assert_eq!(pad.ticks_for_script(InputMode::SinglePoll), 10);
        assert_eq!(pad.ticks_for_script(InputMode::Accumulate { samples: 4 }), 3);

        // The first read's extra poll covers the ninth pulse.
        let pad = HeadlessPeripheral::new(InputScript::parse("LLLLLLLLL").unwrap());
        assert_eq!(pad.ticks_for_script(InputMode::Accumulate { samples: 4 }), 2);

        let pad = HeadlessPeripheral::new(InputScript::parse("L").unwrap());
        assert_eq!(pad.ticks_for_script(InputMode::Accumulate { samples: 4 }), 1);
        let idle = HeadlessPeripheral::idle();
        assert_eq!(idle.ticks_for_script(InputMode::Accumulate { samples: 4 }), 0);
    }

    #[test]
    fn test_ticks_for_script_with_zero_samples() {
        let pad = HeadlessPeripheral::new(InputScript::parse("LLL").unwrap());
        assert_eq!(pad.ticks_for_script(InputMode::Accumulate { samples: 0 }), 2);
    }

    #[test]
    fn test_ticks_for_script_drains_accumulated_script() {
        use crate::console::Console;
        use tinyboy_input::TickScheduler;

        let script = InputScript::parse("LLLLLLLLL").unwrap();
        let mode = InputMode::Accumulate { samples: 4 };
        let pad = HeadlessPeripheral::new(script);
        let ticks = pad.ticks_for_script(mode);

        let mut console = Console::new(pad, TickScheduler::new(40, mode));
        console.run_ticks(ticks);
        assert!(console.peripheral().script().is_finished());
        assert_eq!(console.peripheral().polls(), 9);
    }
}
