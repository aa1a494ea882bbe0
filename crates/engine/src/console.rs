//! The console: everything the firmware's main loop owns.

use log::{debug, trace};

use tinyboy_core::{Session, SessionSnapshot, TickReport};
use tinyboy_display::{
    refresh_region, refresh_split, Framebuffer, ARENA_TILES, DIGITS, LETTERS,
};
use tinyboy_input::TickScheduler;

use crate::types::{
    BitSink, Peripheral, SessionState, LABEL_SPLIT_X, LINES_ROW, PLAYFIELD_ROW, SCORE_ROW,
    SCREEN_ROWS,
};

/// Send one complete frame: the two HUD rows split between letters and
/// digits, then the playfield band through the arena tiles.
pub fn render_frame<B: BitSink + ?Sized>(fb: &Framebuffer, bus: &mut B) {
    for y in [SCORE_ROW as u8, LINES_ROW as u8] {
        refresh_split(fb, y, LABEL_SPLIT_X, &LETTERS, &DIGITS, bus);
    }
    refresh_region(fb, &ARENA_TILES, PLAYFIELD_ROW, SCREEN_ROWS, bus);
}

pub struct Console<P: Peripheral> {
    peripheral: P,
    fb: Framebuffer,
    session: Session,
    scheduler: TickScheduler,
    ticks: u64,
    last_report: Option<TickReport>,
}

impl<P: Peripheral> Console<P> {
    pub fn new(peripheral: P, scheduler: TickScheduler) -> Self {
        Self::with_session(peripheral, scheduler, Session::new())
    }

    pub fn with_session(peripheral: P, scheduler: TickScheduler, session: Session) -> Self {
        Self {
            peripheral,
            fb: Framebuffer::new(),
            session,
            scheduler,
            ticks: 0,
            last_report: None,
        }
    }

    /// One state-machine step.
    ///
    /// `Restart` and `Landed` are resolved without touching the bus and
    /// return `None`. A `Playing` step reads the buttons, ticks the session,
    /// sends a frame and waits out the tick window.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.session.state() != SessionState::Playing {
            self.session.advance(&mut self.fb);
            return None;
        }

        let buttons = self.scheduler.read(&mut self.peripheral);
        let report = self.session.tick(&mut self.fb, buttons);
        render_frame(&self.fb, &mut self.peripheral);
        self.scheduler.pace(&mut self.peripheral);

        self.ticks += 1;
        self.last_report = Some(report);
        trace!("tick {}: {:?}", self.ticks, report);
        Some(report)
    }

    /// Step until `n` more `Playing` ticks have run.
    pub fn run_ticks(&mut self, n: u64) {
        let target = self.ticks + n;
        while self.ticks < target {
            self.step();
        }
        debug!(
            "ran {} ticks: score {} lines {}",
            n,
            self.session.score(),
            self.session.lines()
        );
    }

    /// Step until `keep_going` returns false; it is checked before every step.
    pub fn run_while(&mut self, mut keep_going: impl FnMut(&Self) -> bool) {
        while keep_going(self) {
            self.step();
        }
    }

    /// Playing ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> Option<TickReport> {
        self.last_report
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot(&self.fb)
    }

    pub fn into_peripheral(self) -> P {
        self.peripheral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyboy_display::BitRecorder;
    use tinyboy_input::InputMode;

    use crate::types::{Buttons, FRAME_BITS};

    /// Bus recorder with a fixed button state and a clock.
    #[derive(Default)]
    struct Bench {
        bus: BitRecorder,
        buttons: Buttons,
        clock_ms: u64,
    }

    impl BitSink for Bench {
        fn transmit_bit(&mut self, bit: bool) {
            self.bus.transmit_bit(bit);
        }
    }

    impl Peripheral for Bench {
        fn poll_buttons(&mut self) -> Buttons {
            self.buttons
        }

        fn delay(&mut self, ms: u32) {
            self.clock_ms += u64::from(ms);
        }
    }

    fn console() -> Console<Bench> {
        Console::new(Bench::default(), TickScheduler::new(50, InputMode::SinglePoll))
    }

    #[test]
    fn test_first_step_resolves_restart_silently() {
        let mut console = console();
        assert_eq!(console.step(), None);
        assert_eq!(console.session().state(), SessionState::Playing);
        assert!(console.peripheral().bus.is_empty());
        assert_eq!(console.peripheral().clock_ms, 0);
    }

    #[test]
    fn test_tick_sends_one_frame_and_paces() {
        let mut console = console();
        console.run_ticks(1);
        assert_eq!(console.ticks(), 1);
        assert_eq!(console.peripheral().bus.len(), FRAME_BITS);
        assert_eq!(console.peripheral().clock_ms, 50);

        console.run_ticks(2);
        assert_eq!(console.peripheral().bus.len(), 3 * FRAME_BITS);
        assert_eq!(console.peripheral().clock_ms, 150);
    }

    #[test]
    fn test_landing_step_is_silent() {
        let mut console = console();
        console.peripheral_mut().buttons = Buttons::DOWN;
        console.run_ticks(1);
        assert!(console.last_report().is_some_and(|r| r.landed));
        assert_eq!(console.session().state(), SessionState::Landed);

        let bits = console.peripheral().bus.len();
        assert_eq!(console.step(), None);
        assert_eq!(console.peripheral().bus.len(), bits);
        assert_eq!(console.session().state(), SessionState::Playing);
    }

    #[test]
    fn test_run_while_stops_on_condition() {
        let mut console = console();
        console.run_while(|c| c.ticks() < 4);
        assert_eq!(console.ticks(), 4);
    }
}
