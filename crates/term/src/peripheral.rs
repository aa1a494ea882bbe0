//! The terminal as a TinyBoy peripheral.
//!
//! Bits go to a [`BusScreen`]; whenever a whole frame has arrived the dot
//! image is drawn to the terminal. Buttons are the keys currently held.
//! `delay` is where time passes: it waits on the terminal event queue until
//! the deadline, so key presses and resizes are handled during the wait.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::warn;

use tinyboy_display::BusScreen;
use tinyboy_input::{should_quit, HeldKeys};

use crate::grid::TextGrid;
use crate::lcd_view::{LcdView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::{BitSink, Buttons, Peripheral};

const HELP: &str = "arrows/WASD: move  up: rotate  down/space: drop  q: quit";

pub struct TerminalPeripheral {
    screen: BusScreen,
    keys: HeldKeys,
    renderer: TerminalRenderer,
    view: LcdView,
    grid: TextGrid,
    drawn_frames: u64,
    quit: bool,
    error: Option<anyhow::Error>,
}

impl TerminalPeripheral {
    /// Take over the terminal (raw mode, alternate screen).
    pub fn enter() -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            screen: BusScreen::new(),
            keys: HeldKeys::new(),
            renderer,
            view: LcdView::default(),
            grid: TextGrid::new(0, 0),
            drawn_frames: 0,
            quit: false,
            error: None,
        })
    }

    /// Give the terminal back. Safe to call after a failed run.
    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Whether the user asked to quit or the terminal failed.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The first terminal error seen, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    pub fn screen(&self) -> &BusScreen {
        &self.screen
    }

    fn fail(&mut self, err: anyhow::Error) {
        warn!("terminal error: {err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.quit = true;
    }

    fn present(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(&self.screen, HELP, Viewport::new(w, h), &mut self.grid);
        self.renderer.draw(&self.grid)?;
        self.drawn_frames = self.screen.frames();
        Ok(())
    }

    fn handle_event(&mut self, ev: Event, now: Instant) {
        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    self.quit = true;
                } else {
                    self.keys.handle_key_event(key, now);
                }
            }
            Event::Resize(..) => {
                self.renderer.invalidate();
                self.drawn_frames = 0;
            }
            _ => {}
        }
    }

    fn pump_events(&mut self, deadline: Instant) -> Result<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                return Ok(());
            }
            let ev = event::read()?;
            self.handle_event(ev, Instant::now());
            if self.quit {
                return Ok(());
            }
        }
    }
}

impl BitSink for TerminalPeripheral {
    fn transmit_bit(&mut self, bit: bool) {
        self.screen.transmit_bit(bit);
    }
}

impl Peripheral for TerminalPeripheral {
    fn poll_buttons(&mut self) -> Buttons {
        if let Err(err) = self.pump_events(Instant::now()) {
            self.fail(err);
        }
        self.keys.buttons(Instant::now())
    }

    fn delay(&mut self, ms: u32) {
        let deadline = Instant::now() + Duration::from_millis(u64::from(ms));
        if self.screen.aligned() && self.screen.frames() != self.drawn_frames {
            if let Err(err) = self.present() {
                self.fail(err);
            }
        }
        if self.quit {
            return;
        }
        if let Err(err) = self.pump_events(deadline) {
            self.fail(err);
        }
    }
}
