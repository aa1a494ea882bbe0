//! Key mapping from terminal events to buttons.
//!
//! Terminals report key presses, but many never report releases. [`HeldKeys`]
//! treats LEFT and RIGHT as held from their press until a release event
//! arrives or the key has not repeated for a timeout, so polling them looks
//! like reading a real button port. UP and DOWN are one-shot: a press is
//! reported by exactly one read and key repeats are ignored.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Buttons;

// Long enough to bridge the gap before a terminal's key auto-repeat starts.
const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Map a key to the button it stands for.
pub fn button_for_key(code: KeyCode) -> Option<Buttons> {
    match code {
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Buttons::UP),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S' | ' ') => Some(Buttons::DOWN),
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Buttons::LEFT),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Buttons::RIGHT),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Buttons that act once per press rather than while held.
const ONE_SHOT: Buttons = Buttons::from_bits(Buttons::UP.bits() | Buttons::DOWN.bits());

fn is_one_shot(button: Buttons) -> bool {
    ONE_SHOT.contains(button)
}

/// Buttons currently held down on the keyboard.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    held: ArrayVec<(Buttons, Instant), 2>,
    /// One-shot presses not yet reported.
    taps: Buttons,
    release_timeout: Duration,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::with_release_timeout(DEFAULT_RELEASE_TIMEOUT)
    }

    pub fn with_release_timeout(release_timeout: Duration) -> Self {
        Self {
            held: ArrayVec::new(),
            taps: Buttons::NONE,
            release_timeout,
        }
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Feed one key event observed at `now`.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        let Some(button) = button_for_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => self.press(button, now),
            KeyEventKind::Repeat if !is_one_shot(button) => self.press(button, now),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.release(button),
        }
    }

    pub fn press(&mut self, button: Buttons, now: Instant) {
        if is_one_shot(button) {
            self.taps |= button;
        } else if let Some(entry) = self.held.iter_mut().find(|(b, _)| *b == button) {
            entry.1 = now;
        } else {
            // Only LEFT and RIGHT are held, so this never overflows.
            let _ = self.held.try_push((button, now));
        }
    }

    /// Release a held button. A pending tap is still reported.
    pub fn release(&mut self, button: Buttons) {
        self.held.retain(|(b, _)| *b != button);
    }

    /// Buttons down at `now`: held keys that have not timed out, plus taps
    /// since the last read. Stale entries are dropped and taps are consumed.
    pub fn buttons(&mut self, now: Instant) -> Buttons {
        let timeout = self.release_timeout;
        self.held
            .retain(|(_, since)| now.saturating_duration_since(*since) <= timeout);
        let taps = std::mem::replace(&mut self.taps, Buttons::NONE);
        self.held
            .iter()
            .fold(taps, |acc, (button, _)| acc | *button)
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.taps = Buttons::NONE;
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
