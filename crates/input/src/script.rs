//! Scripted button sequences for headless runs and tests.
//!
//! A script is a sequence of pulses. Each pulse is one of `U`, `D`, `L`, `R`
//! or `_` (nothing pressed); `+` joins buttons into a single pulse, so `L+U`
//! presses LEFT and UP together. Whitespace is ignored and letters are
//! case-insensitive.

use std::fmt;
use std::str::FromStr;

use crate::types::Buttons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptErrorKind {
    UnexpectedChar(char),
    /// `+` with nothing to join on one side.
    DanglingPlus,
}

/// A script that failed to parse, with the byte offset of the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptError {
    pub position: usize,
    pub kind: ScriptErrorKind,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScriptErrorKind::UnexpectedChar(ch) => write!(
                f,
                "unexpected {ch:?} at position {} (expected U, D, L, R, _ or +)",
                self.position
            ),
            ScriptErrorKind::DanglingPlus => {
                write!(f, "'+' at position {} joins nothing", self.position)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

fn button_for_char(ch: char) -> Option<Buttons> {
    match ch.to_ascii_uppercase() {
        'U' => Some(Buttons::UP),
        'D' => Some(Buttons::DOWN),
        'L' => Some(Buttons::LEFT),
        'R' => Some(Buttons::RIGHT),
        '_' => Some(Buttons::NONE),
        _ => None,
    }
}

/// A parsed script plus its playback position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    pulses: Vec<Buttons>,
    hold: u32,
    cursor: usize,
    held: u32,
}

impl InputScript {
    pub fn parse(src: &str) -> Result<Self, ScriptError> {
        let mut pulses: Vec<Buttons> = Vec::new();
        let mut joining = false;
        let mut plus_at = 0;

        for (position, ch) in src.char_indices() {
            if ch.is_whitespace() {
                continue;
            }
            if ch == '+' {
                if joining || pulses.is_empty() {
                    return Err(ScriptError {
                        position,
                        kind: ScriptErrorKind::DanglingPlus,
                    });
                }
                joining = true;
                plus_at = position;
                continue;
            }
            let button = button_for_char(ch).ok_or(ScriptError {
                position,
                kind: ScriptErrorKind::UnexpectedChar(ch),
            })?;
            match pulses.last_mut() {
                Some(last) if joining => *last |= button,
                _ => pulses.push(button),
            }
            joining = false;
        }

        if joining {
            return Err(ScriptError {
                position: plus_at,
                kind: ScriptErrorKind::DanglingPlus,
            });
        }

        Ok(Self::from_pulses(pulses))
    }

    pub fn from_pulses(pulses: Vec<Buttons>) -> Self {
        Self {
            pulses,
            hold: 1,
            cursor: 0,
            held: 0,
        }
    }

    /// Hold every pulse for `polls` polls (at least one).
    pub fn with_hold(mut self, polls: u32) -> Self {
        self.hold = polls.max(1);
        self
    }

    pub fn hold(&self) -> u32 {
        self.hold
    }

    pub fn pulses(&self) -> &[Buttons] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Polls needed to play the whole script.
    pub fn total_polls(&self) -> u64 {
        self.pulses.len() as u64 * u64::from(self.hold)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pulses.len()
    }

    /// Buttons for the next poll; nothing is pressed once the script ends.
    pub fn next_poll(&mut self) -> Buttons {
        let Some(&buttons) = self.pulses.get(self.cursor) else {
            return Buttons::NONE;
        };
        self.held += 1;
        if self.held >= self.hold {
            self.held = 0;
            self.cursor += 1;
        }
        buttons
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.held = 0;
    }
}

impl FromStr for InputScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_pulses() {
        let script = InputScript::parse("U D L R _").unwrap();
        assert_eq!(
            script.pulses(),
            &[
                Buttons::UP,
                Buttons::DOWN,
                Buttons::LEFT,
                Buttons::RIGHT,
                Buttons::NONE
            ]
        );
    }

    #[test]
    fn test_parse_combined_and_compact() {
        let script: InputScript = "l+u rr\n_".parse().unwrap();
        assert_eq!(
            script.pulses(),
            &[
                Buttons::LEFT | Buttons::UP,
                Buttons::RIGHT,
                Buttons::RIGHT,
                Buttons::NONE
            ]
        );
    }

    #[test]
    fn test_parse_errors_carry_position() {
        let err = InputScript::parse("UUx").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.kind, ScriptErrorKind::UnexpectedChar('x'));

        assert_eq!(
            InputScript::parse("+L").unwrap_err().kind,
            ScriptErrorKind::DanglingPlus
        );
        assert_eq!(InputScript::parse("L+").unwrap_err().position, 1);
        assert_eq!(InputScript::parse("L++U").unwrap_err().position, 2);
        assert!(InputScript::parse("Q").unwrap_err().to_string().contains("'Q'"));
    }

    #[test]
    fn test_playback_holds_each_pulse() {
        let mut script = InputScript::parse("LR").unwrap().with_hold(2);
        assert_eq!(script.total_polls(), 4);
        let polls: Vec<_> = (0..5).map(|_| script.next_poll()).collect();
        assert_eq!(
            polls,
            vec![
                Buttons::LEFT,
                Buttons::LEFT,
                Buttons::RIGHT,
                Buttons::RIGHT,
                Buttons::NONE
            ]
        );
        assert!(script.is_finished());

        script.rewind();
        assert_eq!(script.next_poll(), Buttons::LEFT);
    }

    #[test]
    fn test_empty_script() {
        let mut script = InputScript::parse("  ").unwrap();
        assert!(script.is_empty());
        assert!(script.is_finished());
        assert_eq!(script.next_poll(), Buttons::NONE);
    }
}
