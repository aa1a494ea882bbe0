//! Shared data types, geometry and timing constants, and the peripheral
//! capability the firmware is written against.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the firmware core, the display driver and the host front ends alike.
//!
//! # Screen Geometry
//!
//! The TinyBoy display is a 64x64 dot matrix addressed as 16x16 glyph cells,
//! each cell a 4x4 dot glyph:
//!
//! | Region        | Cells                                   |
//! |---------------|-----------------------------------------|
//! | Score line    | row 0                                   |
//! | Lines line    | row 1                                   |
//! | Playfield band| rows 2..16                              |
//! | Arena         | x 1..=10, y 2..=14                      |
//! | Border        | x 0 and x 11 for y 2..=15, floor y 15   |
//! | Preview box   | x 12..=15, y 3..=6                      |
//!
//! # Timing
//!
//! | Constant         | Value | Description                          |
//! |------------------|-------|--------------------------------------|
//! | `TICK_MS`        | 50    | Pacing window between game ticks     |
//! | `DEFAULT_SAMPLES`| 1     | Button polls per window (single poll)|
//!
//! # Examples
//!
//! ```
//! use tinyboy_types::{Buttons, GameAction, PieceKind};
//!
//! let pressed = Buttons::LEFT | Buttons::UP;
//! // UP wins every tie.
//! assert_eq!(GameAction::from_buttons(pressed), Some(GameAction::Rotate));
//! assert_eq!(PieceKind::from_index(7), PieceKind::J);
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Framebuffer width in glyph cells.
pub const SCREEN_COLS: u8 = 16;
/// Framebuffer height in glyph cells.
pub const SCREEN_ROWS: u8 = 16;
/// Glyph edge length in dots.
pub const GLYPH_SIZE: u8 = 4;
/// Display width in dots.
pub const DISPLAY_WIDTH: usize = SCREEN_COLS as usize * GLYPH_SIZE as usize;
/// Display height in dots.
pub const DISPLAY_HEIGHT: usize = SCREEN_ROWS as usize * GLYPH_SIZE as usize;
/// Bits in one complete frame on the bus.
pub const FRAME_BITS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Leftmost playable column.
pub const ARENA_MIN_X: i8 = 1;
/// Rightmost playable column.
pub const ARENA_MAX_X: i8 = 10;
/// Topmost playable row.
pub const ARENA_TOP: i8 = 2;
/// Bottom playable row (the floor sits directly beneath it).
pub const ARENA_BOTTOM: i8 = 14;
pub const ARENA_WIDTH: usize = (ARENA_MAX_X - ARENA_MIN_X + 1) as usize;
pub const ARENA_HEIGHT: usize = (ARENA_BOTTOM - ARENA_TOP + 1) as usize;

/// Column of the right border.
pub const BORDER_RIGHT_X: i8 = ARENA_MAX_X + 1;
/// Row of the floor border.
pub const FLOOR_Y: i8 = ARENA_BOTTOM + 1;

/// Preview box origin and size (cells).
pub const PREVIEW_X: i8 = 12;
pub const PREVIEW_Y: i8 = 3;
pub const PREVIEW_SIZE: i8 = 4;

/// Reference position of a freshly spawned piece.
pub const SPAWN_X: i8 = ARENA_MIN_X + 4;
pub const SPAWN_Y: i8 = ARENA_TOP;

/// HUD rows, the column where labels hand over to digits, and the numeric field.
pub const SCORE_ROW: i8 = 0;
pub const LINES_ROW: i8 = 1;
pub const LABEL_SPLIT_X: u8 = 2;
pub const NUMBER_FIELD_X: i8 = 10;
pub const NUMBER_FIELD_DIGITS: usize = 6;
/// First row of the playfield band (arena, border, preview).
pub const PLAYFIELD_ROW: u8 = 2;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 50;
pub const DEFAULT_SAMPLES: u32 = 1;

/// Number of canonical tetrominoes.
pub const PIECE_COUNT: usize = 6;
/// Number of piece sprites the preview cycles through.
pub const SPRITE_COUNT: usize = 4;

/// Score awarded by the number of rows cleared in one pass.
pub const LINE_SCORES: [u32; 5] = [0, 10, 100, 300, 1200];

/// A framebuffer cell code in `0..=15`. Zero is always empty.
pub type CellCode = u8;

/// The empty cell code.
pub const EMPTY: CellCode = 0;

/// Canonical tetromino kinds, in spawn cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Piece at `index` in the spawn cycle (wraps modulo 6).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % PIECE_COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next piece in the spawn cycle.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Classification returned by the collision probe.
///
/// `Collided` and `LandedFull` are transient: the session never stores them
/// as its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Playing,
    Landed,
    Collided,
    /// Landed while touching the arena's top row.
    LandedFull,
}

impl ProbeResult {
    pub fn is_landed(self) -> bool {
        matches!(self, ProbeResult::Landed | ProbeResult::LandedFull)
    }
}

/// Session state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Restart,
    Landed,
    Playing,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Restart => "restart",
            SessionState::Landed => "landed",
            SessionState::Playing => "playing",
        }
    }
}

/// Button bitmask, using the TinyBoy port pin bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const UP: Buttons = Buttons(0b0000_0010);
    pub const DOWN: Buttons = Buttons(0b0000_1000);
    pub const LEFT: Buttons = Buttons(0b0001_0000);
    pub const RIGHT: Buttons = Buttons(0b0010_0000);
    pub const MASK: u8 = 0b0011_1010;

    /// Build from raw port bits; bits outside the button mask are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Buttons(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Buttons(_)");
        }
        f.write_str("Buttons(")?;
        for (button, name) in [
            (Buttons::UP, 'U'),
            (Buttons::DOWN, 'D'),
            (Buttons::LEFT, 'L'),
            (Buttons::RIGHT, 'R'),
        ] {
            if self.contains(button) {
                write!(f, "{name}")?;
            }
        }
        f.write_str(")")
    }
}

/// The single action a tick may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Rotate,
    HardDrop,
    MoveLeft,
    MoveRight,
}

impl GameAction {
    /// Resolve simultaneous presses: UP, then DOWN, then LEFT, then RIGHT.
    pub fn from_buttons(buttons: Buttons) -> Option<Self> {
        if buttons.contains(Buttons::UP) {
            Some(GameAction::Rotate)
        } else if buttons.contains(Buttons::DOWN) {
            Some(GameAction::HardDrop)
        } else if buttons.contains(Buttons::LEFT) {
            Some(GameAction::MoveLeft)
        } else if buttons.contains(Buttons::RIGHT) {
            Some(GameAction::MoveRight)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
        }
    }
}

/// The clock+data half of the peripheral: one call per bit on the bus.
pub trait BitSink {
    /// Set the data line to `bit` and pulse the clock.
    fn transmit_bit(&mut self, bit: bool);
}

/// The full capability injected into the firmware: bus, buttons, and delay.
pub trait Peripheral: BitSink {
    fn poll_buttons(&mut self) -> Buttons;

    fn delay(&mut self, ms: u32);
}

impl<T: BitSink + ?Sized> BitSink for &mut T {
    fn transmit_bit(&mut self, bit: bool) {
        (**self).transmit_bit(bit);
    }
}
