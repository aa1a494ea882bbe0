//! Glyph tables - 4x4 dot patterns indexed by cell code
//!
//! A glyph is four 4-bit rows packed into a `u16`, row 0 in the top nibble.
//! Within a row, bit 3 is the leftmost dot. Every table maps code 0 to the
//! blank glyph so an empty cell renders the same under any table.

use crate::types::{CellCode, SPRITE_COUNT};

/// A 4x4 dot pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph(u16);

impl Glyph {
    pub const BLANK: Glyph = Glyph(0);

    pub const fn from_rows(rows: [u8; 4]) -> Self {
        Glyph(
            ((rows[0] as u16 & 0xF) << 12)
                | ((rows[1] as u16 & 0xF) << 8)
                | ((rows[2] as u16 & 0xF) << 4)
                | (rows[3] as u16 & 0xF),
        )
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Dots of sub-row `sub_row` (0..3) as a nibble.
    #[inline(always)]
    pub const fn row(self, sub_row: u8) -> u8 {
        ((self.0 >> (12 - 4 * (sub_row as u16 & 3))) & 0xF) as u8
    }

    /// Whether the dot at (`dx`, `dy`) is lit.
    pub const fn dot(self, dx: u8, dy: u8) -> bool {
        self.row(dy) & (0b1000 >> (dx & 3)) != 0
    }
}

/// A set of 16 glyphs, one per cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTable {
    name: &'static str,
    glyphs: [Glyph; 16],
}

impl GlyphTable {
    pub const fn new(name: &'static str, glyphs: [Glyph; 16]) -> Self {
        Self { name, glyphs }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn glyph(&self, code: CellCode) -> Glyph {
        self.glyphs[(code & 0xF) as usize]
    }
}

const fn g(rows: [u8; 4]) -> Glyph {
    Glyph::from_rows(rows)
}

const B: Glyph = Glyph::BLANK;

/// Arena tile codes.
pub mod tile {
    use crate::types::CellCode;

    pub const EMPTY: CellCode = 0;
    pub const BORDER: CellCode = 1;
    /// First of the piece sprites the preview cycles through.
    pub const SPRITE_BASE: CellCode = 2;
}

/// Letter codes.
pub mod letter {
    use crate::types::CellCode;

    pub const BLANK: CellCode = 0;
    pub const S: CellCode = 1;
    pub const C: CellCode = 2;
    pub const O: CellCode = 3;
    pub const R: CellCode = 4;
    pub const E: CellCode = 5;
    pub const L: CellCode = 6;
    pub const I: CellCode = 7;
    pub const N: CellCode = 8;
    pub const T: CellCode = 9;
    pub const X: CellCode = 10;
}

/// Cell code for a sprite index (wraps over the sprite set).
pub fn sprite_code(sprite: usize) -> CellCode {
    tile::SPRITE_BASE + (sprite % SPRITE_COUNT) as CellCode
}

/// Cell code for a decimal digit; 0..=9 map to 1..=10 so code 0 stays blank.
pub fn digit_code(digit: u8) -> CellCode {
    debug_assert!(digit < 10);
    (digit % 10) + 1
}

/// Cell code for an upper-case letter, blank for anything the table lacks.
pub fn letter_code(ch: char) -> CellCode {
    match ch {
        'S' => letter::S,
        'C' => letter::C,
        'O' => letter::O,
        'R' => letter::R,
        'E' => letter::E,
        'L' => letter::L,
        'I' => letter::I,
        'N' => letter::N,
        'T' => letter::T,
        'X' => letter::X,
        _ => letter::BLANK,
    }
}

/// Playfield tiles: blank, border, then the piece sprites.
pub static ARENA_TILES: GlyphTable = GlyphTable::new(
    "arena",
    [
        B,
        g([0xF, 0xF, 0xF, 0xF]),
        // Sprites
        g([0xF, 0x9, 0x9, 0xF]),
        g([0xF, 0xB, 0xD, 0xF]),
        g([0xE, 0xE, 0xE, 0x0]),
        g([0xA, 0x5, 0xA, 0x5]),
        B,
        B,
        B,
        B,
        B,
        B,
        B,
        B,
        B,
        B,
    ],
);

/// Digits 0-9 at codes 1-10.
pub static DIGITS: GlyphTable = GlyphTable::new(
    "digits",
    [
        B,
        g([0xE, 0xA, 0xA, 0xE]),
        g([0x4, 0xC, 0x4, 0xE]),
        g([0xC, 0x2, 0x4, 0xE]),
        g([0xE, 0x6, 0x2, 0xE]),
        g([0xA, 0xA, 0xE, 0x2]),
        g([0xE, 0xC, 0x2, 0xC]),
        g([0x8, 0xE, 0xA, 0xE]),
        g([0xE, 0x2, 0x4, 0x4]),
        g([0xE, 0xE, 0xA, 0xE]),
        g([0xE, 0xA, 0xE, 0x2]),
        B,
        B,
        B,
        B,
        B,
    ],
);

/// The handful of letters the HUD needs.
pub static LETTERS: GlyphTable = GlyphTable::new(
    "letters",
    [
        B,
        g([0x6, 0x8, 0x2, 0xC]),
        g([0x6, 0x8, 0x8, 0x6]),
        g([0x4, 0xA, 0xA, 0x4]),
        g([0xC, 0xA, 0xC, 0xA]),
        g([0xE, 0xC, 0x8, 0xE]),
        g([0x8, 0x8, 0x8, 0xE]),
        g([0xE, 0x4, 0x4, 0xE]),
        g([0xC, 0xA, 0xA, 0xA]),
        g([0xE, 0x4, 0x4, 0x4]),
        g([0xA, 0x4, 0x4, 0xA]),
        B,
        B,
        B,
        B,
        B,
    ],
);
