//! Framebuffer module - the nibble-packed cell grid
//!
//! The screen is 16x16 glyph cells, each holding a 4-bit cell code.
//! Two vertically adjacent cells share one byte: cell (x, y) lives in byte
//! (x, y >> 1), even rows in the low nibble and odd rows in the high nibble.
//! Coordinates: (x, y) where x ranges 0..15 (left to right), y ranges 0..15 (top to bottom)

use crate::types::{CellCode, EMPTY, SCREEN_COLS, SCREEN_ROWS};

/// Bytes per column of packed storage.
const PACKED_ROWS: usize = (SCREEN_ROWS as usize + 1) / 2;

const NIBBLE: u8 = 0x0F;

/// The display framebuffer - 16 columns x 16 rows, two cells per byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Column-major packed storage, indexed `[x][y >> 1]`
    cells: [[u8; PACKED_ROWS]; SCREEN_COLS as usize],
}

impl Framebuffer {
    /// Create a new empty framebuffer
    pub fn new() -> Self {
        Self {
            cells: [[0; PACKED_ROWS]; SCREEN_COLS as usize],
        }
    }

    /// Byte position and nibble shift for (x, y)
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize, u32)> {
        if x < 0 || x >= SCREEN_COLS as i8 || y < 0 || y >= SCREEN_ROWS as i8 {
            return None;
        }
        let shift = if y & 1 == 0 { 0 } else { 4 };
        Some((x as usize, (y >> 1) as usize, shift))
    }

    pub fn width(&self) -> u8 {
        SCREEN_COLS
    }

    pub fn height(&self) -> u8 {
        SCREEN_ROWS
    }

    /// Get the cell code at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellCode> {
        Self::index(x, y).map(|(col, byte, shift)| (self.cells[col][byte] >> shift) & NIBBLE)
    }

    /// Set the cell code at (x, y), preserving the neighbouring nibble.
    /// Out-of-bounds writes are ignored; codes are truncated to 4 bits.
    pub fn set(&mut self, x: i8, y: i8, code: CellCode) {
        if let Some((col, byte, shift)) = Self::index(x, y) {
            let packed = &mut self.cells[col][byte];
            *packed = (*packed & !(NIBBLE << shift)) | ((code & NIBBLE) << shift);
        }
    }

    /// Check if (x, y) is inside the screen and holds a non-empty code
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(code) if code != EMPTY)
    }

    /// Set every cell to `code`
    pub fn fill(&mut self, code: CellCode) {
        let code = code & NIBBLE;
        let packed = code | (code << 4);
        for column in &mut self.cells {
            column.fill(packed);
        }
    }

    /// Clear the entire framebuffer
    pub fn clear(&mut self) {
        self.fill(EMPTY);
    }

    /// Fill a rectangle, clipped to the screen
    pub fn fill_rect(&mut self, x: i8, y: i8, w: i8, h: i8, code: CellCode) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x.saturating_add(dx), y.saturating_add(dy), code);
            }
        }
    }

    /// Raw packed bytes of column `x` (for tests and diagnostics)
    pub fn packed_column(&self, x: u8) -> Option<&[u8; PACKED_ROWS]> {
        self.cells.get(x as usize)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
