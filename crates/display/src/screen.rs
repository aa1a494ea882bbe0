//! BusScreen: the receiving end of the serial bus.
//!
//! Models the display controller: each clocked bit lights or clears the dot
//! under a raster cursor which wraps after one frame. There is no framing,
//! so a lost or extra bit shifts everything that follows.

use crate::glyphs::{Glyph, GlyphTable};
use crate::types::{BitSink, DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_BITS, GLYPH_SIZE};

/// 64x64 dot image reconstructed from the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusScreen {
    dots: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
    cursor: usize,
    bits_received: u64,
    frames: u64,
}

impl BusScreen {
    pub fn new() -> Self {
        Self {
            dots: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            cursor: 0,
            bits_received: 0,
            frames: 0,
        }
    }

    /// Power-cycle the controller: blank image, cursor at the top left.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn dot(&self, x: usize, y: usize) -> bool {
        self.dots
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.dots
    }

    /// Raster position of the next bit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn bits_received(&self) -> u64 {
        self.bits_received
    }

    /// Frames completed (cursor wrapped back to the origin).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the cursor sits on a frame boundary.
    pub fn aligned(&self) -> bool {
        self.cursor == 0
    }

    /// Read back the 4x4 dots of glyph cell (`cx`, `cy`).
    pub fn cell_glyph(&self, cx: usize, cy: usize) -> Glyph {
        let g = GLYPH_SIZE as usize;
        let mut rows = [0u8; 4];
        for (dy, row) in rows.iter_mut().enumerate() {
            for dx in 0..g {
                if self.dot(cx * g + dx, cy * g + dy) {
                    *row |= 0b1000 >> dx;
                }
            }
        }
        Glyph::from_rows(rows)
    }

    /// Find the code in `table` whose glyph matches cell (`cx`, `cy`).
    /// Ambiguous for tables with repeated glyphs; returns the lowest code.
    pub fn decode_cell(&self, table: &GlyphTable, cx: usize, cy: usize) -> Option<u8> {
        let glyph = self.cell_glyph(cx, cy);
        (0..16u8).find(|&code| table.glyph(code) == glyph)
    }

    /// Dump the image as text, `#` for lit dots.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
        for row in &self.dots {
            out.extend(row.iter().map(|&lit| if lit { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl Default for BusScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSink for BusScreen {
    fn transmit_bit(&mut self, bit: bool) {
        let (x, y) = (self.cursor % DISPLAY_WIDTH, self.cursor / DISPLAY_WIDTH);
        self.dots[y][x] = bit;
        self.bits_received += 1;
        self.cursor += 1;
        if self.cursor == FRAME_BITS {
            self.cursor = 0;
            self.frames += 1;
        }
    }
}
