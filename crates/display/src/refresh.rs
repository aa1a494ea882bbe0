//! Refresh composition - framebuffer + glyph tables to bus bytes.
//!
//! Every mode walks cell rows, then sub-rows 0..3, then cell pairs left to
//! right. One byte carries two glyph columns: the left cell's sub-row nibble
//! in the high half, the right cell's in the low half.

use log::trace;

use crate::framebuffer::Framebuffer;
use crate::glyphs::GlyphTable;
use crate::transmitter::transmit_byte;
use crate::types::{BitSink, GLYPH_SIZE, SCREEN_COLS, SCREEN_ROWS};

/// Bytes per screen row per sub-row.
pub const BYTES_PER_SUB_ROW: usize = SCREEN_COLS as usize / 2;
/// Bits transmitted for one cell row.
pub const BITS_PER_ROW: usize = BYTES_PER_SUB_ROW * GLYPH_SIZE as usize * 8;

/// Compose the byte for cells (`x`, `y`) and (`x + 1`, `y`) at `sub_row`,
/// picking each cell's table by its column.
#[inline]
pub fn compose_byte<'t>(
    fb: &Framebuffer,
    x: u8,
    y: u8,
    sub_row: u8,
    table_for: impl Fn(u8) -> &'t GlyphTable,
) -> u8 {
    let nibble = |cx: u8| {
        let code = fb.get(cx as i8, y as i8).unwrap_or(0);
        table_for(cx).glyph(code).row(sub_row)
    };
    (nibble(x) << 4) | nibble(x + 1)
}

/// Compose one cell row into `out` as `GLYPH_SIZE` runs of
/// `BYTES_PER_SUB_ROW` bytes.
pub fn compose_row<'t>(
    fb: &Framebuffer,
    y: u8,
    table_for: impl Fn(u8) -> &'t GlyphTable + Copy,
    out: &mut [u8; BYTES_PER_SUB_ROW * GLYPH_SIZE as usize],
) {
    for sub_row in 0..GLYPH_SIZE {
        for pair in 0..BYTES_PER_SUB_ROW as u8 {
            out[sub_row as usize * BYTES_PER_SUB_ROW + pair as usize] =
                compose_byte(fb, pair * 2, y, sub_row, table_for);
        }
    }
}

fn transmit_row<'t, B: BitSink + ?Sized>(
    fb: &Framebuffer,
    y: u8,
    table_for: impl Fn(u8) -> &'t GlyphTable + Copy,
    bus: &mut B,
) {
    let mut row = [0u8; BYTES_PER_SUB_ROW * GLYPH_SIZE as usize];
    compose_row(fb, y, table_for, &mut row);
    for byte in row {
        transmit_byte(bus, byte);
    }
}

/// Send the whole screen through one table.
pub fn refresh_full<B: BitSink + ?Sized>(fb: &Framebuffer, table: &GlyphTable, bus: &mut B) {
    refresh_region(fb, table, 0, SCREEN_ROWS, bus);
}

/// Send rows `[y_start, y_end)` through one table. The band is clipped to the
/// screen; an empty band sends nothing.
pub fn refresh_region<B: BitSink + ?Sized>(
    fb: &Framebuffer,
    table: &GlyphTable,
    y_start: u8,
    y_end: u8,
    bus: &mut B,
) {
    let y_end = y_end.min(SCREEN_ROWS);
    trace!("refresh {} rows {}..{}", table.name(), y_start, y_end);
    for y in y_start..y_end {
        transmit_row(fb, y, |_| table, bus);
    }
}

/// Send row `y` with columns left of `split_x` through `left` and the rest
/// through `right`. Rows outside the screen send nothing.
pub fn refresh_split<B: BitSink + ?Sized>(
    fb: &Framebuffer,
    y: u8,
    split_x: u8,
    left: &GlyphTable,
    right: &GlyphTable,
    bus: &mut B,
) {
    if y >= SCREEN_ROWS {
        return;
    }
    trace!("refresh row {} split at {} ({}|{})", y, split_x, left.name(), right.name());
    transmit_row(fb, y, |x| if x < split_x { left } else { right }, bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::{digit_code, letter_code, ARENA_TILES, DIGITS, LETTERS};
    use crate::transmitter::BitRecorder;
    use crate::types::FRAME_BITS;

    #[test]
    fn test_compose_byte_puts_left_cell_high() {
        let mut fb = Framebuffer::new();
        fb.set(0, 0, 1); // border: 0xF every row
        let byte = compose_byte(&fb, 0, 0, 0, |_| &ARENA_TILES);
        assert_eq!(byte, 0xF0);

        fb.set(0, 0, 0);
        fb.set(1, 0, 1);
        let byte = compose_byte(&fb, 0, 0, 2, |_| &ARENA_TILES);
        assert_eq!(byte, 0x0F);
    }

    #[test]
    fn test_full_refresh_sends_one_frame() {
        let fb = Framebuffer::new();
        let mut bus = BitRecorder::new();
        refresh_full(&fb, &ARENA_TILES, &mut bus);
        assert_eq!(bus.len(), FRAME_BITS);
        assert!(bus.bits().iter().all(|&b| !b));
    }

    #[test]
    fn test_region_bit_count_and_clipping() {
        let fb = Framebuffer::new();
        let mut bus = BitRecorder::new();
        refresh_region(&fb, &ARENA_TILES, 2, 5, &mut bus);
        assert_eq!(bus.len(), 3 * BITS_PER_ROW);

        bus.clear();
        refresh_region(&fb, &ARENA_TILES, 14, 40, &mut bus);
        assert_eq!(bus.len(), 2 * BITS_PER_ROW);

        bus.clear();
        refresh_region(&fb, &ARENA_TILES, 6, 6, &mut bus);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_region_starts_at_requested_row() {
        let mut fb = Framebuffer::new();
        fb.set(0, 3, 1);
        let mut bus = BitRecorder::new();
        refresh_region(&fb, &ARENA_TILES, 3, 4, &mut bus);
        let bytes = bus.bytes();
        // First byte of each sub-row is the border nibble in the high half.
        for sub_row in 0..4 {
            assert_eq!(bytes[sub_row * BYTES_PER_SUB_ROW], 0xF0);
        }
    }

    #[test]
    fn test_split_uses_each_table_on_its_side() {
        let mut fb = Framebuffer::new();
        // Same code on both sides of the split renders differently.
        let code = letter_code('S');
        assert_eq!(code, digit_code(0));
        fb.set(1, 0, code);
        fb.set(2, 0, code);

        let mut bus = BitRecorder::new();
        refresh_split(&fb, 0, 2, &LETTERS, &DIGITS, &mut bus);
        assert_eq!(bus.len(), BITS_PER_ROW);

        let bytes = bus.bytes();
        for sub_row in 0..4u8 {
            let letter = LETTERS.glyph(code).row(sub_row);
            let digit = DIGITS.glyph(code).row(sub_row);
            let base = sub_row as usize * BYTES_PER_SUB_ROW;
            assert_eq!(bytes[base], letter, "x=0 blank, x=1 letter");
            assert_eq!(bytes[base + 1], digit << 4, "x=2 digit, x=3 blank");
        }
    }

    #[test]
    fn test_split_off_screen_row_sends_nothing() {
        let fb = Framebuffer::new();
        let mut bus = BitRecorder::new();
        refresh_split(&fb, 16, 2, &LETTERS, &DIGITS, &mut bus);
        assert!(bus.is_empty());
    }
}
