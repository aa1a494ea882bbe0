//! HUD drawing: score and lines readouts, their labels, and the preview box.
//!
//! Rows 0 and 1 mix two code spaces: columns left of `LABEL_SPLIT_X` hold
//! letter codes, the rest digit codes. The renderer must use a split-line
//! refresh for these rows.

use crate::display::{digit_code, letter_code, sprite_code, Framebuffer};
use crate::pieces::Piece;
use crate::types::{
    PieceKind, EMPTY, LINES_ROW, NUMBER_FIELD_DIGITS, NUMBER_FIELD_X, PREVIEW_SIZE, PREVIEW_X,
    PREVIEW_Y, SCORE_ROW,
};

const SCORE_LABEL: &str = "SC";
const LINES_LABEL: &str = "LN";

fn draw_label(fb: &mut Framebuffer, y: i8, label: &str) {
    for (x, ch) in label.chars().enumerate() {
        fb.set(x as i8, y, letter_code(ch));
    }
}

/// Draw both row labels.
pub fn draw_labels(fb: &mut Framebuffer) {
    draw_label(fb, SCORE_ROW, SCORE_LABEL);
    draw_label(fb, LINES_ROW, LINES_LABEL);
}

/// Write `value` right-aligned into the numeric field of row `y`.
///
/// The field is six digits wide; higher digits are dropped. Leading
/// positions are blank rather than zero.
pub fn draw_number(fb: &mut Framebuffer, y: i8, value: u32) {
    let mut rest = value;
    for slot in (0..NUMBER_FIELD_DIGITS as i8).rev() {
        let x = NUMBER_FIELD_X + slot;
        let leading = rest == 0 && slot != NUMBER_FIELD_DIGITS as i8 - 1;
        let code = if leading {
            EMPTY
        } else {
            digit_code((rest % 10) as u8)
        };
        fb.set(x, y, code);
        rest /= 10;
    }
}

pub fn draw_score(fb: &mut Framebuffer, score: u32) {
    draw_number(fb, SCORE_ROW, score);
}

pub fn draw_lines(fb: &mut Framebuffer, lines: u32) {
    draw_number(fb, LINES_ROW, lines);
}

/// Show the canonical shape of `kind` in the preview box using `sprite`.
pub fn draw_preview(fb: &mut Framebuffer, kind: PieceKind, sprite: usize) {
    fb.fill_rect(PREVIEW_X, PREVIEW_Y, PREVIEW_SIZE, PREVIEW_SIZE, EMPTY);
    let code = sprite_code(sprite);
    for (j, i) in Piece::initialise(kind).cells() {
        fb.set(PREVIEW_X + j, PREVIEW_Y + i, code);
    }
}
