//! Arena module - collision probing, piece drawing and line clears
//!
//! The arena is the 10x13 playfield inside the framebuffer (x 1..=10,
//! y 2..=14). The framebuffer itself is the board: a non-empty code at an
//! arena cell means that cell is occupied.
//!
//! A piece's reference position `(x, y)` is probed at cells
//! `(x - 1 + j, y - 1 + i)` and drawn one row higher, at
//! `(x - 1 + j, y - 2 + i)`. The probe therefore answers "can this piece fall
//! one more row", which is what gravity and hard drop need.

use arrayvec::ArrayVec;
use log::debug;

use crate::display::glyphs::tile;
use crate::display::Framebuffer;
use crate::pieces::Piece;
use crate::types::{
    CellCode, ProbeResult, ARENA_BOTTOM, ARENA_HEIGHT, ARENA_MAX_X, ARENA_MIN_X, ARENA_TOP,
    BORDER_RIGHT_X, EMPTY, FLOOR_Y,
};

/// Rows the drawn piece sits above its probe position.
const DRAW_LIFT: i8 = 1;

/// Row indices cleared in one pass, in the order they were removed.
pub type ClearedRows = ArrayVec<i8, ARENA_HEIGHT>;

#[inline(always)]
fn column_in_arena(x: i8) -> bool {
    (ARENA_MIN_X..=ARENA_MAX_X).contains(&x)
}

#[inline(always)]
fn row_in_arena(y: i8) -> bool {
    (ARENA_TOP..=ARENA_BOTTOM).contains(&y)
}

/// Classify `piece` at reference position (`x`, `y`).
///
/// Column bounds are checked for every set bit before any vertical
/// condition, so a sideways move into a wall is always `Collided` and never
/// mistaken for a landing.
pub fn probe(fb: &Framebuffer, piece: &Piece, x: i8, y: i8) -> ProbeResult {
    let cells = || piece.cells().map(|(j, i)| (x - 1 + j, y - 1 + i));

    if cells().any(|(cx, _)| !column_in_arena(cx)) {
        return ProbeResult::Collided;
    }

    // Overflow signal: the piece reaches the arena's top row.
    let is_full = cells().any(|(_, cy)| cy == ARENA_TOP);

    for (cx, cy) in cells() {
        if cy > ARENA_BOTTOM {
            return ProbeResult::Landed;
        }
        if row_in_arena(cy) && fb.is_occupied(cx, cy) {
            return if is_full {
                ProbeResult::LandedFull
            } else {
                ProbeResult::Landed
            };
        }
    }

    ProbeResult::Playing
}

/// Draw `piece` at reference position (`x`, `y`) with `code`, clipped to the
/// arena. Drawing with [`EMPTY`] erases it.
pub fn draw_piece(fb: &mut Framebuffer, piece: &Piece, x: i8, y: i8, code: CellCode) {
    for (j, i) in piece.cells() {
        let (cx, cy) = (x - 1 + j, y - 1 - DRAW_LIFT + i);
        if column_in_arena(cx) && row_in_arena(cy) {
            fb.set(cx, cy, code);
        }
    }
}

/// Erase `piece` drawn at reference position (`x`, `y`).
pub fn erase_piece(fb: &mut Framebuffer, piece: &Piece, x: i8, y: i8) {
    draw_piece(fb, piece, x, y, EMPTY);
}

/// Whether every arena column of row `y` is occupied.
pub fn line_full(fb: &Framebuffer, y: i8) -> bool {
    row_in_arena(y) && (ARENA_MIN_X..=ARENA_MAX_X).all(|x| fb.is_occupied(x, y))
}

/// Remove row `y`: every arena row above it moves down by one and the top
/// row becomes empty. Rows below `y` are untouched.
pub fn collapse_row(fb: &mut Framebuffer, y: i8) {
    if !row_in_arena(y) {
        return;
    }
    for x in ARENA_MIN_X..=ARENA_MAX_X {
        for row in ((ARENA_TOP + 1)..=y).rev() {
            let above = fb.get(x, row - 1).unwrap_or(EMPTY);
            fb.set(x, row, above);
        }
        fb.set(x, ARENA_TOP, EMPTY);
    }
}

/// Clear every full row, bottom to top.
///
/// After a collapse the same row index is tested again, since the row that
/// just moved into it may be full as well.
pub fn clear_full_rows(fb: &mut Framebuffer) -> ClearedRows {
    let mut cleared = ClearedRows::new();
    let mut y = ARENA_BOTTOM;
    while y >= ARENA_TOP {
        if line_full(fb, y) {
            collapse_row(fb, y);
            if cleared.try_push(y).is_err() {
                break;
            }
        } else {
            y -= 1;
        }
    }
    if !cleared.is_empty() {
        debug!("cleared {} row(s): {:?}", cleared.len(), cleared.as_slice());
    }
    cleared
}

/// Empty the arena interior.
pub fn clear_arena(fb: &mut Framebuffer) {
    fb.fill_rect(
        ARENA_MIN_X,
        ARENA_TOP,
        ARENA_MAX_X - ARENA_MIN_X + 1,
        ARENA_BOTTOM - ARENA_TOP + 1,
        EMPTY,
    );
}

/// Draw the walls and floor around the arena.
pub fn draw_border(fb: &mut Framebuffer) {
    for y in ARENA_TOP..=FLOOR_Y {
        fb.set(ARENA_MIN_X - 1, y, tile::BORDER);
        fb.set(BORDER_RIGHT_X, y, tile::BORDER);
    }
    for x in (ARENA_MIN_X - 1)..=BORDER_RIGHT_X {
        fb.set(x, FLOOR_Y, tile::BORDER);
    }
}
