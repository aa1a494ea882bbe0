//! Piece tests - rotation closure and probe classification

use tinyboy::core::arena::{draw_border, probe};
use tinyboy::core::Piece;
use tinyboy::display::Framebuffer;
use tinyboy::types::{PieceKind, ProbeResult, ARENA_BOTTOM, ARENA_MAX_X, ARENA_MIN_X};

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let start = Piece::initialise(kind);
        let mut piece = start;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, start, "{kind:?}");
    }
}

#[test]
fn test_initialise_copies_fresh_shape() {
    let mut piece = Piece::initialise(PieceKind::L);
    piece.rotate();
    assert_ne!(piece, Piece::initialise(PieceKind::L));
}

#[test]
fn test_side_walls_collide_before_floor() {
    let fb = Framebuffer::new();
    for kind in PieceKind::ALL {
        let piece = Piece::initialise(kind);
        let (min_j, max_j) = piece
            .cells()
            .fold((i8::MAX, i8::MIN), |(lo, hi), (j, _)| (lo.min(j), hi.max(j)));
        // Leftmost cell one column left of the arena, below the floor.
        let x = ARENA_MIN_X - min_j;
        assert_eq!(probe(&fb, &piece, x, ARENA_BOTTOM + 3), ProbeResult::Collided, "{kind:?}");
        let x = ARENA_MAX_X + 2 - max_j;
        assert_eq!(probe(&fb, &piece, x, ARENA_BOTTOM + 3), ProbeResult::Collided, "{kind:?}");
    }
}

#[test]
fn test_border_is_not_an_obstacle_inside_arena() {
    let mut fb = Framebuffer::new();
    draw_border(&mut fb);
    let piece = Piece::initialise(PieceKind::I);
    // I spans columns 1..=4 at x = 2, touching the left wall column.
    assert_eq!(probe(&fb, &piece, 2, 8), ProbeResult::Playing);
}
