use serde::Serialize;

use crate::display::Framebuffer;
use crate::session::Session;
use crate::types::{
    PieceKind, SessionState, ARENA_HEIGHT, ARENA_MIN_X, ARENA_TOP, ARENA_WIDTH, EMPTY,
};

/// Read-only view of a session, suitable for logging and JSON output.
///
/// `arena` holds the cell codes of the playfield, top row first, including
/// the active piece as currently drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: &'static str,
    pub score: u32,
    pub lines: u32,
    pub piece: &'static str,
    pub next_piece: &'static str,
    pub x: i8,
    pub y: i8,
    pub preview_sprite: usize,
    pub games: u32,
    pub arena: [[u8; ARENA_WIDTH]; ARENA_HEIGHT],
}

impl SessionSnapshot {
    pub fn capture(session: &Session, fb: &Framebuffer) -> Self {
        let (x, y) = session.position();
        let mut arena = [[EMPTY; ARENA_WIDTH]; ARENA_HEIGHT];
        for (row, cells) in arena.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = fb
                    .get(ARENA_MIN_X + col as i8, ARENA_TOP + row as i8)
                    .unwrap_or(EMPTY);
            }
        }
        Self {
            state: session.state().as_str(),
            score: session.score(),
            lines: session.lines(),
            piece: session.kind().as_str(),
            next_piece: session.next_piece().as_str(),
            x,
            y,
            preview_sprite: session.preview_sprite(),
            games: session.games(),
            arena,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing.as_str()
    }

    /// Occupied cells in the playfield.
    pub fn occupied(&self) -> usize {
        self.arena.iter().flatten().filter(|&&c| c != EMPTY).count()
    }

    pub fn piece_kind(&self) -> Option<PieceKind> {
        PieceKind::ALL.into_iter().find(|k| k.as_str() == self.piece)
    }
}
