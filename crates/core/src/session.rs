//! Session module - the game state machine
//!
//! One `Session` holds everything that survives between ticks: the state
//! machine state, the active piece and its reference position, the queued
//! next piece, score, lines, and the preview sprite index. The framebuffer
//! is owned by the caller and passed in on every step; the session never
//! touches the bus.
//!
//! # States
//!
//! - `Restart`: clear the screen, reset counters, draw border and labels,
//!   then fall through to `Landed`.
//! - `Landed`: clear full rows, score them, spawn the queued piece, advance
//!   the preview, go to `Playing`.
//! - `Playing`: one tick per call to [`Session::tick`].

use log::{debug, trace};

use crate::arena;
use crate::display::{sprite_code, Framebuffer};
use crate::hud;
use crate::pieces::Piece;
use crate::scoring::calculate_line_score;
use crate::snapshot::SessionSnapshot;
use crate::types::{
    Buttons, CellCode, GameAction, PieceKind, ProbeResult, SessionState, SPAWN_X, SPAWN_Y,
    SPRITE_COUNT,
};

/// What one `Playing` tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The action that was actually applied, if any.
    pub action: Option<GameAction>,
    /// Probe result at the final position.
    pub probe: ProbeResult,
    /// Whether the piece landed this tick.
    pub landed: bool,
    pub x: i8,
    pub y: i8,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    /// First piece of every game.
    first_piece: PieceKind,
    kind: PieceKind,
    piece: Piece,
    /// Sprite code the active piece is drawn with.
    code: CellCode,
    x: i8,
    y: i8,
    /// Position the piece is currently drawn at, if it has been drawn.
    drawn_at: Option<(i8, i8)>,
    next_piece: PieceKind,
    preview_sprite: usize,
    score: u32,
    lines: u32,
    games: u32,
}

impl Session {
    /// A session that starts with the I piece.
    pub fn new() -> Self {
        Self::starting_with(PieceKind::I)
    }

    /// A session whose games start with `first` and continue in cycle order.
    pub fn starting_with(first: PieceKind) -> Self {
        Self {
            state: SessionState::Restart,
            first_piece: first,
            kind: first,
            piece: Piece::initialise(first),
            code: sprite_code(0),
            x: SPAWN_X,
            y: SPAWN_Y,
            drawn_at: None,
            next_piece: first,
            preview_sprite: 0,
            score: 0,
            lines: 0,
            games: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn code(&self) -> CellCode {
        self.code
    }

    /// Reference position of the active piece.
    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    pub fn preview_sprite(&self) -> usize {
        self.preview_sprite
    }

    /// Games started since power-on.
    pub fn games(&self) -> u32 {
        self.games
    }

    /// Request a new game; takes effect on the next [`Session::advance`].
    pub fn restart(&mut self) {
        self.state = SessionState::Restart;
    }

    /// Run the `Restart` and `Landed` transitions until the session is
    /// `Playing`. Does nothing when already playing.
    pub fn advance(&mut self, fb: &mut Framebuffer) {
        if self.state == SessionState::Restart {
            self.reset(fb);
            self.state = SessionState::Landed;
        }
        if self.state == SessionState::Landed {
            self.land(fb);
            self.state = SessionState::Playing;
        }
    }

    fn reset(&mut self, fb: &mut Framebuffer) {
        fb.clear();
        self.score = 0;
        self.lines = 0;
        self.next_piece = self.first_piece;
        self.preview_sprite = 0;
        self.drawn_at = None;
        self.games = self.games.wrapping_add(1);

        arena::draw_border(fb);
        hud::draw_labels(fb);
        debug!("restart: game {}", self.games);
    }

    fn land(&mut self, fb: &mut Framebuffer) {
        let cleared = arena::clear_full_rows(fb).len();
        if cleared > 0 {
            self.score = self.score.saturating_add(calculate_line_score(cleared));
            self.lines = self.lines.saturating_add(cleared as u32);
            debug!(
                "{} line(s) cleared: score {} lines {}",
                cleared, self.score, self.lines
            );
        }

        // The piece takes the sprite the preview showed it with.
        self.kind = self.next_piece;
        self.piece = Piece::initialise(self.kind);
        self.code = sprite_code(self.preview_sprite);
        self.next_piece = self.next_piece.next();
        self.preview_sprite = (self.preview_sprite + 1) % SPRITE_COUNT;

        hud::draw_score(fb, self.score);
        hud::draw_lines(fb, self.lines);
        hud::draw_preview(fb, self.next_piece, self.preview_sprite);

        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.drawn_at = None;
        debug!("spawn {:?}, next {:?}", self.kind, self.next_piece);
    }

    /// One `Playing` tick: erase, apply at most one action, fall, draw.
    ///
    /// The caller refreshes the display afterwards. Outside `Playing` this
    /// does nothing and reports the current position as `Playing`.
    pub fn tick(&mut self, fb: &mut Framebuffer, buttons: Buttons) -> TickReport {
        if self.state != SessionState::Playing {
            return TickReport {
                action: None,
                probe: ProbeResult::Playing,
                landed: false,
                x: self.x,
                y: self.y,
            };
        }

        if let Some((dx, dy)) = self.drawn_at.take() {
            arena::erase_piece(fb, &self.piece, dx, dy);
        }

        let action = GameAction::from_buttons(buttons).filter(|&action| self.apply(fb, action));

        let probe = arena::probe(fb, &self.piece, self.x, self.y);
        if probe == ProbeResult::Playing {
            self.y += 1;
        }

        arena::draw_piece(fb, &self.piece, self.x, self.y, self.code);
        self.drawn_at = Some((self.x, self.y));

        let landed = probe.is_landed();
        if landed {
            // LandedFull is reported but not acted on: there is no game over.
            self.state = SessionState::Landed;
            debug!("{:?} landed at ({}, {}): {:?}", self.kind, self.x, self.y, probe);
        }
        trace!("tick {:?} {:?} -> ({}, {})", buttons, action, self.x, self.y);

        TickReport {
            action,
            probe,
            landed,
            x: self.x,
            y: self.y,
        }
    }

    /// Apply `action` if the move is legal; returns whether anything changed.
    fn apply(&mut self, fb: &Framebuffer, action: GameAction) -> bool {
        match action {
            GameAction::Rotate => {
                // The rotated piece must fit where it will be drawn, which is
                // one row above its probe position.
                let rotated = self.piece.rotated();
                let fits = arena::probe(fb, &rotated, self.x, self.y - 1) == ProbeResult::Playing;
                if fits {
                    self.piece.rotate();
                }
                fits
            }
            GameAction::HardDrop => {
                let start = self.y;
                while arena::probe(fb, &self.piece, self.x, self.y) == ProbeResult::Playing {
                    self.y += 1;
                }
                self.y != start
            }
            GameAction::MoveLeft => self.shift(fb, -1),
            GameAction::MoveRight => self.shift(fb, 1),
        }
    }

    fn shift(&mut self, fb: &Framebuffer, dx: i8) -> bool {
        let moved = arena::probe(fb, &self.piece, self.x + dx, self.y) == ProbeResult::Playing;
        if moved {
            self.x += dx;
        }
        moved
    }

    pub fn snapshot(&self, fb: &Framebuffer) -> SessionSnapshot {
        SessionSnapshot::capture(self, fb)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
