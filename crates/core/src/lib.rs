//! Core game logic module - pure, deterministic, and testable
//!
//! The firmware keeps no board of its own: the framebuffer is the playfield,
//! and a non-empty code inside the arena means the cell is occupied. This
//! crate holds the rules that read and write that framebuffer. It never
//! touches the bus or the buttons; the engine passes both in.
//!
//! # Module Structure
//!
//! - [`pieces`]: the six tetrominoes and counter-clockwise rotation
//! - [`arena`]: collision probe, piece drawing, border and line clears
//! - [`scoring`]: points per line-clear pass
//! - [`hud`]: score and lines readouts, labels, preview box
//! - [`session`]: the Restart / Landed / Playing state machine
//! - [`snapshot`]: serializable view of a session
//!
//! # Game Rules
//!
//! - Pieces arrive in a fixed cycle: I, J, L, O, S, Z, then I again
//! - Each tick applies at most one action, then gravity moves the piece one row
//! - DOWN is a hard drop
//! - There is no game over; a stack reaching the top keeps spawning pieces
//!
//! # Example
//!
//! ```
//! use tinyboy_core::{Session, display::Framebuffer, types::{Buttons, SessionState}};
//!
//! let mut fb = Framebuffer::new();
//! let mut session = Session::new();
//! session.advance(&mut fb);
//! assert_eq!(session.state(), SessionState::Playing);
//!
//! let report = session.tick(&mut fb, Buttons::DOWN);
//! assert!(report.landed);
//! ```

pub mod arena;
pub mod hud;
pub mod pieces;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tinyboy_display as display;
pub use tinyboy_types as types;

pub use arena::{clear_full_rows, probe, ClearedRows};
pub use pieces::Piece;
pub use scoring::calculate_line_score;
pub use session::{Session, TickReport};
pub use snapshot::SessionSnapshot;
