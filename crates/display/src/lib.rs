//! TinyBoy display driver.
//!
//! A nibble-packed framebuffer of glyph cell codes, the glyph tables that give
//! those codes their dots, and the refresh paths that serialize the result onto
//! the clock+data bus.
//!
//! # Module Structure
//!
//! - [`framebuffer`]: 16x16 cell grid, two 4-bit codes per byte
//! - [`glyphs`]: 4x4 glyphs and the arena / digit / letter tables
//! - [`refresh`]: full, band and split-line composition
//! - [`transmitter`]: MSB-first byte serialization onto a [`BitSink`](types::BitSink)
//! - [`screen`]: receiving end of the bus, rebuilds the dot image
//!
//! # Example
//!
//! ```
//! use tinyboy_display::{refresh_full, BusScreen, Framebuffer, ARENA_TILES};
//!
//! let mut fb = Framebuffer::new();
//! fb.set(0, 0, 1);
//!
//! let mut screen = BusScreen::new();
//! refresh_full(&fb, &ARENA_TILES, &mut screen);
//! assert!(screen.dot(0, 0));
//! ```

pub mod framebuffer;
pub mod glyphs;
pub mod refresh;
pub mod screen;
pub mod transmitter;

pub use tinyboy_types as types;

pub use framebuffer::Framebuffer;
pub use glyphs::{digit_code, letter_code, sprite_code, Glyph, GlyphTable, ARENA_TILES, DIGITS, LETTERS};
pub use refresh::{refresh_full, refresh_region, refresh_split};
pub use screen::BusScreen;
pub use transmitter::{transmit_byte, transmit_bytes, BitRecorder};
