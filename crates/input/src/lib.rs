//! Button input: sampling, pacing, scripted sequences and key mapping.
//!
//! The firmware reads its buttons through [`Peripheral::poll_buttons`](types::Peripheral).
//! How often it polls between ticks is a [`TickScheduler`] decision; a
//! [`Debounce`] latch keeps presses seen between ticks. Hosts without real
//! buttons feed an [`InputScript`] or map terminal keys with [`map`].

pub mod debounce;
pub mod map;
pub mod scheduler;
pub mod script;

pub use tinyboy_types as types;

pub use debounce::Debounce;
pub use map::{button_for_key, should_quit, HeldKeys};
pub use scheduler::{InputMode, TickScheduler};
pub use script::{InputScript, ScriptError, ScriptErrorKind};
