//! Run loop tying the session, framebuffer, scheduler and peripheral together.
//!
//! - [`console`]: the [`Console`] loop and the per-tick frame layout
//! - [`headless`]: a [`Peripheral`](types::Peripheral) backed by a scripted
//!   button sequence, a virtual clock and a [`BusScreen`](tinyboy_display::BusScreen)

pub mod console;
pub mod headless;

pub use tinyboy_types as types;

pub use console::{render_frame, Console};
pub use headless::HeadlessPeripheral;
