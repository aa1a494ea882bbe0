//! Terminal front end: shows the bus picture in a terminal and feeds the
//! keyboard back as buttons.
//!
//! The terminal only ever sees what went over the bus. [`LcdView`] turns the
//! dot image of a [`BusScreen`](tinyboy_display::BusScreen) into half-block
//! characters, [`TerminalRenderer`] flushes the changed cells, and
//! [`TerminalPeripheral`] glues both to crossterm's event queue.

pub mod grid;
pub mod lcd_view;
pub mod peripheral;
pub mod renderer;

pub use tinyboy_types as types;

pub use grid::{Cell, CellStyle, Rgb, TextGrid};
pub use lcd_view::{LcdView, Viewport};
pub use peripheral::TerminalPeripheral;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
