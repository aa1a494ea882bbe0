//! TinyBoy (workspace facade crate).
//!
//! Re-exports the workspace crates as `tinyboy::{core,display,engine,input,term,types}`
//! so the binary, integration tests and benchmarks share one import path.

pub use tinyboy_core as core;
pub use tinyboy_display as display;
pub use tinyboy_engine as engine;
pub use tinyboy_input as input;
pub use tinyboy_term as term;
pub use tinyboy_types as types;
