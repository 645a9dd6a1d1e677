//! Terminal input module.
//!
//! Maps `crossterm` key events into front-end [`Command`]s. The mapping is pure;
//! the binary decides what each command does to the engine.

pub mod map;

pub use beat_the_box_types as types;

pub use map::{handle_key_event, should_quit, Command};
