//! Beat the Box (workspace facade crate).
//!
//! The game lives in dedicated crates under `crates/`; this package re-exports
//! them under short module names and adds the client [`config`].

pub mod config;

pub use beat_the_box_core as core;
pub use beat_the_box_input as input;
pub use beat_the_box_stats as stats;
pub use beat_the_box_term as term;
pub use beat_the_box_types as types;
