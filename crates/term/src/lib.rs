//! Terminal front end for Beat the Box.
//!
//! Rendering is split in two: [`GameView`] is a pure function from a round
//! snapshot to a framebuffer, and [`TerminalRenderer`] flushes framebuffers to
//! the terminal. Neither knows any game rules.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use beat_the_box_core as core;
pub use beat_the_box_stats as stats;
pub use beat_the_box_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{outcome_line, score_line, stats_lines, status_line, GameView, Hud, Viewport};
pub use renderer::{encode_full_into, encode_rows_into, TerminalRenderer};
