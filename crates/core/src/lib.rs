//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and the round state machine for Beat the Box.
//! It has **no dependencies** on UI, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same shuffles and deals
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Drives the terminal front end or any other presentation layer
//!
//! # Module Structure
//!
//! - [`card`]: Card model and the canonical 52-card order
//! - [`deck`]: Unbiased shuffling and the front-drawn deck
//! - [`guess`]: Higher/lower/same resolution
//! - [`pile`]: Player piles and their active/flipped status
//! - [`scoring`]: Per-guess points and the end-of-round settlement
//! - [`game_state`]: The round state machine (commands and queries)
//! - [`snapshot`]: Read-only round view for renderers
//!
//! # Game Rules
//!
//! - Each pile starts with one dealt card; the player guesses whether the next
//!   card from the deck is higher, lower or the same rank as the pile's top card.
//! - A correct guess stacks the card and extends the guess streak. A correct
//!   "same" earns an extra life outside zen.
//! - A wrong guess costs a life, or flips the pile when none are left.
//! - The round is won when the deck runs out and lost when every pile is flipped.
//! - Zen rounds reshuffle an empty deck and only end on request.
//!
//! # Example
//!
//! ```
//! use beat_the_box_core::GameState;
//! use beat_the_box_types::{GameMode, GuessKind, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start_new_game(Some(GameMode::Casual));
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.select_pile(0);
//! game.make_guess(0, GuessKind::Higher);
//!
//! let outcome = game.take_last_outcome().unwrap();
//! assert_eq!(outcome.pile, 0);
//! assert_eq!(game.remaining_cards(), 42);
//! ```

pub mod card;
pub mod deck;
pub mod game_state;
pub mod guess;
pub mod pile;
pub mod scoring;
pub mod snapshot;

pub use beat_the_box_types as types;

// Re-export commonly used types for convenience
pub use card::{create_deck, Card};
pub use deck::{shuffle, Deck};
pub use game_state::{GameState, GuessOutcome, RoundResult};
pub use guess::is_guess_correct;
pub use pile::{Pile, PileStatus};
pub use scoring::{guess_score, settle_round, Settlement};
pub use snapshot::{GameSnapshot, PileSnapshot};
