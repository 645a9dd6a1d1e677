//! Lifetime statistics for Beat the Box.
//!
//! [`UserStats`] is the persisted aggregate. [`StatsStore`] loads and updates it
//! through a [`KeyValueStore`], swallowing persistence failures so the game
//! never has to care. [`StatsRecorder`] moves those writes off the game loop.
//!
//! ```
//! use std::sync::Arc;
//! use beat_the_box_stats::{MemoryStore, StatsStore};
//! use beat_the_box_core::RoundResult;
//! use beat_the_box_types::GameMode;
//!
//! let store = StatsStore::new(Arc::new(MemoryStore::new()));
//! let stats = store.record_round_end(&RoundResult {
//!     won: true,
//!     piles_remaining: 6,
//!     mode: GameMode::Casual,
//!     longest_guess_streak: 5,
//!     score: 210,
//! });
//! assert_eq!(stats.games_won, 1);
//! assert_eq!(store.load().best_piles_remaining, 6);
//! ```

pub mod error;
pub mod kv;
pub mod prefs;
pub mod recorder;
pub mod store;
pub mod user_stats;

pub use beat_the_box_types as types;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use prefs::{InterstitialCadence, OnboardingFlag, DEFAULT_AD_INTERVAL};
pub use recorder::{StatsCommand, StatsRecorder};
pub use store::{StatsStore, STATS_KEY};
pub use user_stats::{ModeRecord, UserStats, STATS_VERSION};
