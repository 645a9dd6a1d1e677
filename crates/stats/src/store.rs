//! Statistics store on top of a [`KeyValueStore`].
//!
//! Persistence problems are logged and swallowed here: callers always get a
//! usable [`UserStats`], falling back to defaults.

use std::sync::Arc;

use beat_the_box_core::RoundResult;

use crate::kv::KeyValueStore;
use crate::user_stats::UserStats;

/// Key holding the JSON-encoded [`UserStats`].
pub const STATS_KEY: &str = "user_stats";

/// Loads, updates and saves [`UserStats`].
#[derive(Clone)]
pub struct StatsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl StatsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    /// Stored stats, or defaults when nothing usable is stored.
    ///
    /// When the stored payload (or the store itself) cannot be read, defaults
    /// are written back. Older payloads are migrated and written back.
    pub fn load(&self) -> UserStats {
        let text = match self.kv.get(STATS_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return UserStats::default(),
            Err(e) => {
                tracing::warn!("failed to read stats, resetting to defaults: {}", e);
                let stats = UserStats::default();
                self.save(&stats);
                return stats;
            }
        };

        match serde_json::from_str::<UserStats>(&text) {
            Ok(mut stats) => {
                if stats.migrate() {
                    tracing::debug!("migrated stats to version {}", stats.version);
                    self.save(&stats);
                }
                stats
            }
            Err(e) => {
                tracing::warn!("stored stats are corrupt, resetting to defaults: {}", e);
                let stats = UserStats::default();
                self.save(&stats);
                stats
            }
        }
    }

    /// Returns false if the write failed (already logged).
    pub fn save(&self, stats: &UserStats) -> bool {
        let text = match serde_json::to_string(stats) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("failed to encode stats: {}", e);
                return false;
            }
        };
        match self.kv.set(STATS_KEY, &text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to save stats: {}", e);
                false
            }
        }
    }

    /// Apply a finished round and persist. Returns the updated stats.
    pub fn record_round_end(&self, result: &RoundResult) -> UserStats {
        let mut stats = self.load();
        stats.record_round_end(result);
        self.save(&stats);
        tracing::debug!(
            "recorded {} round (won: {}, score: {})",
            result.mode.as_str(),
            result.won,
            result.score
        );
        stats
    }

    pub fn record_guess(&self, correct: bool) -> UserStats {
        let mut stats = self.load();
        stats.record_guess(correct);
        self.save(&stats);
        stats
    }

    /// Forget everything; the next [`load`](Self::load) yields defaults.
    pub fn reset(&self) {
        if let Err(e) = self.kv.remove(STATS_KEY) {
            tracing::warn!("failed to reset stats: {}", e);
        }
    }
}
