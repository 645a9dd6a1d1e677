//! Error types raised by key-value store implementations.

use thiserror::Error;

/// Errors surfaced by [`KeyValueStore`](crate::KeyValueStore) backends.
///
/// These never reach the game loop; [`StatsStore`](crate::StatsStore) logs them
/// and falls back to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key-value store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
