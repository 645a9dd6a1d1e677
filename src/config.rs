//! Runtime configuration for the terminal client.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file by the binary. Unset or unparseable values fall back to
//! defaults.

use std::env;
use std::path::PathBuf;

use crate::stats::DEFAULT_AD_INTERVAL;
use crate::types::GameMode;

const APP_NAME: &str = "beat-the-box";

/// File holding every persisted key.
pub const STORE_FILE_NAME: &str = "store.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Mode of the first round.
    pub mode: GameMode,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Rounds between interstitial slots.
    pub ad_interval: u32,
    /// Keep stats in memory only.
    pub stats_disabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            seed: None,
            data_dir: default_data_dir(),
            log_dir: default_log_dir(),
            ad_interval: DEFAULT_AD_INTERVAL,
            stats_disabled: false,
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BTB_MODE` - Initial mode: casual, standard, brutal or zen (default: casual)
    /// - `BTB_SEED` - Fixed RNG seed (default: random)
    /// - `BTB_DATA_DIR` - Stats directory (default: platform data dir)
    /// - `BTB_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `BTB_AD_INTERVAL` - Rounds between interstitial slots (default: 2)
    /// - `BTB_STATS_DISABLED` - `1`/`true` keeps stats in memory only
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(mode) = lookup("BTB_MODE").and_then(|v| GameMode::from_str(v.trim())) {
            config.mode = mode;
        }

        config.seed = read::<u64>(&lookup, "BTB_SEED");

        if let Some(dir) = lookup("BTB_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("BTB_LOG_DIR").filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(interval) = read::<u32>(&lookup, "BTB_AD_INTERVAL") {
            config.ad_interval = interval.max(1);
        }

        if let Some(value) = lookup("BTB_STATS_DISABLED") {
            let value = value.trim();
            config.stats_disabled = value == "1" || value.eq_ignore_ascii_case("true");
        }

        config
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Platform data directory, e.g. `~/.local/share/beat-the-box` on Linux.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory plus `logs`, e.g. `~/.cache/beat-the-box/logs`.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/beat-the-box"))
        .join("logs")
}
