//! Persisted lifetime statistics.
//!
//! Stored as camelCase JSON under the `user_stats` key. Fields missing from an
//! older payload, or holding a value of the wrong type (older clients wrote
//! `null` for a lost number), take their defaults without touching the other
//! fields. Fields this build does not know about are kept in `extra` and
//! written back untouched.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::GameMode;
use beat_the_box_core::RoundResult;

/// Schema version written by this build.
pub const STATS_VERSION: u32 = 2;

/// Payloads without a `version` field predate versioning.
fn legacy_version() -> u32 {
    1
}

/// Deserialize `T`, falling back to its default when the stored value has
/// the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_version<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| legacy_version()))
}

/// Per-entry recovery: one malformed mode never discards the others.
fn lenient_mode_stats<'de, D>(deserializer: D) -> Result<BTreeMap<String, ModeRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(default_mode_stats());
    };
    Ok(entries
        .into_iter()
        .map(|(mode, record)| (mode, serde_json::from_value(record).unwrap_or_default()))
        .collect())
}

/// Per-mode win/loss counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeRecord {
    #[serde(deserialize_with = "lenient")]
    pub games_played: u32,
    #[serde(deserialize_with = "lenient")]
    pub games_won: u32,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModeRecord {
    /// Win percentage in `0.0..=100.0`; zero when nothing was played.
    pub fn win_rate(&self) -> f64 {
        percentage(self.games_won, self.games_played)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    #[serde(default = "legacy_version", deserialize_with = "lenient_version")]
    pub version: u32,
    #[serde(deserialize_with = "lenient")]
    pub games_played: u32,
    #[serde(deserialize_with = "lenient")]
    pub games_won: u32,
    #[serde(deserialize_with = "lenient")]
    pub best_piles_remaining: usize,
    #[serde(deserialize_with = "lenient")]
    pub longest_win_streak: u32,
    #[serde(deserialize_with = "lenient")]
    pub current_win_streak: u32,
    #[serde(deserialize_with = "lenient")]
    pub longest_guess_streak: u32,
    #[serde(deserialize_with = "lenient")]
    pub current_guess_streak: u32,
    #[serde(deserialize_with = "lenient")]
    pub high_score: i32,
    #[serde(deserialize_with = "lenient")]
    pub zen_mode_high_score: i32,
    #[serde(deserialize_with = "lenient_mode_stats")]
    pub mode_stats: BTreeMap<String, ModeRecord>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            version: STATS_VERSION,
            games_played: 0,
            games_won: 0,
            best_piles_remaining: 0,
            longest_win_streak: 0,
            current_win_streak: 0,
            longest_guess_streak: 0,
            current_guess_streak: 0,
            high_score: 0,
            zen_mode_high_score: 0,
            mode_stats: default_mode_stats(),
            extra: BTreeMap::new(),
        }
    }
}

/// Zen rounds are never counted per mode.
fn default_mode_stats() -> BTreeMap<String, ModeRecord> {
    GameMode::ALL
        .iter()
        .filter(|mode| !mode.is_zen())
        .map(|mode| (mode.as_str().to_string(), ModeRecord::default()))
        .collect()
}

fn percentage(won: u32, played: u32) -> f64 {
    if played == 0 {
        0.0
    } else {
        f64::from(won) / f64::from(played) * 100.0
    }
}

impl UserStats {
    /// Bring an older payload up to [`STATS_VERSION`].
    ///
    /// Upgrades are additive: missing mode entries are created, nothing is
    /// removed or renamed. Returns true when anything changed.
    pub fn migrate(&mut self) -> bool {
        if self.version >= STATS_VERSION {
            return false;
        }
        for (key, record) in default_mode_stats() {
            self.mode_stats.entry(key).or_insert(record);
        }
        self.version = STATS_VERSION;
        true
    }

    /// Fold a finished round into the totals.
    pub fn record_round_end(&mut self, result: &RoundResult) {
        if result.mode.is_zen() {
            self.zen_mode_high_score = self.zen_mode_high_score.max(result.score);
            return;
        }

        self.games_played += 1;
        let record = self
            .mode_stats
            .entry(result.mode.as_str().to_string())
            .or_default();
        record.games_played += 1;

        if result.won {
            self.games_won += 1;
            record.games_won += 1;
            self.current_win_streak += 1;
            self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
            self.best_piles_remaining = self.best_piles_remaining.max(result.piles_remaining);
        } else {
            self.current_win_streak = 0;
        }

        self.high_score = self.high_score.max(result.score);
        self.longest_guess_streak = self.longest_guess_streak.max(result.longest_guess_streak);
        self.current_guess_streak = 0;
    }

    pub fn record_guess(&mut self, correct: bool) {
        if correct {
            self.current_guess_streak += 1;
            self.longest_guess_streak = self.longest_guess_streak.max(self.current_guess_streak);
        } else {
            self.current_guess_streak = 0;
        }
    }

    /// Overall win percentage.
    pub fn win_rate(&self) -> f64 {
        percentage(self.games_won, self.games_played)
    }

    /// Win percentage for one mode; zero when the mode was never played.
    pub fn mode_win_rate(&self, mode: GameMode) -> f64 {
        self.mode_stats
            .get(mode.as_str())
            .map_or(0.0, ModeRecord::win_rate)
    }

    pub fn mode_record(&self, mode: GameMode) -> Option<&ModeRecord> {
        self.mode_stats.get(mode.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(mode: GameMode, won: bool, piles_remaining: usize, streak: u32, score: i32) -> RoundResult {
        RoundResult {
            won,
            piles_remaining,
            mode,
            longest_guess_streak: streak,
            score,
        }
    }

    #[test]
    fn test_defaults() {
        let stats = UserStats::default();
        assert_eq!(stats.version, STATS_VERSION);
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.mode_stats.len(), 3);
        assert!(stats.mode_stats.contains_key("casual"));
        assert!(stats.mode_stats.contains_key("standard"));
        assert!(stats.mode_stats.contains_key("brutal"));
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = serde_json::to_value(UserStats::default()).unwrap();
        assert!(json.get("gamesPlayed").is_some());
        assert!(json.get("zenModeHighScore").is_some());
        assert!(json.get("modeStats").unwrap().get("casual").unwrap().get("gamesWon").is_some());
    }

    #[test]
    fn test_win_updates_streaks_and_best_piles() {
        let mut stats = UserStats::default();
        stats.record_guess(true);
        stats.record_guess(true);
        stats.record_round_end(&result(GameMode::Casual, true, 4, 6, 250));
        stats.record_round_end(&result(GameMode::Casual, true, 2, 1, 120));

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.current_win_streak, 2);
        assert_eq!(stats.longest_win_streak, 2);
        assert_eq!(stats.best_piles_remaining, 4);
        assert_eq!(stats.longest_guess_streak, 6);
        assert_eq!(stats.current_guess_streak, 0);
        assert_eq!(stats.high_score, 250);
        assert_eq!(stats.mode_win_rate(GameMode::Casual), 100.0);
    }

    #[test]
    fn test_loss_resets_win_streak() {
        let mut stats = UserStats::default();
        stats.record_round_end(&result(GameMode::Standard, true, 3, 2, 150));
        stats.record_round_end(&result(GameMode::Standard, false, 0, 2, -90));

        assert_eq!(stats.current_win_streak, 0);
        assert_eq!(stats.longest_win_streak, 1);
        assert_eq!(stats.high_score, 150);
        assert_eq!(stats.win_rate(), 50.0);
        let record = stats.mode_record(GameMode::Standard).unwrap();
        assert_eq!((record.games_played, record.games_won), (2, 1));
    }

    #[test]
    fn test_zen_round_only_touches_zen_high_score() {
        let mut stats = UserStats::default();
        stats.record_guess(true);
        let before = stats.clone();

        stats.record_round_end(&result(GameMode::Zen, true, 9, 12, 640));

        assert_eq!(stats.zen_mode_high_score, 640);
        let mut expected = before;
        expected.zen_mode_high_score = 640;
        assert_eq!(stats, expected);
    }

    #[test]
    fn test_record_guess_rolls_into_longest() {
        let mut stats = UserStats::default();
        for _ in 0..3 {
            stats.record_guess(true);
        }
        stats.record_guess(false);
        stats.record_guess(true);
        assert_eq!(stats.current_guess_streak, 1);
        assert_eq!(stats.longest_guess_streak, 3);
    }

    #[test]
    fn test_legacy_payload_keeps_unknown_fields() {
        let legacy = r#"{
            "gamesPlayed": 5,
            "gamesWon": 2,
            "modeStats": {
                "casual": { "gamesPlayed": 3, "gamesWon": 2 },
                "risky": { "gamesPlayed": 1, "gamesWon": 0 },
                "no_mercy": { "gamesPlayed": 1, "gamesWon": 0 }
            },
            "favouriteColour": "green"
        }"#;
        let mut stats: UserStats = serde_json::from_str(legacy).unwrap();
        assert_eq!(stats.version, 1);
        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.longest_win_streak, 0);

        assert!(stats.migrate());
        assert_eq!(stats.version, STATS_VERSION);
        assert!(stats.mode_stats.contains_key("brutal"));
        assert_eq!(stats.mode_stats["casual"].games_played, 3);
        assert!(!stats.migrate());

        let written = serde_json::to_value(&stats).unwrap();
        assert_eq!(written["favouriteColour"], "green");
        assert_eq!(written["modeStats"]["risky"]["gamesPlayed"], 1);
        assert_eq!(written["version"], STATS_VERSION);
    }

    #[test]
    fn test_null_and_mistyped_fields_default_alone() {
        let stored = r#"{
            "version": 2,
            "gamesPlayed": 40,
            "gamesWon": 12,
            "highScore": 900,
            "zenModeHighScore": null,
            "longestWinStreak": "seven",
            "modeStats": {
                "casual": { "gamesPlayed": 30, "gamesWon": null },
                "standard": null,
                "brutal": { "gamesPlayed": 10, "gamesWon": 4 }
            }
        }"#;
        let stats: UserStats = serde_json::from_str(stored).unwrap();

        assert_eq!(stats.games_played, 40);
        assert_eq!(stats.games_won, 12);
        assert_eq!(stats.high_score, 900);
        assert_eq!(stats.zen_mode_high_score, 0);
        assert_eq!(stats.longest_win_streak, 0);
        assert_eq!(stats.mode_stats["casual"].games_played, 30);
        assert_eq!(stats.mode_stats["casual"].games_won, 0);
        assert_eq!(stats.mode_stats["standard"], ModeRecord::default());
        assert_eq!(stats.mode_stats["brutal"].games_won, 4);
        assert!(stats.extra.is_empty());
    }

    #[test]
    fn test_mistyped_version_and_mode_stats() {
        let stored = r#"{"version":null,"gamesPlayed":2,"modeStats":[]}"#;
        let mut stats: UserStats = serde_json::from_str(stored).unwrap();
        assert_eq!(stats.version, 1);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.mode_stats.len(), 3);
        assert!(stats.migrate());
    }

    #[test]
    fn test_missing_mode_entry_is_created() {
        let mut stats = UserStats::default();
        stats.mode_stats.remove("brutal");
        stats.record_round_end(&result(GameMode::Brutal, false, 0, 0, 0));
        assert_eq!(stats.mode_record(GameMode::Brutal).unwrap().games_played, 1);
        assert_eq!(stats.games_played, 1);
    }
}
