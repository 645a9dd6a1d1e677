//! Small preferences kept next to the stats: the first-run help flag and the
//! interstitial cadence counter.

use std::sync::Arc;

use crate::kv::KeyValueStore;

pub const ONBOARDING_KEY: &str = "beatTheBox_onboardingViewed";
pub const GAMES_PLAYED_KEY: &str = "games_played_count";
pub const DEFAULT_AD_INTERVAL: u32 = 2;

/// Whether the first-run help has been shown.
#[derive(Clone)]
pub struct OnboardingFlag {
    kv: Arc<dyn KeyValueStore>,
}

impl OnboardingFlag {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read failures count as "not viewed".
    pub fn onboarding_viewed(&self) -> bool {
        match self.kv.get(ONBOARDING_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!("failed to read onboarding flag: {}", e);
                false
            }
        }
    }

    pub fn mark_onboarding_viewed(&self) -> bool {
        match self.kv.set(ONBOARDING_KEY, "true") {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to save onboarding flag: {}", e);
                false
            }
        }
    }
}

/// Counts finished rounds modulo an interval.
#[derive(Clone)]
pub struct InterstitialCadence {
    kv: Arc<dyn KeyValueStore>,
    interval: u32,
}

impl InterstitialCadence {
    /// An interval of zero is treated as one.
    pub fn new(kv: Arc<dyn KeyValueStore>, interval: u32) -> Self {
        Self {
            kv,
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Count one finished round. Returns true when the counter wraps to zero,
    /// i.e. an interstitial slot was reached.
    pub fn register_round(&self) -> bool {
        let current = match self.kv.get(GAMES_PLAYED_KEY) {
            Ok(value) => value.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(0),
            Err(e) => {
                tracing::warn!("failed to read round counter: {}", e);
                return false;
            }
        };

        let next = (current % self.interval + 1) % self.interval;
        if let Err(e) = self.kv.set(GAMES_PLAYED_KEY, &next.to_string()) {
            tracing::warn!("failed to save round counter: {}", e);
            return false;
        }
        next == 0
    }
}
