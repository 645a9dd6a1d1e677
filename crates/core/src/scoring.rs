//! Scoring module - per-guess rewards and the end-of-round settlement
//!
//! - A correct guess is worth a flat 10 points.
//! - Once the streak reaches 3, that guess is worth `streak * 10` instead.
//!   Earlier guesses in the streak are not re-scored.
//! - At round end every pile settles once: +10 if still active, -10 if flipped.
//!   A won round also earns a flat 100 bonus.

use crate::pile::Pile;
use crate::types::{PILE_SETTLEMENT_POINTS, POINTS_PER_GUESS, STREAK_MULTIPLIER_THRESHOLD, WIN_BONUS};

/// Score delta for a correct guess, given the streak *after* counting it.
pub fn guess_score(streak: u32) -> i32 {
    if streak >= STREAK_MULTIPLIER_THRESHOLD {
        (streak as i32).saturating_mul(POINTS_PER_GUESS)
    } else {
        POINTS_PER_GUESS
    }
}

/// Breakdown of the end-of-round adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Sum of per-pile bonuses and penalties.
    pub pile_adjustment: i32,
    /// `WIN_BONUS` for a won round, 0 otherwise.
    pub win_bonus: i32,
    pub total: i32,
}

/// Compute the adjustment applied once when a round ends.
pub fn settle_round(piles: &[Pile], won: bool) -> Settlement {
    let pile_adjustment = piles
        .iter()
        .map(|p| {
            if p.is_flipped() {
                -PILE_SETTLEMENT_POINTS
            } else {
                PILE_SETTLEMENT_POINTS
            }
        })
        .sum();
    let win_bonus = if won { WIN_BONUS } else { 0 };

    Settlement {
        pile_adjustment,
        win_bonus,
        total: pile_adjustment + win_bonus,
    }
}
