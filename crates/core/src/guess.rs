//! Guess resolution.

use crate::card::Card;
use crate::types::GuessKind;

/// Compare `next` against `current` by numeric rank only. Suits never matter
/// and Ace is always 1.
pub fn is_guess_correct(current: Card, next: Card, guess: GuessKind) -> bool {
    let (current, next) = (current.numeric_rank(), next.numeric_rank());
    match guess {
        GuessKind::Higher => next > current,
        GuessKind::Lower => next < current,
        GuessKind::Same => next == current,
    }
}
