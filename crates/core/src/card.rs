//! Playing cards and the canonical 52-card deck order.

use std::fmt;

use crate::types::{Color, Rank, Suit, CARDS_PER_DECK};

/// A single playing card. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Numeric rank in `1..=13`, Ace low.
    pub fn numeric_rank(&self) -> u8 {
        self.rank.value()
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Short label such as `"10♥"` or `"K♠"`.
    pub fn label(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// A fresh, unshuffled deck: suit-major (hearts, diamonds, clubs, spades),
/// rank-minor (A..K).
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(CARDS_PER_DECK);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}
