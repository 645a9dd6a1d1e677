//! Deck module - shuffled draw pile
//!
//! Builds one or more standard decks, shuffles them with an unbiased
//! Fisher-Yates (`rand`'s `SliceRandom::shuffle`) and hands out cards from the
//! front. The RNG is owned by the caller, so a seeded `StdRng` reproduces the
//! same deal.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{create_deck, Card};

/// Return a shuffled copy of `cards`. The input is left untouched.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Draw pile, consumed strictly from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// `deck_count` standard decks, concatenated and shuffled.
    pub fn fresh<R: Rng + ?Sized>(deck_count: usize, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(deck_count * 52);
        for _ in 0..deck_count {
            cards.extend(create_deck());
        }
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    /// Use the given order as-is. The first card is drawn first.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Remove and return the front card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Peek at the front card without removing it.
    pub fn peek(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }
}
