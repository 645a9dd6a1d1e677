//! A face-up pile built by guessing.

use crate::card::Card;

/// Whether a pile can still be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PileStatus {
    #[default]
    Active,
    /// Terminal for the round.
    Flipped,
}

/// Cards stacked bottom to top; the last one is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    cards: Vec<Card>,
    status: PileStatus,
}

impl Pile {
    /// A pile holding a single dealt card.
    pub fn new(card: Card) -> Self {
        Self {
            cards: vec![card],
            status: PileStatus::Active,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Visible card.
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn status(&self) -> PileStatus {
        self.status
    }

    pub fn is_flipped(&self) -> bool {
        self.status == PileStatus::Flipped
    }

    /// Same state as [`Pile::is_flipped`]; kept for callers that think in
    /// terms of "disabled".
    pub fn is_disabled(&self) -> bool {
        self.is_flipped()
    }

    pub fn is_selectable(&self) -> bool {
        self.status == PileStatus::Active && !self.cards.is_empty()
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn flip(&mut self) {
        self.status = PileStatus::Flipped;
    }
}
