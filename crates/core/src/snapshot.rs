use arrayvec::ArrayVec;

use crate::card::Card;
use crate::game_state::GuessOutcome;
use crate::pile::{Pile, PileStatus};
use crate::types::{GameMode, Lives, Phase, MAX_PILES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PileSnapshot {
    pub top: Option<Card>,
    pub depth: usize,
    pub status: PileStatus,
}

impl From<&Pile> for PileSnapshot {
    fn from(value: &Pile) -> Self {
        Self {
            top: value.top(),
            depth: value.len(),
            status: value.status(),
        }
    }
}

impl PileSnapshot {
    pub fn is_flipped(&self) -> bool {
        self.status == PileStatus::Flipped
    }
}

/// Read-only view of a round for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub piles: ArrayVec<PileSnapshot, MAX_PILES>,
    pub phase: Phase,
    pub mode: GameMode,
    pub lives: Lives,
    pub score: i32,
    pub guess_streak: u32,
    pub longest_guess_streak: u32,
    pub high_score: i32,
    pub zen_high_score: i32,
    pub remaining_cards: usize,
    pub selected_pile: Option<usize>,
    pub round_id: u32,
    pub last_outcome: Option<GuessOutcome>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.piles.clear();
        self.phase = Phase::Idle;
        self.mode = GameMode::default();
        self.lives = Lives::Finite(0);
        self.score = 0;
        self.guess_streak = 0;
        self.longest_guess_streak = 0;
        self.high_score = 0;
        self.zen_high_score = 0;
        self.remaining_cards = 0;
        self.selected_pile = None;
        self.round_id = 0;
        self.last_outcome = None;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn piles_remaining(&self) -> usize {
        self.piles.iter().filter(|p| !p.is_flipped()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            piles: ArrayVec::new(),
            phase: Phase::Idle,
            mode: GameMode::default(),
            lives: Lives::Finite(0),
            score: 0,
            guess_streak: 0,
            longest_guess_streak: 0,
            high_score: 0,
            zen_high_score: 0,
            remaining_cards: 0,
            selected_pile: None,
            round_id: 0,
            last_outcome: None,
        }
    }
}
