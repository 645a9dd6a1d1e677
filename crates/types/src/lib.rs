//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no game logic attached, so they can be
//! shared by the engine, the statistics store and the terminal front end.
//!
//! # Cards
//!
//! A standard 52-card deck: four [`Suit`]s times thirteen [`Rank`]s.
//! Aces are strictly low (numeric rank 1), Kings are 13.
//!
//! # Game Modes
//!
//! | Mode | Lives | Piles | Decks | Endless |
//! |------|-------|-------|-------|---------|
//! | `casual` | 1 | 9 | 1 | no |
//! | `standard` | 0 | 9 | 1 | no |
//! | `brutal` | 0 | 4 | 1 | no |
//! | `zen` | infinite | 9 | 1 | yes |
//!
//! The table is only the default; see [`RuleBook`] for per-mode overrides.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_GUESS` | 10 | Flat reward for a correct guess |
//! | `STREAK_MULTIPLIER_THRESHOLD` | 3 | Streak length at which the multiplier kicks in |
//! | `WIN_BONUS` | 100 | Added once when the deck runs out |
//! | `PILE_SETTLEMENT_POINTS` | 10 | Per-pile bonus (active) or penalty (flipped) at round end |
//!
//! # Examples
//!
//! ```
//! use beat_the_box_types::{GameMode, GuessKind, Lives, Rank, Suit, Color};
//!
//! assert_eq!(Rank::Ace.value(), 1);
//! assert_eq!(Rank::King.value(), 13);
//! assert_eq!(Suit::Hearts.color(), Color::Red);
//!
//! let guess = GuessKind::from_str("higher").unwrap();
//! assert_eq!(guess, GuessKind::Higher);
//!
//! let zen = GameMode::Zen.rules();
//! assert_eq!(zen.starting_lives, Lives::Infinite);
//! assert!(zen.endless);
//! ```

use serde::{Deserialize, Serialize};

/// Cards in one standard deck.
pub const CARDS_PER_DECK: usize = 52;

/// Upper bound on piles for any mode.
pub const MAX_PILES: usize = 9;

/// Flat score for a correct guess below the streak threshold.
pub const POINTS_PER_GUESS: i32 = 10;

/// Streak length from which a correct guess scores `streak * POINTS_PER_GUESS`.
pub const STREAK_MULTIPLIER_THRESHOLD: u32 = 3;

/// Bonus for emptying the deck.
pub const WIN_BONUS: i32 = 100;

/// End-of-round adjustment per pile: `+` for active piles, `-` for flipped ones.
pub const PILE_SETTLEMENT_POINTS: i32 = 10;

/// Card suits, in canonical deck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Hearts and diamonds are red, clubs and spades black.
    pub fn color(&self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    /// Single glyph used by the terminal view.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card color, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

/// Card ranks, Ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric rank in `1..=13` (A=1, J=11, Q=12, K=13).
    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }

    /// Inverse of [`Rank::value`].
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1..=13 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }

    /// Face label as printed on the card.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Parse a face label (case-insensitive).
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(s))
    }
}

/// The three guesses a player can make about the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuessKind {
    Higher,
    Lower,
    Same,
}

impl GuessKind {
    /// Parse guess from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "higher" | "h" => Some(GuessKind::Higher),
            "lower" | "l" => Some(GuessKind::Lower),
            "same" | "s" => Some(GuessKind::Same),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuessKind::Higher => "higher",
            GuessKind::Lower => "lower",
            GuessKind::Same => "same",
        }
    }
}

/// Remaining lives. Zen rounds never run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lives {
    Finite(u32),
    Infinite,
}

impl Lives {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Lives::Infinite)
    }

    /// Finite count, or `None` for the infinite sentinel.
    pub fn count(&self) -> Option<u32> {
        match self {
            Lives::Finite(n) => Some(*n),
            Lives::Infinite => None,
        }
    }
}

/// Round lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No round has been started yet.
    Idle,
    Playing,
    /// A guess is being applied; further guesses are rejected.
    Resolving,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Resolving => "resolving",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }
}

/// Parameters that shape a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRules {
    pub starting_lives: Lives,
    pub pile_count: usize,
    pub deck_count: usize,
    /// Endless rounds reshuffle on an empty deck and never end on their own.
    pub endless: bool,
}

impl ModeRules {
    /// Clamp to the ranges the engine supports.
    pub fn normalized(self) -> Self {
        Self {
            pile_count: self.pile_count.clamp(1, MAX_PILES),
            deck_count: self.deck_count.max(1),
            ..self
        }
    }

    /// Total cards dealt into play for one round (before any reshuffle).
    pub fn total_cards(&self) -> usize {
        CARDS_PER_DECK * self.deck_count
    }
}

/// Game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Casual,
    Standard,
    Brutal,
    Zen,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Casual,
        GameMode::Standard,
        GameMode::Brutal,
        GameMode::Zen,
    ];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Some(GameMode::Casual),
            "standard" => Some(GameMode::Standard),
            "brutal" => Some(GameMode::Brutal),
            "zen" => Some(GameMode::Zen),
            _ => None,
        }
    }

    /// Key used for this mode in persisted statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Casual => "casual",
            GameMode::Standard => "standard",
            GameMode::Brutal => "brutal",
            GameMode::Zen => "zen",
        }
    }

    pub fn is_zen(&self) -> bool {
        matches!(self, GameMode::Zen)
    }

    /// Default rules for this mode.
    pub fn rules(&self) -> ModeRules {
        match self {
            GameMode::Casual => ModeRules {
                starting_lives: Lives::Finite(1),
                pile_count: 9,
                deck_count: 1,
                endless: false,
            },
            GameMode::Standard => ModeRules {
                starting_lives: Lives::Finite(0),
                pile_count: 9,
                deck_count: 1,
                endless: false,
            },
            GameMode::Brutal => ModeRules {
                starting_lives: Lives::Finite(0),
                pile_count: 4,
                deck_count: 1,
                endless: false,
            },
            GameMode::Zen => ModeRules {
                starting_lives: Lives::Infinite,
                pile_count: 9,
                deck_count: 1,
                endless: true,
            },
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Casual
    }
}

/// Per-mode rules table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleBook {
    rules: [ModeRules; 4],
}

impl RuleBook {
    pub fn rules(&self, mode: GameMode) -> ModeRules {
        self.rules[Self::slot(mode)]
    }

    /// Replace the rules for one mode. Values are clamped to supported ranges.
    ///
    /// `endless` always follows the mode: true for zen, false otherwise.
    pub fn with_override(mut self, mode: GameMode, rules: ModeRules) -> Self {
        self.rules[Self::slot(mode)] = ModeRules {
            endless: mode.is_zen(),
            ..rules.normalized()
        };
        self
    }

    fn slot(mode: GameMode) -> usize {
        match mode {
            GameMode::Casual => 0,
            GameMode::Standard => 1,
            GameMode::Brutal => 2,
            GameMode::Zen => 3,
        }
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            rules: GameMode::ALL.map(|m| m.rules()),
        }
    }
}
