//! Game state module - the authoritative round state machine
//!
//! This module ties together the deck, piles, guess resolution and scoring.
//! Every command is applied synchronously and either fully succeeds or is
//! silently ignored: stale input (a double tap while a guess is resolving, a
//! tap on a flipped pile) must never stall the game loop.
//!
//! Persistence is kept out of the state machine. A finished round leaves a
//! [`RoundResult`] behind that the caller drains with
//! [`GameState::take_round_result`] and forwards to the statistics store.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::card::Card;
use crate::deck::Deck;
use crate::guess::is_guess_correct;
use crate::pile::Pile;
use crate::scoring::{guess_score, settle_round};
use crate::snapshot::{GameSnapshot, PileSnapshot};
use crate::types::{GameMode, GuessKind, Lives, ModeRules, Phase, RuleBook, MAX_PILES};

/// What happened on the last accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub pile: usize,
    pub guess: GuessKind,
    /// Pile top the guess was made against.
    pub previous: Card,
    pub drawn: Card,
    pub correct: bool,
    pub score_delta: i32,
    pub life_spent: bool,
    pub life_gained: bool,
    pub pile_flipped: bool,
    /// The deck was empty and got replaced before drawing (zen only).
    pub reshuffled: bool,
}

/// Outcome of a finished round, handed to the statistics store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub won: bool,
    pub piles_remaining: usize,
    pub mode: GameMode,
    /// Longest guess streak within the round.
    pub longest_guess_streak: u32,
    pub score: i32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rule_book: RuleBook,
    rules: ModeRules,
    mode: GameMode,
    seed: u64,
    rng: StdRng,
    deck: Deck,
    piles: ArrayVec<Pile, MAX_PILES>,
    phase: Phase,
    selected_pile: Option<usize>,
    lives: Lives,
    score: i32,
    guess_streak: u32,
    longest_guess_streak: u32,
    high_score: i32,
    zen_high_score: i32,
    /// Monotonic round id (increments on every new round).
    round_id: u32,
    /// Cards introduced into the round so far, including zen reshuffles.
    cards_in_play: usize,
    reshuffles: u32,
    last_outcome: Option<GuessOutcome>,
    round_result: Option<RoundResult>,
}

impl GameState {
    /// Create an idle game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let rule_book = RuleBook::default();
        let mode = GameMode::default();
        let rules = rule_book.rules(mode);

        Self {
            rules,
            rule_book,
            mode,
            seed,
            rng: StdRng::seed_from_u64(seed),
            deck: Deck::default(),
            piles: ArrayVec::new(),
            phase: Phase::Idle,
            selected_pile: None,
            lives: rules.starting_lives,
            score: 0,
            guess_streak: 0,
            longest_guess_streak: 0,
            high_score: 0,
            zen_high_score: 0,
            round_id: 0,
            cards_in_play: 0,
            reshuffles: 0,
            last_outcome: None,
            round_result: None,
        }
    }

    /// Replace the per-mode rules table.
    pub fn with_rule_book(mut self, rule_book: RuleBook) -> Self {
        self.rule_book = rule_book;
        self.rules = rule_book.rules(self.mode);
        self
    }

    /// Mode used by the first `start_new_game(None)`.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self.rules = self.rule_book.rules(mode);
        self
    }

    /// Seed the in-memory high scores, usually from persisted stats.
    pub fn with_high_scores(mut self, high_score: i32, zen_high_score: i32) -> Self {
        self.high_score = high_score;
        self.zen_high_score = zen_high_score;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> ModeRules {
        self.rules
    }

    pub fn rule_book(&self) -> &RuleBook {
        &self.rule_book
    }

    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn remaining_cards(&self) -> usize {
        self.deck.len()
    }

    pub fn selected_pile(&self) -> Option<usize> {
        self.selected_pile
    }

    pub fn lives(&self) -> Lives {
        self.lives
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn guess_streak(&self) -> u32 {
        self.guess_streak
    }

    pub fn longest_guess_streak(&self) -> u32 {
        self.longest_guess_streak
    }

    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    pub fn zen_high_score(&self) -> i32 {
        self.zen_high_score
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Piles that have not been flipped.
    pub fn piles_remaining(&self) -> usize {
        self.piles.iter().filter(|p| !p.is_flipped()).count()
    }

    /// Expected `remaining_cards() + Σ pile sizes` for the current round.
    pub fn cards_in_play(&self) -> usize {
        self.cards_in_play
    }

    pub fn last_outcome(&self) -> Option<GuessOutcome> {
        self.last_outcome
    }

    /// Take and clear the last guess outcome.
    pub fn take_last_outcome(&mut self) -> Option<GuessOutcome> {
        self.last_outcome.take()
    }

    /// Take the result of a finished round, if one is waiting to be persisted.
    pub fn take_round_result(&mut self) -> Option<RoundResult> {
        self.round_result.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;
        out.mode = self.mode;
        out.lives = self.lives;
        out.score = self.score;
        out.guess_streak = self.guess_streak;
        out.longest_guess_streak = self.longest_guess_streak;
        out.high_score = self.high_score;
        out.zen_high_score = self.zen_high_score;
        out.remaining_cards = self.deck.len();
        out.selected_pile = self.selected_pile;
        out.round_id = self.round_id;
        out.last_outcome = self.last_outcome;
        out.piles.clear();
        out.piles.extend(self.piles.iter().map(PileSnapshot::from));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new round in `mode`, or in the current mode when `None`.
    pub fn start_new_game(&mut self, mode: Option<GameMode>) -> bool {
        let mode = mode.unwrap_or(self.mode);
        let rules = self.rule_book.rules(mode);
        let deck = Deck::fresh(rules.deck_count, &mut self.rng);
        self.deal(mode, rules, deck);
        true
    }

    /// Start a new round with a caller-ordered deck (first card dealt first).
    ///
    /// Rejected when the deck cannot fill every pile, or, outside endless
    /// rounds, leaves nothing to guess on.
    pub fn start_new_game_with_deck(&mut self, mode: GameMode, cards: Vec<Card>) -> bool {
        let rules = self.rule_book.rules(mode);
        let needed = if rules.endless {
            rules.pile_count
        } else {
            rules.pile_count + 1
        };
        if cards.len() < needed {
            return false;
        }
        self.deal(mode, rules, Deck::from_cards(cards));
        true
    }

    fn deal(&mut self, mode: GameMode, rules: ModeRules, mut deck: Deck) {
        self.cards_in_play = deck.len();
        self.piles.clear();
        for _ in 0..rules.pile_count {
            if let Some(card) = deck.draw() {
                self.piles.push(Pile::new(card));
            }
        }

        self.mode = mode;
        self.rules = rules;
        self.deck = deck;
        self.lives = rules.starting_lives;
        self.score = 0;
        self.guess_streak = 0;
        self.longest_guess_streak = 0;
        self.selected_pile = None;
        self.reshuffles = 0;
        self.last_outcome = None;
        self.round_result = None;
        self.round_id = self.round_id.wrapping_add(1);
        self.phase = Phase::Playing;

        tracing::debug!(
            round = self.round_id,
            mode = mode.as_str(),
            piles = self.piles.len(),
            deck = self.deck.len(),
            "round started"
        );
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.phase == Phase::Playing
            && self.piles.get(index).is_some_and(|p| p.is_selectable())
    }

    /// Highlight a pile. Ignored unless it can be guessed on.
    pub fn select_pile(&mut self, index: usize) -> bool {
        if !self.is_selectable(index) {
            return false;
        }
        self.selected_pile = Some(index);
        true
    }

    pub fn unselect_pile(&mut self) {
        self.selected_pile = None;
    }

    /// Guess the rank of the next card against pile `index`.
    ///
    /// Returns `false` (and changes nothing) when the guess is not allowed.
    pub fn make_guess(&mut self, index: usize, guess: GuessKind) -> bool {
        if !self.is_selectable(index) {
            return false;
        }
        // A non-endless round with an empty deck is already over.
        if self.deck.is_empty() && !self.rules.endless {
            return false;
        }
        let Some(previous) = self.piles[index].top() else {
            return false;
        };

        self.phase = Phase::Resolving;
        self.selected_pile = None;

        let mut reshuffled = false;
        if self.deck.is_empty() {
            self.deck = Deck::fresh(self.rules.deck_count, &mut self.rng);
            self.cards_in_play += self.deck.len();
            self.reshuffles += 1;
            reshuffled = true;
            tracing::debug!(round = self.round_id, reshuffles = self.reshuffles, "deck reshuffled");
        }

        let Some(drawn) = self.deck.draw() else {
            self.phase = Phase::Playing;
            return false;
        };

        let correct = is_guess_correct(previous, drawn, guess);
        let mut outcome = GuessOutcome {
            pile: index,
            guess,
            previous,
            drawn,
            correct,
            score_delta: 0,
            life_spent: false,
            life_gained: false,
            pile_flipped: false,
            reshuffled,
        };

        let endless = self.rules.endless;
        let pile = &mut self.piles[index];
        pile.push(drawn);

        if correct {
            self.guess_streak += 1;
            self.longest_guess_streak = self.longest_guess_streak.max(self.guess_streak);

            if guess == GuessKind::Same && !endless {
                if let Lives::Finite(n) = self.lives {
                    self.lives = Lives::Finite(n + 1);
                    outcome.life_gained = true;
                }
            }

            let delta = guess_score(self.guess_streak);
            self.score = self.score.saturating_add(delta);
            outcome.score_delta = delta;
        } else {
            self.guess_streak = 0;
            if !endless {
                match self.lives {
                    Lives::Finite(n) if n > 0 => {
                        self.lives = Lives::Finite(n - 1);
                        outcome.life_spent = true;
                    }
                    Lives::Finite(_) => {
                        pile.flip();
                        outcome.pile_flipped = true;
                    }
                    Lives::Infinite => {}
                }
            }
        }

        self.last_outcome = Some(outcome);
        self.check_round_end();
        true
    }

    fn check_round_end(&mut self) {
        if self.rules.endless {
            self.phase = Phase::Playing;
            return;
        }

        if self.piles.iter().all(|p| p.is_flipped()) {
            self.finish_round(false);
        } else if self.deck.is_empty() {
            self.finish_round(true);
        } else {
            self.phase = Phase::Playing;
        }
    }

    fn finish_round(&mut self, won: bool) {
        let settlement = settle_round(&self.piles, won);
        self.score = self.score.saturating_add(settlement.total);
        self.high_score = self.high_score.max(self.score);
        self.phase = if won { Phase::Won } else { Phase::Lost };

        let result = RoundResult {
            won,
            piles_remaining: self.piles_remaining(),
            mode: self.mode,
            longest_guess_streak: self.longest_guess_streak,
            score: self.score,
        };
        self.round_result = Some(result);

        tracing::debug!(
            round = self.round_id,
            won,
            score = self.score,
            piles_remaining = result.piles_remaining,
            "round finished"
        );
    }

    /// Close an endless zen round. Ignored outside zen or when not playing.
    pub fn end_zen_game(&mut self) -> bool {
        if !self.mode.is_zen() || self.phase != Phase::Playing {
            return false;
        }

        self.zen_high_score = self.zen_high_score.max(self.score);
        self.round_result = Some(RoundResult {
            won: true,
            piles_remaining: self.piles_remaining(),
            mode: self.mode,
            longest_guess_streak: self.longest_guess_streak,
            score: self.score,
        });
        self.phase = Phase::Won;

        tracing::debug!(round = self.round_id, score = self.score, "zen round ended");
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::create_deck;
    use crate::types::{Rank, Suit};

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// `front` first, then the rest of a standard deck in canonical order.
    fn arranged(front: &[Card]) -> Vec<Card> {
        let mut cards = front.to_vec();
        cards.extend(create_deck().into_iter().filter(|card| !front.contains(card)));
        cards
    }

    fn total_cards(state: &GameState) -> usize {
        state.remaining_cards() + state.piles().iter().map(|p| p.len()).sum::<usize>()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.mode(), GameMode::Casual);
        assert_eq!(state.score(), 0);
        assert_eq!(state.round_id(), 0);
        assert!(state.piles().is_empty());
        assert_eq!(state.remaining_cards(), 0);
    }

    #[test]
    fn test_start_new_game_deals_piles() {
        let mut state = GameState::new(12345);
        assert!(state.start_new_game(None));

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.piles().len(), 9);
        assert!(state.piles().iter().all(|p| p.len() == 1));
        assert_eq!(state.remaining_cards(), 43);
        assert_eq!(state.lives(), Lives::Finite(1));
        assert_eq!(state.round_id(), 1);
        assert_eq!(total_cards(&state), 52);
    }

    #[test]
    fn test_start_new_game_per_mode() {
        let mut state = GameState::new(1);

        state.start_new_game(Some(GameMode::Brutal));
        assert_eq!(state.piles().len(), 4);
        assert_eq!(state.remaining_cards(), 48);
        assert_eq!(state.lives(), Lives::Finite(0));

        state.start_new_game(Some(GameMode::Zen));
        assert_eq!(state.lives(), Lives::Infinite);

        // Omitted mode keeps the previous one.
        state.start_new_game(None);
        assert_eq!(state.mode(), GameMode::Zen);
        assert_eq!(state.round_id(), 3);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        a.start_new_game(None);
        b.start_new_game(None);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.deck(), b.deck());
    }

    #[test]
    fn test_with_deck_rejects_short_deck() {
        let mut state = GameState::new(1);
        let short = create_deck().into_iter().take(3).collect();
        assert!(!state.start_new_game_with_deck(GameMode::Casual, short));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_with_deck_needs_a_card_to_draw() {
        let mut state = GameState::new(1);
        let exact = create_deck()[..9].to_vec();
        assert!(!state.start_new_game_with_deck(GameMode::Casual, exact.clone()));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.round_id(), 0);

        // Zen reshuffles, so a bare deal is still playable.
        assert!(state.start_new_game_with_deck(GameMode::Zen, exact));
        assert_eq!(state.remaining_cards(), 0);
        assert!(state.make_guess(0, GuessKind::Higher));
        assert_eq!(state.reshuffles(), 1);

        // One spare card is enough for a finite round to finish.
        let spare = create_deck()[..10].to_vec();
        assert!(state.start_new_game_with_deck(GameMode::Casual, spare));
        assert!(state.make_guess(0, GuessKind::Higher));
        assert_eq!(state.phase(), Phase::Won);
        assert!(state.take_round_result().is_some());
    }

    #[test]
    fn test_select_pile() {
        let mut state = GameState::new(1);
        // Nothing to select before a round starts.
        assert!(!state.select_pile(0));

        state.start_new_game(None);
        assert!(state.select_pile(3));
        assert_eq!(state.selected_pile(), Some(3));

        // Out of range is ignored.
        assert!(!state.select_pile(9));
        assert_eq!(state.selected_pile(), Some(3));

        state.unselect_pile();
        assert_eq!(state.selected_pile(), None);
    }

    #[test]
    fn test_guess_clears_selection() {
        let mut state = GameState::new(1);
        state.start_new_game(None);
        state.select_pile(2);
        assert!(state.make_guess(2, GuessKind::Higher));
        assert_eq!(state.selected_pile(), None);
    }

    #[test]
    fn test_streak_multiplier_scenario() {
        let front = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
            c(Rank::Six, Suit::Hearts),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Ten, Suit::Hearts),
            c(Rank::King, Suit::Spades),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Jack, Suit::Spades),
        ];
        let mut state = GameState::new(1);
        assert!(state.start_new_game_with_deck(GameMode::Casual, arranged(&front)));

        assert!(state.make_guess(0, GuessKind::Higher));
        assert_eq!(state.last_outcome().unwrap().score_delta, 10);
        assert!(state.make_guess(1, GuessKind::Higher));
        assert_eq!(state.last_outcome().unwrap().score_delta, 10);
        assert!(state.make_guess(2, GuessKind::Higher));

        let outcome = state.last_outcome().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score_delta, 30);
        assert_eq!(state.guess_streak(), 3);
        assert_eq!(state.longest_guess_streak(), 3);
        assert_eq!(state.score(), 50);
        assert_eq!(state.piles()[2].top(), Some(c(Rank::Jack, Suit::Spades)));
    }

    #[test]
    fn test_wrong_guess_spends_life_then_flips() {
        // Every king and queen is on a pile, so "higher" on a king never wins.
        let front = [
            c(Rank::King, Suit::Hearts),
            c(Rank::King, Suit::Diamonds),
            c(Rank::King, Suit::Clubs),
            c(Rank::King, Suit::Spades),
            c(Rank::Queen, Suit::Hearts),
            c(Rank::Queen, Suit::Diamonds),
            c(Rank::Queen, Suit::Clubs),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Jack, Suit::Hearts),
        ];
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Casual, arranged(&front));
        assert!(state.make_guess(0, GuessKind::Higher));
        let first = state.last_outcome().unwrap();
        assert!(!first.correct);
        assert!(first.life_spent);
        assert!(!first.pile_flipped);
        assert_eq!(state.lives(), Lives::Finite(0));
        assert!(!state.piles()[0].is_flipped());
        assert_eq!(state.piles()[0].len(), 2);
        assert_eq!(state.guess_streak(), 0);

        // Top is now the ace that was drawn; the next card (2♥) is not lower.
        assert!(state.make_guess(0, GuessKind::Lower));
        let second = state.last_outcome().unwrap();
        assert!(second.pile_flipped);
        assert!(state.piles()[0].is_flipped());
        assert!(state.piles()[0].is_disabled());
        assert_eq!(state.piles()[0].len(), 3);
    }

    #[test]
    fn test_same_guess_grants_life() {
        let front = [
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
            c(Rank::Six, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Seven, Suit::Spades),
        ];
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Casual, arranged(&front));

        assert!(state.make_guess(0, GuessKind::Same));
        let outcome = state.last_outcome().unwrap();
        assert!(outcome.correct);
        assert!(outcome.life_gained);
        assert_eq!(state.lives(), Lives::Finite(2));
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_flipped_pile_rejects_guesses() {
        let front = [
            c(Rank::King, Suit::Hearts),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
            c(Rank::Six, Suit::Hearts),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Hearts),
        ];
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Standard, arranged(&front));
        assert!(state.make_guess(0, GuessKind::Higher));
        assert!(state.piles()[0].is_flipped());

        let before = state.snapshot();
        let deck_before = state.deck().clone();
        assert!(!state.make_guess(0, GuessKind::Lower));
        assert!(!state.select_pile(0));
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.deck(), &deck_before);
    }

    #[test]
    fn test_guess_rejected_while_resolving() {
        let mut state = GameState::new(1);
        state.start_new_game(None);
        state.phase = Phase::Resolving;

        let before = state.snapshot();
        assert!(!state.make_guess(0, GuessKind::Higher));
        assert!(!state.select_pile(0));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_standard_lose_applies_settlement() {
        let front = [
            c(Rank::King, Suit::Hearts),
            c(Rank::King, Suit::Diamonds),
            c(Rank::King, Suit::Clubs),
            c(Rank::King, Suit::Spades),
            c(Rank::Queen, Suit::Hearts),
            c(Rank::Queen, Suit::Diamonds),
            c(Rank::Queen, Suit::Clubs),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Jack, Suit::Hearts),
        ];
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Standard, arranged(&front));

        for i in 0..9 {
            assert_eq!(state.phase(), Phase::Playing);
            assert!(state.make_guess(i, GuessKind::Higher));
            assert!(state.piles()[i].is_flipped());
            assert_eq!(total_cards(&state), 52);
        }

        assert_eq!(state.phase(), Phase::Lost);
        assert_eq!(state.score(), -90);
        assert_eq!(state.piles_remaining(), 0);

        let result = state.take_round_result().unwrap();
        assert!(!result.won);
        assert_eq!(result.piles_remaining, 0);
        assert_eq!(result.mode, GameMode::Standard);
        assert_eq!(result.score, -90);
        assert!(state.take_round_result().is_none());

        // Nothing is accepted once the round is over.
        assert!(!state.make_guess(0, GuessKind::Lower));
    }

    #[test]
    fn test_win_when_deck_runs_out() {
        let mut cards = create_deck()[..9].to_vec(); // A..9 of hearts as tops
        cards.push(c(Rank::King, Suit::Spades));
        let mut state = GameState::new(1).with_high_scores(150, 0);
        state.start_new_game_with_deck(GameMode::Casual, cards);
        assert_eq!(state.remaining_cards(), 1);

        assert!(state.make_guess(0, GuessKind::Higher));
        assert_eq!(state.phase(), Phase::Won);
        // 10 for the guess, 100 win bonus, 9 active piles at +10.
        assert_eq!(state.score(), 200);
        assert_eq!(state.high_score(), 200);

        let result = state.take_round_result().unwrap();
        assert!(result.won);
        assert_eq!(result.piles_remaining, 9);
        assert_eq!(result.longest_guess_streak, 1);
    }

    #[test]
    fn test_win_with_some_flipped_piles() {
        let mut cards = vec![
            c(Rank::King, Suit::Hearts),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
        ];
        cards.push(c(Rank::Five, Suit::Spades));
        cards.push(c(Rank::Six, Suit::Spades));
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Brutal, cards);

        assert!(state.make_guess(0, GuessKind::Higher)); // wrong, flips
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.make_guess(1, GuessKind::Higher)); // right, deck empty
        assert_eq!(state.phase(), Phase::Won);
        // 10 + 100 + (3 * 10 - 10)
        assert_eq!(state.score(), 130);
        assert_eq!(state.take_round_result().unwrap().piles_remaining, 3);
    }

    #[test]
    fn test_zen_wrong_guess_never_flips() {
        let mut state = GameState::new(5);
        state.start_new_game(Some(GameMode::Zen));

        for _ in 0..40 {
            assert!(state.make_guess(0, GuessKind::Same));
            assert!(!state.piles()[0].is_flipped());
            assert_eq!(state.lives(), Lives::Infinite);
            assert_eq!(state.phase(), Phase::Playing);
        }
        assert!(state.take_round_result().is_none());
    }

    #[test]
    fn test_zen_reshuffles_empty_deck() {
        let mut cards = create_deck()[..9].to_vec();
        cards.push(c(Rank::King, Suit::Spades));
        let mut state = GameState::new(3);
        state.start_new_game_with_deck(GameMode::Zen, cards);

        assert!(state.make_guess(0, GuessKind::Higher));
        assert_eq!(state.remaining_cards(), 0);
        assert_eq!(state.phase(), Phase::Playing);

        assert!(state.make_guess(1, GuessKind::Lower));
        let outcome = state.last_outcome().unwrap();
        assert!(outcome.reshuffled);
        assert_eq!(state.reshuffles(), 1);
        assert_eq!(state.remaining_cards(), 51);
        assert_eq!(total_cards(&state), state.cards_in_play());
        assert_eq!(state.cards_in_play(), 10 + 52);
    }

    #[test]
    fn test_zen_same_guess_grants_no_life() {
        let front = [
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
            c(Rank::Six, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Seven, Suit::Spades),
        ];
        let mut state = GameState::new(1);
        state.start_new_game_with_deck(GameMode::Zen, arranged(&front));
        assert!(state.make_guess(0, GuessKind::Same));
        assert!(!state.last_outcome().unwrap().life_gained);
        assert_eq!(state.lives(), Lives::Infinite);
    }

    #[test]
    fn test_end_zen_game() {
        let mut state = GameState::new(8).with_high_scores(500, 20);

        state.start_new_game(Some(GameMode::Casual));
        assert!(!state.end_zen_game());
        assert_eq!(state.phase(), Phase::Playing);

        state.start_new_game(Some(GameMode::Zen));
        for i in 0..9 {
            state.make_guess(i, GuessKind::Higher);
        }
        let score = state.score();
        assert!(state.end_zen_game());
        assert_eq!(state.phase(), Phase::Won);
        assert_eq!(state.zen_high_score(), score.max(20));
        assert_eq!(state.high_score(), 500);

        let result = state.take_round_result().unwrap();
        assert_eq!(result.mode, GameMode::Zen);
        assert_eq!(result.score, score);

        // Second call is a no-op.
        assert!(!state.end_zen_game());
        assert!(!state.make_guess(0, GuessKind::Higher));
    }

    #[test]
    fn test_round_invariant_over_random_play() {
        let guesses = [GuessKind::Higher, GuessKind::Lower, GuessKind::Same];
        for seed in 0..20u64 {
            for mode in [GameMode::Casual, GameMode::Standard, GameMode::Brutal] {
                let mut state = GameState::new(seed);
                state.start_new_game(Some(mode));
                let mut turn = 0usize;

                while state.phase() == Phase::Playing {
                    let pile = (0..state.piles().len())
                        .map(|i| (i + turn) % state.piles().len())
                        .find(|&i| state.piles()[i].is_selectable())
                        .unwrap();
                    // Play sensibly often enough to reach the end of the deck.
                    let top = state.piles()[pile].top().unwrap().numeric_rank();
                    let guess = if turn % 5 == 4 {
                        guesses[turn % 3]
                    } else if top <= 7 {
                        GuessKind::Higher
                    } else {
                        GuessKind::Lower
                    };
                    assert!(state.make_guess(pile, guess));
                    assert_eq!(total_cards(&state), 52);
                    turn += 1;
                }

                assert!(state.phase().is_over());
                let result = state.take_round_result().unwrap();
                assert_eq!(result.won, state.phase() == Phase::Won);
                assert!(state.score() <= state.high_score());
            }
        }
    }

    #[test]
    fn test_new_round_clears_previous_state() {
        let mut state = GameState::new(4);
        state.start_new_game(Some(GameMode::Standard));
        state.make_guess(0, GuessKind::Higher);
        state.select_pile(1);

        state.start_new_game(None);
        assert_eq!(state.score(), 0);
        assert_eq!(state.guess_streak(), 0);
        assert_eq!(state.longest_guess_streak(), 0);
        assert_eq!(state.selected_pile(), None);
        assert!(state.last_outcome().is_none());
        assert!(state.piles().iter().all(|p| !p.is_flipped()));
    }

    #[test]
    fn test_custom_rule_book() {
        let book = RuleBook::default().with_override(
            GameMode::Brutal,
            ModeRules {
                starting_lives: Lives::Finite(0),
                pile_count: 9,
                deck_count: 2,
                endless: false,
            },
        );
        let mut state = GameState::new(1).with_rule_book(book);
        state.start_new_game(Some(GameMode::Brutal));
        assert_eq!(state.piles().len(), 9);
        assert_eq!(total_cards(&state), 104);
        assert_eq!(state.cards_in_play(), 104);
    }
}
