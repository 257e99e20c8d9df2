//! Memory-game rules, independent of timers and I/O.
//!
//! [`MemoryGame`] is the state machine behind a game session: dealing,
//! flipping, pair evaluation and win detection. Timers live in
//! [`crate::core::session`]; they identify the deal they belong to by its
//! epoch, so a callback from a previous game can be told apart and dropped.

use crate::domain::model::{Card, CardState};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    /// Two cards are face up and waiting to be concealed.
    Evaluating,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotPlaying,
    PairPending,
    AlreadyFlipped,
    AlreadyMatched,
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The flip was not allowed; nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair is now face up.
    Revealed { index: usize },
    Matched { first: usize, second: usize, won: bool },
    /// Both cards stay face up until [`MemoryGame::conceal`] is called.
    Mismatched { first: usize, second: usize },
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[derive(Debug, Clone)]
pub struct MemoryGame {
    symbols: Vec<String>,
    cards: Vec<Card>,
    flipped: Vec<usize>,
    phase: Phase,
    moves: u32,
    elapsed_seconds: u64,
    matched_pairs: usize,
    epoch: u64,
}

impl MemoryGame {
    /// Lays out two face-down cards per distinct symbol, unshuffled, in `Idle`.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into();
            if !distinct.contains(&symbol) {
                distinct.push(symbol);
            }
        }

        let mut game = Self {
            symbols: distinct,
            cards: Vec::new(),
            flipped: Vec::with_capacity(2),
            phase: Phase::Idle,
            moves: 0,
            elapsed_seconds: 0,
            matched_pairs: 0,
            epoch: 0,
        };
        game.cards = game.fresh_cards();
        game
    }

    fn fresh_cards(&self) -> Vec<Card> {
        self.symbols
            .iter()
            .chain(self.symbols.iter())
            .map(|symbol| Card::new(symbol.clone()))
            .collect()
    }

    /// Starts a new game: new shuffled cards, zeroed counters, `Playing`.
    /// Returns the epoch identifying this deal.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        let mut cards = self.fresh_cards();
        shuffle(&mut cards, rng);

        self.cards = cards;
        self.flipped.clear();
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.matched_pairs = 0;
        self.phase = Phase::Playing;
        self.epoch += 1;
        self.epoch
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        match self.phase {
            Phase::Playing => {}
            Phase::Evaluating => return FlipOutcome::Ignored(IgnoreReason::PairPending),
            Phase::Idle | Phase::Won => return FlipOutcome::Ignored(IgnoreReason::NotPlaying),
        }
        if self.flipped.len() == 2 {
            return FlipOutcome::Ignored(IgnoreReason::PairPending);
        }

        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        match card.state {
            CardState::Matched => return FlipOutcome::Ignored(IgnoreReason::AlreadyMatched),
            CardState::Flipped => return FlipOutcome::Ignored(IgnoreReason::AlreadyFlipped),
            CardState::FaceDown => card.state = CardState::Flipped,
        }
        self.flipped.push(index);

        if self.flipped.len() < 2 {
            return FlipOutcome::Revealed { index };
        }

        self.moves += 1;
        self.phase = Phase::Evaluating;
        self.evaluate()
    }

    fn evaluate(&mut self) -> FlipOutcome {
        let (first, second) = (self.flipped[0], self.flipped[1]);

        if self.cards[first].face != self.cards[second].face {
            return FlipOutcome::Mismatched { first, second };
        }

        self.cards[first].state = CardState::Matched;
        self.cards[second].state = CardState::Matched;
        self.matched_pairs += 1;
        self.flipped.clear();

        let won = self.matched_pairs == self.symbols.len();
        self.phase = if won { Phase::Won } else { Phase::Playing };
        FlipOutcome::Matched { first, second, won }
    }

    /// Turns a mismatched pair back face down.
    ///
    /// Returns `false` and leaves the game untouched unless `epoch` is the
    /// current deal and `(first, second)` is exactly the pending pair.
    pub fn conceal(&mut self, epoch: u64, first: usize, second: usize) -> bool {
        if epoch != self.epoch || self.phase != Phase::Evaluating || self.flipped != [first, second] {
            return false;
        }
        let still_flipped = [first, second]
            .iter()
            .all(|&i| self.cards.get(i).map(|c| c.state) == Some(CardState::Flipped));
        if !still_flipped {
            return false;
        }

        self.cards[first].state = CardState::FaceDown;
        self.cards[second].state = CardState::FaceDown;
        self.flipped.clear();
        self.phase = Phase::Playing;
        true
    }

    /// Advances the clock by one second. `None` means the ticker for
    /// `epoch` is stale or the game is no longer running.
    pub fn tick(&mut self, epoch: u64) -> Option<u64> {
        if epoch != self.epoch || !self.is_running() {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.elapsed_seconds)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Evaluating)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Number of distinct symbols, which is also the number of pairs needed to win.
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
