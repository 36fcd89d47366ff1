use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{CardId, CardState};
use crate::scheduler::Generation;

/// Whether the session still accepts flips.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    /// Every pair found; flips are rejected until the next game
    Completed,
}

/// The two cards of a full pending set, captured when the pair completes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PendingPair {
    pub first: CardId,
    pub second: CardId,
}

/// Why a flip request changed nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IgnoreReason {
    /// A pair is waiting for resolution
    Locked,
    /// Identifier outside the board
    InvalidCard,
    /// Card is already revealed or matched
    NotHidden,
    /// Game is over
    Completed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FlipOutcome {
    /// First card of a pair is face up
    Revealed(CardId),
    /// Second card is face up; the pair awaits resolution and input is locked
    PairPending(PendingPair),
    Ignored(IgnoreReason),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Attempt counters for one game.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Completed pair flips, matched or not
    pub attempts: u32,
    pub mismatches: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

/// Mutable state of one game: per-card faces, the pending set, the input
/// lock and the pair counter.
///
/// Invariants:
/// - `pending.len() <= 2`
/// - `input_locked` iff two cards are pending
/// - `Matched` is terminal and `matched_pairs <= total_pairs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    generation: Generation,
    states: Vec<CardState>,
    pending: Vec<CardId>,
    matched_pairs: usize,
    total_pairs: usize,
    input_locked: bool,
    phase: Phase,
    attempts: u32,
    mismatches: u32,
}

impl Session {
    pub fn new(generation: Generation, board: &Board) -> Self {
        Self {
            generation,
            states: vec![CardState::Hidden; board.len()],
            pending: Vec::with_capacity(2),
            matched_pairs: 0,
            total_pairs: board.total_pairs(),
            input_locked: false,
            phase: Phase::Playing,
            attempts: 0,
            mismatches: 0,
        }
    }

    /// Turns a hidden card face up. Requests that cannot apply are ignored
    /// without touching any state.
    pub fn flip(&mut self, id: CardId) -> FlipOutcome {
        if self.phase == Phase::Completed {
            return FlipOutcome::Ignored(IgnoreReason::Completed);
        }
        if self.input_locked {
            return FlipOutcome::Ignored(IgnoreReason::Locked);
        }
        let Some(state) = self.states.get_mut(id.index()) else {
            return FlipOutcome::Ignored(IgnoreReason::InvalidCard);
        };
        if *state != CardState::Hidden {
            return FlipOutcome::Ignored(IgnoreReason::NotHidden);
        }

        *state = CardState::Revealed;
        self.pending.push(id);
        match self.pending[..] {
            [first, second] => {
                self.input_locked = true;
                self.attempts += 1;
                FlipOutcome::PairPending(PendingPair { first, second })
            }
            _ => FlipOutcome::Revealed(id),
        }
    }

    /// True when both cards of `pair` are still face up and pending.
    pub(crate) fn is_pending(&self, pair: &PendingPair) -> bool {
        self.pending[..] == [pair.first, pair.second]
            && self.state(pair.first) == Some(CardState::Revealed)
            && self.state(pair.second) == Some(CardState::Revealed)
    }

    /// Locks the pair in as found. Returns the new pair count.
    pub(crate) fn settle_match(&mut self, pair: &PendingPair) -> usize {
        self.set_state(pair.first, CardState::Matched);
        self.set_state(pair.second, CardState::Matched);
        self.pending.clear();
        self.matched_pairs += 1;
        debug_assert!(self.matched_pairs <= self.total_pairs);
        if self.matched_pairs == self.total_pairs {
            self.phase = Phase::Completed;
        }
        self.input_locked = false;
        self.matched_pairs
    }

    pub(crate) fn settle_mismatch(&mut self, pair: &PendingPair) {
        self.set_state(pair.first, CardState::Hidden);
        self.set_state(pair.second, CardState::Hidden);
        self.pending.clear();
        self.mismatches += 1;
        self.input_locked = false;
    }

    fn set_state(&mut self, id: CardId, next: CardState) {
        if let Some(state) = self.states.get_mut(id.index()) {
            // matched never reverts
            if *state != CardState::Matched {
                *state = next;
            }
        }
    }

    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.states.get(id.index()).copied()
    }

    pub fn states(&self) -> &[CardState] {
        &self.states
    }

    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            attempts: self.attempts,
            mismatches: self.mismatches,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SymbolKey;
    use crate::config::LayoutConfig;
    use crate::deck::Deck;

    fn session() -> Session {
        let deck = Deck::from_symbols(&[SymbolKey::from("a"), SymbolKey::from("b")]).unwrap();
        let board = Board::build(deck, 2, 2, &LayoutConfig::default()).unwrap();
        Session::new(Generation::FIRST, &board)
    }

    #[test]
    fn second_flip_locks_input() {
        let mut s = session();
        assert_eq!(s.flip(CardId(0)), FlipOutcome::Revealed(CardId(0)));
        assert!(!s.is_input_locked());
        let out = s.flip(CardId(2));
        assert_eq!(
            out,
            FlipOutcome::PairPending(PendingPair {
                first: CardId(0),
                second: CardId(2)
            })
        );
        assert!(s.is_input_locked());
        assert_eq!(s.flip(CardId(1)), FlipOutcome::Ignored(IgnoreReason::Locked));
        assert_eq!(s.state(CardId(1)), Some(CardState::Hidden));
    }

    #[test]
    fn reflipping_revealed_card_is_ignored() {
        let mut s = session();
        s.flip(CardId(3));
        let before = s.clone();
        assert_eq!(
            s.flip(CardId(3)),
            FlipOutcome::Ignored(IgnoreReason::NotHidden)
        );
        assert_eq!(s, before);
    }

    #[test]
    fn out_of_range_card_is_ignored() {
        let mut s = session();
        assert_eq!(
            s.flip(CardId(99)),
            FlipOutcome::Ignored(IgnoreReason::InvalidCard)
        );
        assert!(s.pending().is_empty());
    }

    #[test]
    fn mismatch_hides_cards_and_unlocks() {
        let mut s = session();
        s.flip(CardId(0));
        let FlipOutcome::PairPending(pair) = s.flip(CardId(2)) else {
            panic!("expected a pending pair");
        };
        s.settle_mismatch(&pair);
        assert_eq!(s.state(CardId(0)), Some(CardState::Hidden));
        assert_eq!(s.state(CardId(2)), Some(CardState::Hidden));
        assert!(!s.is_input_locked());
        assert_eq!(s.stats().mismatches, 1);
        assert_eq!(s.stats().attempts, 1);
    }

    #[test]
    fn matching_every_pair_counts_up_to_total() {
        let mut s = session();
        for (a, b) in [(0, 1), (2, 3)] {
            s.flip(CardId(a));
            let FlipOutcome::PairPending(pair) = s.flip(CardId(b)) else {
                panic!("expected a pending pair");
            };
            s.settle_match(&pair);
        }
        assert_eq!(s.matched_pairs(), 2);
        assert_eq!(s.matched_pairs(), s.total_pairs());
        assert!(s.is_complete());
        assert_eq!(s.phase(), Phase::Completed);
    }
}
