//! Headless player used by `sim`.
//!
//! The bot only learns symbols the engine shows it (cards that are face up)
//! and keeps each one with probability `memory`. A perfect memory plays the
//! optimal strategy; zero memory flips at random.

use gamemory_engine::cards::{CardId, CardState, SymbolKey};
use gamemory_engine::engine::Engine;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;

pub struct MemoryBot<R> {
    rng: R,
    memory: f64,
    seen: BTreeMap<CardId, SymbolKey>,
}

impl<R: Rng> MemoryBot<R> {
    pub fn new(rng: R, memory: f64) -> Self {
        Self {
            rng,
            memory: memory.clamp(0.0, 1.0),
            seen: BTreeMap::new(),
        }
    }

    /// Forgets everything, for a new board.
    pub fn forget(&mut self) {
        self.seen.clear();
    }

    pub fn remembered(&self) -> usize {
        self.seen.len()
    }

    /// First card of a turn: a remembered pair if there is one, otherwise a
    /// card not seen yet.
    pub fn pick_first(&mut self, engine: &Engine) -> Option<CardId> {
        self.prune(engine);
        if let Some((a, _)) = self.known_pair() {
            return Some(a);
        }
        self.pick_unseen(engine, None)
    }

    /// Second card of a turn, once the first one is face up.
    pub fn pick_second(&mut self, engine: &Engine, first: CardId) -> Option<CardId> {
        if let Some(symbol) = engine.visible_symbol(first) {
            let partner = self
                .seen
                .iter()
                .find(|(id, s)| **id != first && *s == symbol)
                .map(|(id, _)| *id);
            if partner.is_some() {
                return partner;
            }
        }
        self.pick_unseen(engine, Some(first))
    }

    /// Looks at a face-up card and maybe remembers it.
    pub fn observe(&mut self, engine: &Engine, id: CardId) {
        if let Some(symbol) = engine.visible_symbol(id)
            && !self.seen.contains_key(&id)
            && self.rng.random_bool(self.memory)
        {
            self.seen.insert(id, symbol.clone());
        }
    }

    fn known_pair(&self) -> Option<(CardId, CardId)> {
        let mut by_symbol: BTreeMap<&SymbolKey, CardId> = BTreeMap::new();
        for (id, symbol) in &self.seen {
            if let Some(other) = by_symbol.insert(symbol, *id) {
                return Some((other, *id));
            }
        }
        None
    }

    fn pick_unseen(&mut self, engine: &Engine, exclude: Option<CardId>) -> Option<CardId> {
        let hidden: Vec<CardId> = engine
            .card_views()
            .into_iter()
            .filter(|v| v.state == CardState::Hidden && Some(v.id) != exclude)
            .map(|v| v.id)
            .collect();
        let unseen: Vec<CardId> = hidden
            .iter()
            .copied()
            .filter(|id| !self.seen.contains_key(id))
            .collect();
        let pool = if unseen.is_empty() { &hidden } else { &unseen };
        pool.choose(&mut self.rng).copied()
    }

    /// Drops cards that are no longer hidden on the board.
    fn prune(&mut self, engine: &Engine) {
        self.seen
            .retain(|id, _| engine.card_state(*id) == Some(CardState::Hidden));
    }
}
