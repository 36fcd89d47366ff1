use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::SymbolKey;
use crate::errors::{ConfigError, Result};

/// Ordered multiset of symbol keys, each present exactly twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<SymbolKey>,
}

impl Deck {
    /// Doubles `K` distinct symbols into `2K` entries, in input order
    /// (`[a, b]` becomes `[a, a, b, b]`).
    pub fn from_symbols(symbols: &[SymbolKey]) -> Result<Self> {
        let entries = symbols
            .iter()
            .flat_map(|s| [s.clone(), s.clone()])
            .collect();
        Self::from_entries(entries)
    }

    /// Accepts an already paired list, rejecting any key that does not show
    /// up exactly twice.
    pub fn from_entries(entries: Vec<SymbolKey>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        let mut counts: BTreeMap<&SymbolKey, usize> = BTreeMap::new();
        for key in &entries {
            *counts.entry(key).or_default() += 1;
        }
        if let Some((symbol, &count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(ConfigError::UnpairedSymbol {
                symbol: (*symbol).clone(),
                count,
            });
        }
        Ok(Self { entries })
    }

    /// Uniform Fisher-Yates permutation of the entries.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    pub fn entries(&self) -> &[SymbolKey] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SymbolKey> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_pairs(&self) -> usize {
        self.entries.len() / 2
    }
}
