use thiserror::Error;

use crate::cards::SymbolKey;

/// Fatal problems detected while building a game. Raised by
/// [`crate::engine::Engine::new`], `new_game` and `reset`; a failed call leaves
/// any running game untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Deck needs at least one symbol")]
    EmptyDeck,
    #[error("Grid {rows}x{cols} has an odd or zero card count")]
    OddCardCount { rows: usize, cols: usize },
    #[error("Grid {rows}x{cols} exceeds the {max}x{max} limit")]
    GridTooLarge { rows: usize, cols: usize, max: usize },
    #[error("Symbol {symbol} appears {count} times, expected exactly 2")]
    UnpairedSymbol { symbol: SymbolKey, count: usize },
    #[error("Grid {rows}x{cols} holds {cells} cards but the deck has {deck}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        cells: usize,
        deck: usize,
    },
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
