use serde::{Deserialize, Serialize};

use crate::cards::{default_symbols, SymbolKey};
use crate::errors::{ConfigError, Result};

/// Delay between the second flip of a pair and its resolution.
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 1_000;
/// How long "Match found!" / "No match!" stay on screen.
pub const DEFAULT_MESSAGE_DELAY_MS: u64 = 1_500;
/// Largest accepted row or column count.
pub const MAX_GRID_DIMENSION: usize = 64;

/// Card size and spacing used to compute [`crate::cards::Placement`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 0.4,
            card_height: 0.4,
            gap: 0.1,
        }
    }
}

/// Everything needed to deal a board. Missing fields fall back to the
/// defaults of the classic 4x4 board when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Distinct symbols, one per pair (`rows * cols / 2` of them)
    pub symbols: Vec<SymbolKey>,
    pub resolve_delay_ms: u64,
    pub message_delay_ms: u64,
    /// Disable only for deterministic tests and demos
    pub shuffle: bool,
    pub layout: LayoutConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            symbols: default_symbols(),
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            message_delay_ms: DEFAULT_MESSAGE_DELAY_MS,
            shuffle: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl GameConfig {
    /// Builds a config for an arbitrary grid using generated symbol names
    /// (`pair-00`, `pair-01`, ...).
    ///
    /// Oversized grids get no symbols; [`GameConfig::validate`] rejects them.
    pub fn with_grid(rows: usize, cols: usize) -> Self {
        let pairs = if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            0
        } else {
            rows * cols / 2
        };
        Self {
            rows,
            cols,
            symbols: (0..pairs)
                .map(|i| SymbolKey::new(format!("pair-{:02}", i)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn card_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    pub fn total_pairs(&self) -> usize {
        self.card_count() / 2
    }

    /// Checks the grid against the symbol list and the layout dimensions.
    /// Pairing of the symbols themselves is checked by [`crate::deck::Deck`].
    pub fn validate(&self) -> Result<()> {
        if self.rows > MAX_GRID_DIMENSION || self.cols > MAX_GRID_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_GRID_DIMENSION,
            });
        }
        let cells = self.card_count();
        if cells == 0 || cells % 2 != 0 {
            return Err(ConfigError::OddCardCount {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        if self.symbols.len() * 2 != cells {
            return Err(ConfigError::GridMismatch {
                rows: self.rows,
                cols: self.cols,
                cells,
                deck: self.symbols.len() * 2,
            });
        }
        let l = &self.layout;
        if !(l.card_width > 0.0 && l.card_height > 0.0) {
            return Err(ConfigError::InvalidLayout(
                "card width and height must be positive".into(),
            ));
        }
        if !(l.gap >= 0.0 && l.gap.is_finite()) {
            return Err(ConfigError::InvalidLayout(
                "gap must be a finite, non-negative number".into(),
            ));
        }
        Ok(())
    }
}
