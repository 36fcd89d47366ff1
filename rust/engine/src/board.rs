use crate::cards::{Card, CardId, GridPos, Placement, SymbolKey};
use crate::config::LayoutConfig;
use crate::deck::Deck;
use crate::errors::{ConfigError, Result};

/// Cards of one generation laid out row-major on a `rows x cols` grid.
/// Immutable once built; lookups by [`CardId`] are plain indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cards: Vec<Card>,
}

impl Board {
    pub fn build(deck: Deck, rows: usize, cols: usize, layout: &LayoutConfig) -> Result<Self> {
        let cells = rows.saturating_mul(cols);
        if cells == 0 || cells % 2 != 0 {
            return Err(ConfigError::OddCardCount { rows, cols });
        }
        if cells != deck.len() {
            return Err(ConfigError::GridMismatch {
                rows,
                cols,
                cells,
                deck: deck.len(),
            });
        }

        let w = layout.card_width;
        let h = layout.card_height;
        let gap = layout.gap;
        let board_width = cols as f32 * w + (cols as f32 - 1.0) * gap;
        let board_height = rows as f32 * h + (rows as f32 - 1.0) * gap;
        let start_x = -board_width / 2.0 + w / 2.0;
        let start_y = board_height / 2.0 - h / 2.0;

        let cards = deck
            .into_entries()
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| {
                let position = GridPos {
                    row: i / cols,
                    col: i % cols,
                };
                Card {
                    id: CardId(i),
                    symbol,
                    position,
                    placement: Placement {
                        x: start_x + position.col as f32 * (w + gap),
                        y: start_y - position.row as f32 * (h + gap),
                    },
                }
            })
            .collect();

        Ok(Self { rows, cols, cards })
    }

    /// `None` for identifiers outside `0..len()`; callers treat that as a no-op.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn symbol(&self, id: CardId) -> Option<&SymbolKey> {
        self.get(id).map(|c| &c.symbol)
    }

    pub fn card_at(&self, pos: GridPos) -> Option<&Card> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.cards.get(pos.row * self.cols + pos.col)
    }

    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}
