use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the picture printed on a card face.
/// Two cards carrying the same key form a pair.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolKey(String);

impl SymbolKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SymbolKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Index of a card on the board, `0..N`. Stable for one board generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CardId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Face state of a single card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// Face down, can be flipped
    #[default]
    Hidden,
    /// Face up and waiting for resolution
    Revealed,
    /// Part of a found pair; terminal
    Matched,
}

impl CardState {
    /// Whether the symbol may be shown to the player.
    pub fn is_face_up(self) -> bool {
        !matches!(self, CardState::Hidden)
    }
}

/// Logical grid cell of a card, row-major from the top-left corner.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

/// Centered layout coordinates for the renderer, in scene units.
/// The y axis grows upward, so row 0 has the largest `y`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}

/// A card on the board. Everything here is fixed for the lifetime of a
/// board generation; the mutable face state lives in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: SymbolKey,
    pub position: GridPos,
    pub placement: Placement,
}

/// The images shipped with the original board: eight pairs on a 4x4 grid.
pub fn default_symbols() -> Vec<SymbolKey> {
    [
        "assets/captain.jpeg",
        "assets/hulk.jpeg",
        "assets/panter.jpeg",
        "assets/spider.jpeg",
        "assets/tanos.jpeg",
        "assets/wolve.jpeg",
        "img/07.png",
        "img/08.png",
    ]
    .into_iter()
    .map(SymbolKey::from)
    .collect()
}
