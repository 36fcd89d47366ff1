use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, SymbolKey};
use crate::scheduler::Generation;

/// Short status line shown to the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    MatchFound,
    NoMatch,
    /// Stays up until the next game
    Victory,
}

impl Message {
    pub fn text(self) -> &'static str {
        match self {
            Message::MatchFound => "Match found!",
            Message::NoMatch => "No match!",
            Message::Victory => "Congratulations! You found all pairs!",
        }
    }

    /// Transient messages are cleared after the message delay.
    pub fn is_transient(self) -> bool {
        !matches!(self, Message::Victory)
    }

    pub fn score_line(matched_pairs: usize) -> String {
        format!("Pairs Found: {}", matched_pairs)
    }
}

/// Everything the presentation layer needs to hear about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BoardBuilt {
        generation: Generation,
        cards: Vec<Card>,
    },
    CardRevealed {
        card: CardId,
        symbol: SymbolKey,
    },
    MatchFound {
        first: CardId,
        second: CardId,
        matched_pairs: usize,
    },
    NoMatch {
        first: CardId,
        second: CardId,
    },
    GameComplete,
    MessageShown {
        message: Message,
    },
    MessageCleared,
}

/// Outbound side of the engine. Implemented by whatever draws the board.
pub trait PresentationPort {
    fn on_event(&mut self, event: &GameEvent);
}

/// Port that keeps every event it sees; handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationPort for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<F: FnMut(&GameEvent)> PresentationPort for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
