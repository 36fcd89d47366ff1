//! # gamemory-engine: Memory-Matching Game Core
//!
//! Game logic for a pair-finding card game: deck construction, shuffling,
//! the per-card flip state machine, match resolution, win detection and the
//! new-game/reset lifecycle. Rendering and input devices live elsewhere and
//! talk to the engine through [`events::PresentationPort`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card identity, symbol keys, face states and grid positions
//! - [`deck`] - Paired deck construction and Fisher-Yates shuffling
//! - [`board`] - Row-major grid placement and lookup by card id
//! - [`session`] - Flip state machine, pending pair and input lock
//! - [`resolver`] - Match/mismatch settlement of a pending pair
//! - [`engine`] - Lifecycle controller owning board, session, RNG and timer
//! - [`scheduler`] - Generation-tagged deferred tasks on an injected clock
//! - [`events`] - Outbound events and the presentation port
//! - [`config`] - Game configuration and validation
//! - [`logger`] - JSONL game records
//! - [`errors`] - Configuration errors
//!
//! ## Quick Start
//!
//! ```rust
//! use gamemory_engine::cards::CardId;
//! use gamemory_engine::config::GameConfig;
//! use gamemory_engine::engine::Engine;
//! use gamemory_engine::events::GameEvent;
//!
//! let mut engine = Engine::new(GameConfig::default(), Some(42)).unwrap();
//! engine.flip(CardId(0));
//! engine.flip(CardId(5));
//! engine.advance(1_000);
//!
//! let events = engine.take_events();
//! assert!(matches!(events[0], GameEvent::BoardBuilt { .. }));
//! assert!(!engine.is_input_locked());
//! ```
//!
//! ## Deterministic Deals
//!
//! Shuffles use a seeded ChaCha20 RNG, so the same seed deals the same board:
//!
//! ```rust
//! use gamemory_engine::config::GameConfig;
//! use gamemory_engine::engine::Engine;
//!
//! let a = Engine::new(GameConfig::default(), Some(9)).unwrap();
//! let b = Engine::new(GameConfig::default(), Some(9)).unwrap();
//! assert_eq!(a.board(), b.board());
//! ```

pub mod board;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod logger;
pub mod resolver;
pub mod scheduler;
pub mod session;
