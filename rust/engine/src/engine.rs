use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::cards::{CardId, CardState, GridPos, Placement, SymbolKey};
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::errors::Result;
use crate::events::{GameEvent, Message, PresentationPort};
use crate::resolver::{self, Resolution};
use crate::scheduler::{Generation, Millis, ScheduledTask, Scheduler, TaskKind, VirtualScheduler};
use crate::session::{FlipOutcome, PendingPair, Phase, Session, SessionStats};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// What the renderer may know about a card right now. The symbol is only
/// present while the card is face up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub state: CardState,
    pub symbol: Option<SymbolKey>,
    pub position: GridPos,
    pub placement: Placement,
}

/// Owns one game at a time and rebuilds it on demand.
///
/// The engine holds the board, the session, an injected random source and an
/// injected [`Scheduler`]. Presentation is driven through queued
/// [`GameEvent`]s, drained with [`Engine::take_events`] or
/// [`Engine::dispatch_to`].
///
/// # Examples
///
/// ```
/// use gamemory_engine::cards::{CardId, CardState, SymbolKey};
/// use gamemory_engine::config::GameConfig;
/// use gamemory_engine::engine::Engine;
///
/// let config = GameConfig {
///     rows: 1,
///     cols: 4,
///     symbols: vec![SymbolKey::from("A"), SymbolKey::from("B")],
///     shuffle: false,
///     ..GameConfig::default()
/// };
/// let mut engine = Engine::new(config, Some(7)).unwrap();
///
/// engine.flip(CardId(0));
/// engine.flip(CardId(1));
/// assert!(engine.is_input_locked());
///
/// engine.advance(1_000);
/// assert_eq!(engine.card_state(CardId(0)), Some(CardState::Matched));
/// assert_eq!(engine.matched_pairs(), 1);
/// ```
#[derive(Debug)]
pub struct Engine<R = ChaCha20Rng, S = VirtualScheduler> {
    config: GameConfig,
    rng: R,
    scheduler: S,
    board: Board,
    session: Session,
    /// Current status line and the id its clear task refers to
    message: Option<(u64, Message)>,
    next_message_id: u64,
    started_at: Millis,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Seeded engine on a virtual clock. Deals generation 1 right away.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Self::with_parts(
            config,
            ChaCha20Rng::seed_from_u64(seed),
            VirtualScheduler::new(),
        )
    }
}

impl<R: RngCore, S: Scheduler> Engine<R, S> {
    pub fn with_parts(config: GameConfig, mut rng: R, scheduler: S) -> Result<Self> {
        let deck = prepare_deck(&config)?;
        let board = lay_out(&config, deck, &mut rng)?;
        let session = Session::new(Generation::FIRST, &board);
        let started_at = scheduler.now();
        let mut engine = Self {
            config,
            rng,
            scheduler,
            board,
            session,
            message: None,
            next_message_id: 0,
            started_at,
            events: Vec::new(),
        };
        engine.announce_board();
        Ok(engine)
    }

    /// Replaces the running game with a fresh deal of `config`.
    ///
    /// The new board is dealt first; if that fails nothing changes. Otherwise
    /// the previous generation's queued tasks are cancelled, the generation
    /// is bumped and the session starts from scratch.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        let deck = prepare_deck(&config)?;
        let board = lay_out(&config, deck, &mut self.rng)?;

        let old = self.session.generation();
        let cancelled = self.scheduler.cancel(old);
        if cancelled > 0 {
            debug!(generation = %old, cancelled, "dropped queued tasks of previous board");
        }

        self.session = Session::new(old.next(), &board);
        self.board = board;
        self.config = config;
        self.started_at = self.scheduler.now();
        if self.message.take().is_some() {
            self.events.push(GameEvent::MessageCleared);
        }
        self.announce_board();
        Ok(())
    }

    /// Deals again with the current configuration.
    pub fn reset(&mut self) -> Result<()> {
        self.new_game(self.config.clone())
    }

    /// Player input. Anything that cannot apply is ignored and reported as
    /// [`FlipOutcome::Ignored`].
    pub fn flip(&mut self, id: CardId) -> FlipOutcome {
        let outcome = self.session.flip(id);
        match outcome {
            FlipOutcome::Revealed(card) => self.push_revealed(card),
            FlipOutcome::PairPending(pair) => {
                self.push_revealed(pair.second);
                self.scheduler.schedule(
                    self.config.resolve_delay_ms,
                    ScheduledTask {
                        generation: self.session.generation(),
                        kind: TaskKind::Resolve(pair),
                    },
                );
                debug!(first = %pair.first, second = %pair.second, "pair pending");
            }
            FlipOutcome::Ignored(reason) => {
                debug!(card = %id, ?reason, "flip ignored");
            }
        }
        outcome
    }

    /// Moves the scheduler clock forward by `elapsed`, running every task
    /// that falls due on the way. Returns how many tasks ran.
    pub fn advance(&mut self, elapsed: Millis) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
            ran += 1;
        }
        self.scheduler.settle(until);
        ran
    }

    /// Executes a task delivered by the host. Tasks of an older generation
    /// are dropped. Returns whether anything changed.
    pub fn run_task(&mut self, task: ScheduledTask) -> bool {
        let current = self.session.generation();
        if task.generation != current {
            debug!(task = %task.generation, current = %current, "stale task dropped");
            return false;
        }
        match task.kind {
            TaskKind::Resolve(pair) => self.apply_resolution(pair, task.generation),
            TaskKind::ClearMessage { message_id } => match self.message {
                Some((id, _)) if id == message_id => {
                    self.message = None;
                    self.events.push(GameEvent::MessageCleared);
                    true
                }
                _ => false,
            },
        }
    }

    fn apply_resolution(&mut self, pair: PendingPair, generation: Generation) -> bool {
        match resolver::resolve(&mut self.session, &self.board, pair, generation) {
            Resolution::Matched {
                pair,
                matched_pairs,
                completed,
            } => {
                debug!(first = %pair.first, second = %pair.second, matched_pairs, "match found");
                self.events.push(GameEvent::MatchFound {
                    first: pair.first,
                    second: pair.second,
                    matched_pairs,
                });
                if completed {
                    let stats = self.session.stats();
                    info!(
                        generation = %generation,
                        attempts = stats.attempts,
                        mismatches = stats.mismatches,
                        "all pairs found"
                    );
                    self.events.push(GameEvent::GameComplete);
                    self.show_message(Message::Victory);
                } else {
                    self.show_message(Message::MatchFound);
                }
                true
            }
            Resolution::Mismatched { pair } => {
                debug!(first = %pair.first, second = %pair.second, "no match");
                self.events.push(GameEvent::NoMatch {
                    first: pair.first,
                    second: pair.second,
                });
                self.show_message(Message::NoMatch);
                true
            }
            Resolution::Stale => {
                debug!(first = %pair.first, second = %pair.second, "pair no longer pending");
                false
            }
        }
    }

    fn show_message(&mut self, message: Message) {
        self.next_message_id += 1;
        let id = self.next_message_id;
        self.message = Some((id, message));
        self.events.push(GameEvent::MessageShown { message });
        if message.is_transient() {
            self.scheduler.schedule(
                self.config.message_delay_ms,
                ScheduledTask {
                    generation: self.session.generation(),
                    kind: TaskKind::ClearMessage { message_id: id },
                },
            );
        }
    }

    fn push_revealed(&mut self, card: CardId) {
        if let Some(symbol) = self.board.symbol(card) {
            self.events.push(GameEvent::CardRevealed {
                card,
                symbol: symbol.clone(),
            });
        }
    }

    fn announce_board(&mut self) {
        info!(
            generation = %self.session.generation(),
            rows = self.board.rows(),
            cols = self.board.cols(),
            pairs = self.board.total_pairs(),
            "board dealt"
        );
        self.events.push(GameEvent::BoardBuilt {
            generation: self.session.generation(),
            cards: self.board.cards().to_vec(),
        });
    }

    /// Drains queued events in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drains queued events into `port`.
    pub fn dispatch_to(&mut self, port: &mut dyn PresentationPort) {
        for event in self.take_events() {
            port.on_event(&event);
        }
    }

    pub fn card_state(&self, id: CardId) -> Option<CardState> {
        self.session.state(id)
    }

    /// Symbol of a face-up card; `None` while hidden or out of range.
    pub fn visible_symbol(&self, id: CardId) -> Option<&SymbolKey> {
        match self.session.state(id)? {
            CardState::Hidden => None,
            _ => self.board.symbol(id),
        }
    }

    pub fn card_view(&self, id: CardId) -> Option<CardView> {
        let card = self.board.get(id)?;
        let state = self.session.state(id)?;
        Some(CardView {
            id,
            state,
            symbol: state.is_face_up().then(|| card.symbol.clone()),
            position: card.position,
            placement: card.placement,
        })
    }

    pub fn card_views(&self) -> Vec<CardView> {
        (0..self.board.len())
            .filter_map(|i| self.card_view(CardId(i)))
            .collect()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn generation(&self) -> Generation {
        self.session.generation()
    }

    pub fn pending(&self) -> &[CardId] {
        self.session.pending()
    }

    pub fn matched_pairs(&self) -> usize {
        self.session.matched_pairs()
    }

    pub fn total_pairs(&self) -> usize {
        self.session.total_pairs()
    }

    pub fn is_input_locked(&self) -> bool {
        self.session.is_input_locked()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    pub fn message(&self) -> Option<Message> {
        self.message.map(|(_, m)| m)
    }

    pub fn stats(&self) -> SessionStats {
        self.session.stats()
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Virtual time since the current board was dealt.
    pub fn elapsed(&self) -> Millis {
        self.scheduler.now().saturating_sub(self.started_at)
    }
}

fn prepare_deck(config: &GameConfig) -> Result<Deck> {
    config.validate()?;
    Deck::from_symbols(&config.symbols)
}

fn lay_out<R: RngCore + ?Sized>(config: &GameConfig, mut deck: Deck, rng: &mut R) -> Result<Board> {
    if config.shuffle {
        deck.shuffle(rng);
    }
    Board::build(deck, config.rows, config.cols, &config.layout)
}
