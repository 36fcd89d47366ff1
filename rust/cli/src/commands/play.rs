//! # Play Command
//!
//! Interactive memory game in the terminal.
//!
//! The board is printed after every move. Hidden cards show their id; the
//! player picks one by id or by `row,col`. When two cards are face up the
//! command waits out the resolve delay (skipped with `--fast`) and then lets
//! the engine settle the pair.
//!
//! ## Input
//!
//! - `5` or `1,1`: flip a card
//! - `r` / `reset`: deal a new board with the same settings
//! - `q` / `quit`: leave the game

use crate::commands::resolve_config;
use crate::error::CliError;
use crate::formatters::{format_board, symbol_label};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_play_input};
use gamemory_engine::engine::Engine;
use gamemory_engine::events::{GameEvent, Message, PresentationPort};
use gamemory_engine::session::FlipOutcome;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Collects the lines a terminal player should see for each engine event.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    lines: Vec<String>,
}

impl TerminalPresenter {
    pub fn flush_to(&mut self, out: &mut dyn Write) -> std::io::Result<()> {
        for line in self.lines.drain(..) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

impl PresentationPort for TerminalPresenter {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BoardBuilt { generation, cards } => self.lines.push(format!(
                "New board ({}): {} cards, {} pairs",
                generation,
                cards.len(),
                cards.len() / 2
            )),
            GameEvent::CardRevealed { card, symbol } => {
                self.lines
                    .push(format!("Card {}: {}", card, symbol_label(symbol)));
            }
            GameEvent::MessageShown { message } => self.lines.push(message.text().to_string()),
            GameEvent::MatchFound { .. }
            | GameEvent::NoMatch { .. }
            | GameEvent::GameComplete
            | GameEvent::MessageCleared => {}
        }
    }
}

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - RNG seed for the deal (default: config, then random)
/// * `rows`, `cols` - Grid override
/// * `fast` - Skip the real-time pause before a pair is resolved
/// * `out` - Output stream for the board and messages
/// * `err` - Error stream for rejected input
/// * `stdin` - Input stream for player moves
#[allow(clippy::too_many_arguments)]
pub fn handle_play_command(
    seed: Option<u64>,
    rows: Option<usize>,
    cols: Option<usize>,
    fast: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = resolve_config(seed, rows, cols, err)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::new(cfg.game_config(), Some(seed))?;

    writeln!(out, "play: seed={} grid={}x{}", seed, cfg.rows, cfg.cols)?;
    let mut presenter = TerminalPresenter::default();

    loop {
        render(&mut engine, &mut presenter, out)?;
        if engine.is_complete() {
            let stats = engine.stats();
            writeln!(
                out,
                "All {} pairs found in {} attempts ({} mismatches).",
                stats.total_pairs, stats.attempts, stats.mismatches
            )?;
            write!(out, "New game (r) or quit (q): ")?;
        } else {
            write!(out, "Flip (id or row,col; r=new game, q=quit): ")?;
        }
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        let rows = engine.board().rows();
        let cols = engine.board().cols();
        match parse_play_input(&line, rows, cols) {
            ParseResult::Flip(id) => match engine.flip(id) {
                FlipOutcome::Revealed(_) => {}
                FlipOutcome::PairPending(_) => {
                    render(&mut engine, &mut presenter, out)?;
                    let delay = engine.config().resolve_delay_ms;
                    if !fast {
                        std::thread::sleep(Duration::from_millis(delay));
                    }
                    engine.advance(delay);
                }
                FlipOutcome::Ignored(reason) => {
                    ui::display_warning(err, &ui::describe_ignored(id, reason))?;
                }
            },
            ParseResult::Reset => engine.reset()?,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }

    let stats = engine.stats();
    writeln!(
        out,
        "Session ended: {}/{} pairs, {} attempts.",
        stats.matched_pairs, stats.total_pairs, stats.attempts
    )?;
    Ok(())
}

/// Prints pending event lines, the board and the score line.
fn render(
    engine: &mut Engine,
    presenter: &mut TerminalPresenter,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    engine.dispatch_to(presenter);
    presenter.flush_to(out)?;
    writeln!(out, "{}", format_board(&engine.card_views(), engine.board().cols()))?;
    writeln!(out, "{}", Message::score_line(engine.matched_pairs()))?;
    Ok(())
}
