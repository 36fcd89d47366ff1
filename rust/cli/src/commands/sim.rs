//! Simulation command: headless games played by [`MemoryBot`].
//!
//! Each game is dealt from `seed + index`, so any single game can be
//! reproduced with `deal --seed`. Games run on the engine's virtual clock and
//! finish instantly regardless of the configured delays.
//!
//! # Environment Variables
//!
//! - `GAMEMORY_SIM_BREAK_AFTER`: stop after N games and exit as interrupted

use crate::bot::MemoryBot;
use crate::commands::resolve_config;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use gamemory_engine::config::GameConfig;
use gamemory_engine::engine::Engine;
use gamemory_engine::logger::{FlipRecord, GameLogger, GameRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Turn limit per game; only reachable with very low memory on large boards.
const MAX_TURNS: u32 = 100_000;

/// Handle the sim command.
///
/// # Arguments
///
/// * `games` - Number of games to play (must be >= 1)
/// * `seed` - Base seed; game `i` is dealt from `seed + i`
/// * `output` - Optional JSONL file receiving one `GameRecord` per game
/// * `memory` - Probability the bot remembers a card it has seen
/// * `rows`, `cols` - Grid override
#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    games: u32,
    seed: Option<u64>,
    output: Option<String>,
    memory: f64,
    rows: Option<usize>,
    cols: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let cfg = resolve_config(seed, rows, cols, err)?;
    let game_cfg = cfg.game_config();

    let base_seed = cfg.seed.unwrap_or_else(rand::random);
    let break_after = std::env::var("GAMEMORY_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok());

    let mut logger = match output.as_deref() {
        Some(p) => open_logger(Path::new(p), err)?,
        None => GameLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };

    let mut bot = MemoryBot::new(ChaCha20Rng::seed_from_u64(base_seed ^ 0x5EED), memory);
    let mut summary = Summary::default();

    for i in 0..games {
        if break_after == Some(i) {
            writeln!(out, "Simulated: {} games", i)?;
            return Err(CliError::Interrupted(format!(
                "stopped after {} of {} games",
                i, games
            )));
        }

        let game_seed = base_seed.wrapping_add(i as u64);
        let mut record = play_one(&game_cfg, game_seed, &mut bot)?;
        record.game_id = logger.next_id();
        debug!(
            game_id = %record.game_id,
            attempts = record.attempts,
            completed = record.completed,
            "game simulated"
        );
        summary.add(&record);
        if let Err(e) = logger.write(&record) {
            ui::write_error(err, &format!("Failed to write game record: {}", e))?;
            return Err(CliError::Io(e));
        }
    }

    info!(games, seed = base_seed, memory, "simulation finished");
    writeln!(out, "Simulated: {} games", games)?;
    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Completed: {}/{}", summary.completed, games)?;
    writeln!(
        out,
        "Average attempts: {:.2} (mismatches {:.2})",
        summary.mean(summary.attempts, games),
        summary.mean(summary.mismatches, games)
    )?;
    if let Some(p) = output {
        writeln!(out, "Output: {}", p)?;
    }
    Ok(())
}

fn open_logger(path: &Path, err: &mut dyn Write) -> Result<GameLogger, CliError> {
    if let Err(e) = ensure_parent_dir(path) {
        ui::write_error(err, &e)?;
        return Err(CliError::Io(std::io::Error::other(e)));
    }
    match GameLogger::create(path) {
        Ok(logger) => Ok(logger),
        Err(e) => {
            ui::write_error(err, &format!("Failed to open output file: {}", e))?;
            Err(CliError::Io(e))
        }
    }
}

/// Plays one game to completion (or the turn limit) and summarizes it.
fn play_one(
    game_cfg: &GameConfig,
    seed: u64,
    bot: &mut MemoryBot<ChaCha20Rng>,
) -> Result<GameRecord, CliError> {
    let mut engine = Engine::new(game_cfg.clone(), Some(seed))?;
    let delay = game_cfg.resolve_delay_ms;
    let mut flips = Vec::new();
    bot.forget();

    let mut turns = 0;
    while !engine.is_complete() && turns < MAX_TURNS {
        turns += 1;
        let Some(first) = bot.pick_first(&engine) else {
            break;
        };
        flips.push(FlipRecord {
            card: first,
            at_ms: engine.elapsed(),
        });
        engine.flip(first);
        bot.observe(&engine, first);

        let Some(second) = bot.pick_second(&engine, first) else {
            break;
        };
        flips.push(FlipRecord {
            card: second,
            at_ms: engine.elapsed(),
        });
        engine.flip(second);
        bot.observe(&engine, second);

        engine.advance(delay);
        engine.take_events();
    }

    let stats = engine.stats();
    Ok(GameRecord {
        game_id: String::new(),
        seed: Some(seed),
        rows: game_cfg.rows,
        cols: game_cfg.cols,
        flips,
        attempts: stats.attempts,
        mismatches: stats.mismatches,
        matched_pairs: stats.matched_pairs,
        completed: engine.is_complete(),
        elapsed_ms: engine.elapsed(),
        ts: None,
        meta: None,
    })
}

#[derive(Debug, Default)]
struct Summary {
    completed: u32,
    attempts: u64,
    mismatches: u64,
}

impl Summary {
    fn add(&mut self, record: &GameRecord) {
        if record.completed {
            self.completed += 1;
        }
        self.attempts += u64::from(record.attempts);
        self.mismatches += u64::from(record.mismatches);
    }

    fn mean(&self, total: u64, games: u32) -> f64 {
        if games == 0 {
            0.0
        } else {
            total as f64 / f64::from(games)
        }
    }
}
