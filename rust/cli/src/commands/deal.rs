//! Deal command: shuffles one board and prints it as JSON.
//!
//! The output lists every card with its id, grid position, layout placement
//! and symbol, which makes it handy for checking what a seed deals before
//! replaying it with `play --seed`.

use crate::commands::resolve_config;
use crate::error::CliError;
use gamemory_engine::engine::Engine;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional RNG seed; a random one is chosen and printed otherwise
/// * `rows`, `cols` - Grid override
/// * `out` - Output stream for the JSON document
/// * `err` - Error stream for configuration errors
pub fn handle_deal_command(
    seed: Option<u64>,
    rows: Option<usize>,
    cols: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = resolve_config(seed, rows, cols, err)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let engine = Engine::new(cfg.game_config(), Some(seed))?;
    let board = engine.board();

    let cards: Vec<serde_json::Value> = board
        .cards()
        .iter()
        .map(|card| {
            serde_json::json!({
                "id": card.id,
                "row": card.position.row,
                "col": card.position.col,
                "x": card.placement.x,
                "y": card.placement.y,
                "symbol": card.symbol,
            })
        })
        .collect();

    let doc = serde_json::json!({
        "seed": seed,
        "rows": board.rows(),
        "cols": board.cols(),
        "pairs": board.total_pairs(),
        "cards": cards,
    });
    let json_str = serde_json::to_string_pretty(&doc).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
