//! Command handler modules for the gamemory CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod deal;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Resolves configuration for a game command: file and env values, then the
/// command-line flags, then a check that the grid can be dealt. Failures are
/// reported on `err` before being returned.
pub(crate) fn resolve_config(
    seed: Option<u64>,
    rows: Option<usize>,
    cols: Option<usize>,
    err: &mut dyn Write,
) -> Result<Config, CliError> {
    let checked = config::load_with_sources().and_then(|resolved| {
        let cfg = resolved.config.with_overrides(seed, rows, cols);
        config::validate(&cfg).map(|()| cfg)
    });
    match checked {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            Err(e.into())
        }
    }
}
