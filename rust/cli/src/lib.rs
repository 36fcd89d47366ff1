//! # Gamemory CLI Library
//!
//! Command-line front end for the gamemory memory-matching engine: play in
//! the terminal, simulate games with a bot, inspect deals and configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["gamemory", "play", "--seed", "7"];
//! let code = gamemory_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a game interactively
//! - `sim`: Run headless games and record them as JSONL
//! - `deal`: Print a shuffled board as JSON
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod bot;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, GamemoryCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_sim_command,
};

pub use commands::play::TerminalPresenter;
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["gamemory", "deal", "--seed", "42"];
/// let code = gamemory_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
///
/// `play` reads moves from stdin, or from `GAMEMORY_TEST_INPUT` when that
/// variable is set.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match GamemoryCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Gamemory CLI");
                    write_or_exit!(err, "Usage: gamemory <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: gamemory --help");
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);
    tracing::debug!(command = cli.cmd.name(), "dispatching");

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            seed,
            rows,
            cols,
            fast,
        } => match std::env::var("GAMEMORY_TEST_INPUT") {
            Ok(script) => {
                let mut input = std::io::Cursor::new(script.into_bytes());
                handle_play_command(seed, rows, cols, fast, out, err, &mut input)
            }
            Err(_) => {
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                handle_play_command(seed, rows, cols, fast, out, err, &mut stdin_lock)
            }
        },
        Commands::Sim {
            games,
            seed,
            output,
            memory,
            rows,
            cols,
        } => handle_sim_command(games, seed, output, memory, rows, cols, out, err),
        Commands::Deal { seed, rows, cols } => handle_deal_command(seed, rows, cols, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            // Config errors were already reported by the handler
            if !matches!(e, CliError::Config(_)) {
                write_or_exit!(err, "Error: {}", e);
            }
            exit_code::ERROR
        }
    }
}
