//! Command-line argument definitions.

use crate::validation::{parse_dimension, parse_memory};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gamemory",
    version,
    about = "Gamemory: memory-matching card game"
)]
pub struct GamemoryCli {
    /// Raise log verbosity on stderr (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play in the terminal
    Play {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = parse_dimension)]
        rows: Option<usize>,
        #[arg(long, value_parser = parse_dimension)]
        cols: Option<usize>,
        /// Resolve pairs without waiting out the delay
        #[arg(long)]
        fast: bool,
    },
    /// Play games with a bot and record them as JSONL
    Sim {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
        /// Probability that the bot remembers a card it has seen
        #[arg(long, default_value_t = 1.0, value_parser = parse_memory)]
        memory: f64,
        #[arg(long, value_parser = parse_dimension)]
        rows: Option<usize>,
        #[arg(long, value_parser = parse_dimension)]
        cols: Option<usize>,
    },
    /// Print a shuffled board as JSON
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = parse_dimension)]
        rows: Option<usize>,
        #[arg(long, value_parser = parse_dimension)]
        cols: Option<usize>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Deal { .. } => "deal",
            Commands::Cfg => "cfg",
        }
    }
}
