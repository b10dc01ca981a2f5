//! Command-line interface for xo_arena.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xo_engine::{GameMode, Tier};

/// XO Arena - tic-tac-toe against a tiered minimax AI
#[derive(Parser, Debug)]
#[command(name = "xo_arena")]
#[command(about = "Tic-tac-toe against a tiered minimax AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal (cells 1-9, undo, hint, reset, tier <name>, quit)
    Play {
        /// Game mode: pvai or pvp
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// AI tier: rookie, pro, grandmaster or chaos
        #[arg(short, long)]
        tier: Option<Tier>,

        /// AI thinking delay in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pit two tiers against each other
    Simulate {
        /// Tier playing X
        #[arg(short, long, default_value = "grandmaster")]
        x: Tier,

        /// Tier playing O
        #[arg(short, long, default_value = "rookie")]
        o: Tier,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for the tiers' random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the AI tiers
    Tiers,
}
