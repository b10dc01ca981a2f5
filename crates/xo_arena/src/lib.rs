//! XO Arena - a human-paced driver for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Arena**: [`Arena`] wraps an engine [`xo_engine::Session`] with the AI
//!   thinking delay and hint expiry as cancellable tokio tasks
//! - **Config**: [`ArenaConfig`] loads from TOML with per-field defaults
//! - **Stats**: [`ArenaStats`] tallies player-vs-AI results and win streaks
//! - **Play**: [`run_session`] drives an arena from line-based text input
//! - **Simulate**: [`run_matchup`] plays tiers against each other without delays

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arena;
mod config;
mod error;
mod play;
mod simulate;
mod stats;

pub use arena::{Arena, ArenaSnapshot, Timings};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use play::{PlayCommand, render, run_session};
pub use simulate::{MatchupReport, play_game, run_matchup};
pub use stats::ArenaStats;
