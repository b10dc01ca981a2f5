//! XO Arena - Unified CLI
//!
//! Terminal play against the tiered AI, tier simulations and tier listing.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use xo_arena::{Arena, ArenaConfig, run_matchup, run_session};
use xo_engine::{GameMode, RngSource, Tier};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ArenaConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            mode,
            tier,
            ai_delay_ms,
            seed,
        } => run_play(config, mode, tier, ai_delay_ms, seed).await,
        Command::Simulate { x, o, games, seed } => run_simulate(x, o, games, seed),
        Command::Tiers => {
            for tier in Tier::ALL {
                println!("{:<12} {}", tier.label(), tier.description());
            }
            Ok(())
        }
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Play in the terminal
#[instrument(skip(config))]
async fn run_play(
    mut config: ArenaConfig,
    mode: Option<GameMode>,
    tier: Option<Tier>,
    ai_delay_ms: Option<u64>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(tier) = tier {
        config = config.with_tier(tier);
    }
    if let Some(ms) = ai_delay_ms {
        config = config.with_ai_delay_ms(ms);
    }
    info!(mode = %config.mode(), tier = %config.tier(), "Starting terminal game");

    println!("XO Arena - enter a square 1-9, or undo / hint / reset / tier <name> / quit");
    let arena = Arena::with_rng(config.session_config(), config.ledger(), config.timings(), seeded(seed));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(&arena, stdin, &mut stdout).await?;

    info!("Goodbye");
    Ok(())
}

/// Pit two tiers against each other
fn run_simulate(x: Tier, o: Tier, games: u32, seed: Option<u64>) -> Result<()> {
    let mut rng = RngSource(seeded(seed));
    let report = run_matchup(x, o, games, &mut rng);
    println!("{}", report);
    Ok(())
}
