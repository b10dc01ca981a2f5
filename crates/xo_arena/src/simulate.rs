//! Tier-versus-tier matches with no delays.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use xo_engine::{Board, Mark, Outcome, RandomSource, Square, Tier, detect_outcome, select_move};

/// Tally of a series of games between two tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchupReport {
    /// Tier playing X (always moves first).
    pub x_tier: Tier,
    /// Tier playing O.
    pub o_tier: Tier,
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl MatchupReport {
    /// Games played.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for MatchupReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (X) vs {} (O) over {} games: X {} / O {} / draw {}",
            self.x_tier.label(),
            self.o_tier.label(),
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

/// Plays one game to completion and returns its outcome.
pub fn play_game(x_tier: Tier, o_tier: Tier, rng: &mut impl RandomSource) -> Outcome {
    let mut board = Board::new();
    let mut active = Mark::X;
    loop {
        let outcome = detect_outcome(&board);
        if outcome.is_terminal() {
            return outcome;
        }
        let tier = if active == Mark::X { x_tier } else { o_tier };
        // In progress implies an empty square.
        let Some(position) = select_move(&board, active, tier, rng) else {
            return outcome;
        };
        board.set(position, Square::Occupied(active));
        active = active.opponent();
    }
}

/// Plays `games` games between `x_tier` and `o_tier`.
#[instrument(skip(rng))]
pub fn run_matchup(x_tier: Tier, o_tier: Tier, games: u32, rng: &mut impl RandomSource) -> MatchupReport {
    let mut report = MatchupReport {
        x_tier,
        o_tier,
        ..MatchupReport::default()
    };
    for game in 0..games {
        let outcome = play_game(x_tier, o_tier, rng);
        debug!(game, %outcome, "Game finished");
        match outcome.winner() {
            Some(Mark::X) => report.x_wins += 1,
            Some(Mark::O) => report.o_wins += 1,
            None => report.draws += 1,
        }
    }
    info!(%report, "Matchup complete");
    report
}
