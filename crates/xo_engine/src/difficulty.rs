//! Difficulty tiers wrapping the minimax search.
//!
//! | Tier        | Policy                                                        |
//! |-------------|---------------------------------------------------------------|
//! | Rookie      | uniformly random empty cell                                   |
//! | Pro         | optimal, except 30% of the time the 2nd or 3rd ranked move    |
//! | Grandmaster | always optimal                                                |
//! | Chaos       | 50% the worst move, otherwise optimal                         |
//!
//! The tier is passed on every call; nothing here remembers which tier a
//! session uses.

use crate::random::RandomSource;
use crate::search::{score_candidates, search_best_move, search_worst_move};
use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Probability that Pro deviates from the optimal move.
pub const PRO_SUBOPTIMAL_CHANCE: f64 = 0.3;

/// Probability that Chaos plays its worst move.
pub const CHAOS_BLUNDER_CHANCE: f64 = 0.5;

/// Named AI difficulty.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tier {
    /// Random legal moves.
    Rookie,
    /// Mostly optimal with occasional near-misses.
    Pro,
    /// Perfect play; never loses.
    #[default]
    Grandmaster,
    /// Alternates between perfect play and deliberate blunders.
    Chaos,
}

impl Tier {
    /// All tiers, easiest first.
    pub const ALL: [Tier; 4] = [Tier::Rookie, Tier::Pro, Tier::Grandmaster, Tier::Chaos];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Rookie => "Rookie",
            Tier::Pro => "Pro",
            Tier::Grandmaster => "Grandmaster",
            Tier::Chaos => "Chaos",
        }
    }

    /// One-line description of how the tier plays.
    pub fn description(self) -> &'static str {
        match self {
            Tier::Rookie => "Picks any open square at random.",
            Tier::Pro => "Plays the best move, but one time in three settles for a runner-up.",
            Tier::Grandmaster => "Searches the whole game tree. Cannot be beaten.",
            Tier::Chaos => "A coin flip every turn: genius or blunder.",
        }
    }
}

/// Chooses a move for `ai` under `tier`. `None` when the board is full.
///
/// Draws from `rng` only for the randomized tiers: Rookie draws once, Chaos
/// draws once, Pro draws once for the branch and once more for the rank when
/// it deviates.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move(board: &Board, ai: Mark, tier: Tier, rng: &mut impl RandomSource) -> Option<Position> {
    let chosen = match tier {
        Tier::Rookie => random_move(board, rng),
        Tier::Pro => pro_move(board, ai, rng),
        Tier::Grandmaster => search_best_move(board, ai),
        Tier::Chaos => {
            if rng.next_f64() < CHAOS_BLUNDER_CHANCE {
                debug!("Chaos blunder");
                search_worst_move(board, ai)
            } else {
                search_best_move(board, ai)
            }
        }
    };
    debug!(?chosen, "Move selected");
    chosen
}

/// Uniform pick among empty cells (ascending index order).
fn random_move(board: &Board, rng: &mut impl RandomSource) -> Option<Position> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return None;
    }
    let index = ((rng.next_f64() * empty.len() as f64) as usize).min(empty.len() - 1);
    Some(empty[index])
}

/// Optimal play, except with [`PRO_SUBOPTIMAL_CHANCE`] the 2nd or 3rd ranked
/// candidate. The rank is taken as-is; the runner-up is not re-checked for
/// a forced loss.
fn pro_move(board: &Board, ai: Mark, rng: &mut impl RandomSource) -> Option<Position> {
    let mut ranked = score_candidates(board, ai);
    if ranked.is_empty() {
        return None;
    }
    if rng.next_f64() < PRO_SUBOPTIMAL_CHANCE {
        // Stable sort keeps ascending index among equal scores.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        let last = ranked.len() - 1;
        let rank = (1 + (rng.next_f64() * 2.0) as usize).min(last);
        debug!(rank, "Pro settles for a runner-up");
        Some(ranked[rank].position)
    } else {
        search_best_move(board, ai)
    }
}
