//! Win/loss tally for player-vs-AI games.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use xo_engine::{GameMode, HUMAN_MARK, Outcome};

/// Results of finished games against the AI, from the human's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArenaStats {
    /// Games the human won.
    pub wins: u32,
    /// Games the AI won.
    pub losses: u32,
    /// Drawn games.
    pub draws: u32,
    /// Consecutive human wins, unaffected by draws.
    pub win_streak: u32,
    /// Longest streak so far.
    pub best_win_streak: u32,
}

impl ArenaStats {
    /// Records a finished game. Hot-seat games and unfinished outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, mode: GameMode, outcome: Outcome) {
        if mode != GameMode::PlayerVsAi {
            return;
        }
        match outcome {
            Outcome::InProgress => return,
            Outcome::Draw => self.draws += 1,
            Outcome::Win { mark, .. } if mark == HUMAN_MARK => {
                self.wins += 1;
                self.win_streak += 1;
                self.best_win_streak = self.best_win_streak.max(self.win_streak);
            }
            Outcome::Win { .. } => {
                self.losses += 1;
                self.win_streak = 0;
            }
        }
        debug!(?self, "Stats updated");
    }

    /// Total finished games recorded.
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}
