//! Terminal-state classification.

use super::draw::is_full;
use super::win::{Line, winning_line};
use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of inspecting a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and at least one empty square.
    InProgress,
    /// A mark completed a line.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win { mark, .. } => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Classifies `board`: first completed line in scan order, else draw if full,
/// else in progress.
#[instrument(level = "trace")]
pub fn detect_outcome(board: &Board) -> Outcome {
    if let Some((mark, line)) = winning_line(board) {
        return Outcome::Win { mark, line };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_immediate_win_scenario() {
        let board = Board::from_pattern("XXXOO....").unwrap();
        let outcome = detect_outcome(&board);
        assert_eq!(
            outcome,
            Outcome::Win {
                mark: Mark::X,
                line: [Position::TopLeft, Position::TopCenter, Position::TopRight],
            }
        );
        assert!(outcome.is_terminal());
        assert_eq!(outcome.winner(), Some(Mark::X));
    }

    #[test]
    fn test_draw_scenario() {
        let board = Board::from_pattern("XOXXOOOXX").unwrap();
        assert_eq!(detect_outcome(&board), Outcome::Draw);
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_in_progress_is_not_terminal() {
        assert_eq!(detect_outcome(&Board::new()), Outcome::InProgress);
        assert!(!Outcome::InProgress.is_terminal());
    }
}
