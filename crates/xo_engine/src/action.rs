//! Moves and the reasons a request can be turned down.
//!
//! Rejections are values, not panics: every turn-controller operation
//! leaves the session untouched and hands one of these back.

use super::ledger::Consumable;
use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move, undo or hint request was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// The target square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// A human move arrived during the AI's ply.
    #[display("It's not your turn")]
    NotYourTurn,

    /// Another operation is mid-application (the AI is thinking or applying its move).
    #[display("Session is busy")]
    Locked,

    /// The ledger reports no remaining charges.
    #[display("No {} charges remaining", _0)]
    NoResourceAvailable(Consumable),

    /// Undo requested with too little history to revert.
    #[display("Nothing to undo")]
    NothingToUndo,

    /// Search ran on a full board.
    #[display("No legal move available")]
    NoLegalMove,
}

impl std::error::Error for Rejection {}
