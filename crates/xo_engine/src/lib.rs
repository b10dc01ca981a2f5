//! XO Arena engine - tic-tac-toe rules, minimax AI and turn control.
//!
//! # Architecture
//!
//! - **Board**: [`Board`], [`Mark`], [`Square`], [`Position`]
//! - **Rules**: [`detect_outcome`] scans the eight [`LINES`] for a win, then checks for a draw
//! - **Search**: [`search_best_move`] runs exhaustive depth-aware minimax
//! - **Difficulty**: [`select_move`] shapes the search per [`Tier`]
//! - **Session**: [`Session`] is the turn controller (moves, AI tickets, undo, hint, reset)
//!
//! The engine is synchronous and performs no I/O. Randomness comes in through
//! [`RandomSource`] and consumable charges through [`ConsumableLedger`], so
//! every tier and every gated request can be tested deterministically.
//!
//! # Example
//!
//! ```
//! use xo_engine::{FixedSource, InMemoryLedger, Position, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.apply_move(Position::Center).unwrap();
//! assert!(session.is_ai_thinking());
//!
//! session.play_ai_now(&mut FixedSource(0.0)).unwrap();
//! assert!(!session.is_ai_thinking());
//!
//! let mut ledger = InMemoryLedger::default();
//! let hint = session.request_hint(&mut ledger).unwrap();
//! assert_eq!(session.hint(), Some(hint.position));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod difficulty;
mod ledger;
mod position;
mod random;
pub mod rules;
mod search;
mod session;
mod types;

pub use action::{Move, Rejection};
pub use difficulty::{CHAOS_BLUNDER_CHANCE, PRO_SUBOPTIMAL_CHANCE, Tier, select_move};
pub use ledger::{Consumable, ConsumableLedger, DEFAULT_HINTS, DEFAULT_UNDOS, InMemoryLedger};
pub use position::Position;
pub use random::{FixedSource, RandomSource, RngSource, SequenceSource};
pub use rules::{LINES, Line, Outcome, detect_outcome, is_draw, winning_line};
pub use search::{ScoredMove, WIN_SCORE, score_candidates, search_best_move, search_worst_move};
pub use session::{
    AI_MARK, AiTicket, GameMode, HUMAN_MARK, HintTicket, HistoryEntry, MoveReport, Phase, Session, SessionConfig,
};
pub use types::{Board, Mark, PatternError, Square};
