//! Outcome rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the search and the turn controller share one definition
//! of "won" and "drawn".

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::{is_draw, is_full};
pub use outcome::{Outcome, detect_outcome};
pub use win::{LINES, Line, winning_line};
