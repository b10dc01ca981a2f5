//! Core domain types for the XO Arena board.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Error parsing a board pattern.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PatternError {
    /// Pattern did not contain exactly nine cells.
    #[display("Board pattern must have 9 cells, got {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Pattern contained a character that is not a cell.
    #[display("Unexpected character {:?} in board pattern", _0)]
    BadCell(#[error(not(source))] char),
}

/// 3x3 board, row-major (0,1,2 / 3,4,5 / 6,7,8).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from a 9-cell pattern such as `"XX.OO...."`.
    ///
    /// `X` and `O` (either case) are marks; `.`, `-`, `_` and spaces are empty.
    /// Newlines and `|` separators are skipped, so `display()`-style grids parse too
    /// once their digits are replaced.
    #[instrument]
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        let mut cells = Vec::with_capacity(9);
        for c in pattern.chars() {
            let square = match c {
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                '.' | '-' | '_' | ' ' => Square::Empty,
                '\n' | '\r' | '|' | '+' => continue,
                other => return Err(PatternError::BadCell(other)),
            };
            cells.push(square);
        }
        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|cells: Vec<Square>| PatternError::WrongLength(cells.len()))?;
        Ok(Self { squares })
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable grid; empty squares show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_round_trip_cells() {
        let board = Board::from_pattern("XX.OO....").unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Mark::X));
        assert_eq!(board.get(Position::MiddleLeft), Square::Occupied(Mark::O));
        assert!(board.is_empty(Position::TopRight));
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 2);
    }

    #[test]
    fn test_pattern_skips_separators() {
        let board = Board::from_pattern("X|O|X\nO|X|O\n.|.|.").unwrap();
        assert_eq!(board.empty_positions().len(), 3);
    }

    #[test]
    fn test_pattern_rejects_bad_input() {
        assert_eq!(Board::from_pattern("XO"), Err(PatternError::WrongLength(2)));
        assert_eq!(Board::from_pattern("XO?......"), Err(PatternError::BadCell('?')));
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let board = Board::from_pattern("X...O....").unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }
}
