//! Exhaustive minimax search.
//!
//! Scores are taken from the searching mark's point of view. A line won by
//! that mark at recursion depth `d` scores `10 - d`, a line won by the
//! opponent scores `d - 10`, and a full board scores `0`. Candidates are
//! evaluated at depth 0, so an immediate win scores 10.
//!
//! The recursion prunes with alpha-beta. Every root candidate is searched
//! with a full window, so the scores it reports are exact and the chosen
//! move matches a plain minimax scan.

use crate::rules::winning_line;
use crate::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Score of a win found at depth 0.
pub const WIN_SCORE: i32 = 10;

/// A candidate move paired with its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoredMove {
    /// The candidate cell.
    pub position: Position,
    /// Minimax score from the searching mark's perspective.
    pub score: i32,
}

/// Scores every empty cell, ascending by index, as a first move for `ai`.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn score_candidates(board: &Board, ai: Mark) -> Vec<ScoredMove> {
    let mut scratch = board.clone();
    let candidates: Vec<ScoredMove> = Position::valid_moves(board)
        .into_iter()
        .map(|position| {
            scratch.set(position, Square::Occupied(ai));
            let score = minimax(&mut scratch, 0, false, ai, i32::MIN, i32::MAX);
            scratch.set(position, Square::Empty);
            ScoredMove { position, score }
        })
        .collect();
    trace!(?candidates, "Scored candidates");
    candidates
}

/// Optimal move for `ai`, or `None` when the board is full.
///
/// Ties go to the lowest index.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn search_best_move(board: &Board, ai: Mark) -> Option<Position> {
    pick(&score_candidates(board, ai), |score, best| score > best)
}

/// Worst move for `ai`: the candidate with the lowest minimax score, lowest
/// index on ties. `None` when the board is full.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn search_worst_move(board: &Board, ai: Mark) -> Option<Position> {
    pick(&score_candidates(board, ai), |score, worst| score < worst)
}

/// First candidate in scan order that no later candidate strictly `beats`.
fn pick(candidates: &[ScoredMove], beats: impl Fn(i32, i32) -> bool) -> Option<Position> {
    let mut chosen: Option<ScoredMove> = None;
    for candidate in candidates {
        match chosen {
            Some(current) if !beats(candidate.score, current.score) => {}
            _ => chosen = Some(*candidate),
        }
    }
    chosen.map(|c| c.position)
}

fn minimax(board: &mut Board, depth: i32, maximizing: bool, ai: Mark, mut alpha: i32, mut beta: i32) -> i32 {
    if let Some((winner, _)) = winning_line(board) {
        return if winner == ai {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if board.is_full() {
        return 0;
    }

    let mover = if maximizing { ai } else { ai.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in Position::ALL {
        if !board.is_empty(position) {
            continue;
        }
        board.set(position, Square::Occupied(mover));
        let score = minimax(board, depth + 1, !maximizing, ai, alpha, beta);
        board.set(position, Square::Empty);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(pattern: &str) -> Board {
        Board::from_pattern(pattern).unwrap()
    }

    /// Plain minimax with no pruning, used to cross-check scores.
    fn reference(board: &mut Board, depth: i32, maximizing: bool, ai: Mark) -> i32 {
        if let Some((winner, _)) = winning_line(board) {
            return if winner == ai { 10 - depth } else { depth - 10 };
        }
        if board.is_full() {
            return 0;
        }
        let mover = if maximizing { ai } else { ai.opponent() };
        let mut scores = Vec::new();
        for p in Position::ALL {
            if board.is_empty(p) {
                board.set(p, Square::Occupied(mover));
                scores.push(reference(board, depth + 1, !maximizing, ai));
                board.set(p, Square::Empty);
            }
        }
        let best = if maximizing { scores.iter().max() } else { scores.iter().min() };
        best.copied().unwrap_or(0)
    }

    #[test]
    fn test_immediate_win_scores_ten() {
        let scored = score_candidates(&board("XX.OO...."), Mark::X);
        let win = scored.iter().find(|c| c.position == Position::TopRight).unwrap();
        assert_eq!(win.score, WIN_SCORE);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let full = board("XOXXOOOXX");
        assert_eq!(search_best_move(&full, Mark::X), None);
        assert_eq!(search_worst_move(&full, Mark::O), None);
        assert!(score_candidates(&full, Mark::X).is_empty());
    }

    #[test]
    fn test_pruned_scores_match_plain_minimax() {
        for pattern in ["X........", "X...O....", "XO.......", "X.O.X....", "OX..X...."] {
            let start = board(pattern);
            for ai in [Mark::X, Mark::O] {
                for candidate in score_candidates(&start, ai) {
                    let mut scratch = start.clone();
                    scratch.set(candidate.position, Square::Occupied(ai));
                    assert_eq!(
                        candidate.score,
                        reference(&mut scratch, 0, false, ai),
                        "{pattern} {ai} {:?}",
                        candidate.position
                    );
                }
            }
        }
    }

    #[test]
    fn test_prefers_shallow_win_over_block() {
        // O can win now at 7 or block X at 6; winning is worth more.
        let best = search_best_move(&board("XO.XO...X"), Mark::O);
        assert_eq!(best, Some(Position::BottomCenter));
    }
}
