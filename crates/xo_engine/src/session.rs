//! Turn controller for a single game.
//!
//! A [`Session`] owns the board, whose turn it is, the move history and the
//! transient hint. It is a synchronous state machine with three phases:
//!
//! - [`Phase::AwaitingHuman`]: a person may move, undo or ask for a hint.
//! - [`Phase::AwaitingAi`]: the AI owns the ply; human requests are rejected.
//! - [`Phase::Terminal`]: the game is over until [`Session::reset`].
//!
//! Delayed AI replies and hint expiry are driven from outside through
//! tickets. Every ticket records the session generation it was issued in, and
//! [`Session::reset`] bumps the generation, so a timer that fires after a
//! reset finds its ticket stale and does nothing.

use crate::action::{Move, Rejection};
use crate::difficulty::{Tier, select_move};
use crate::ledger::{Consumable, ConsumableLedger};
use crate::random::RandomSource;
use crate::rules::{Outcome, detect_outcome};
use crate::search::search_best_move;
use crate::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Mark played by the human in player-vs-AI games.
pub const HUMAN_MARK: Mark = Mark::X;

/// Mark played by the AI in player-vs-AI games.
pub const AI_MARK: Mark = Mark::O;

/// Who sits on each side of the board.
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
)]
pub enum GameMode {
    /// Human (X) against the AI (O).
    #[default]
    #[serde(rename = "pvai")]
    #[strum(serialize = "pvai", ascii_case_insensitive)]
    PlayerVsAi,
    /// Two humans sharing the board.
    #[serde(rename = "pvp")]
    #[strum(serialize = "pvp", ascii_case_insensitive)]
    PlayerVsPlayer,
}

/// Session settings chosen before the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_new::new)]
pub struct SessionConfig {
    /// Player-vs-AI or hot-seat.
    pub mode: GameMode,
    /// AI difficulty (ignored in hot-seat games).
    pub tier: Tier,
}

/// Turn-controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a human move.
    AwaitingHuman,
    /// The AI owns the current ply.
    AwaitingAi,
    /// Game over.
    Terminal(Outcome),
}

/// Snapshot taken before a move is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Board before the move.
    pub board: Board,
    /// Mark that was about to move.
    pub active: Mark,
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The move applied.
    pub applied: Move,
    /// Board outcome after the move.
    pub outcome: Outcome,
}

/// Permission for one deferred AI move, valid only within its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    generation: u64,
    mark: Mark,
}

impl AiTicket {
    /// Generation the ticket was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the AI will play.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// A revealed hint and the handle needed to expire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintTicket {
    /// Suggested move for the active mark.
    pub position: Position,
    serial: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveHint {
    position: Position,
    serial: u64,
}

/// One game of XO Arena.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Mark,
    phase: Phase,
    history: Vec<HistoryEntry>,
    hint: Option<ActiveHint>,
    generation: u64,
    hint_serial: u64,
}

// ─────────────────────────────────────────────────────────────
//  Construction and observers
// ─────────────────────────────────────────────────────────────

impl Session {
    /// Starts a fresh game; X moves first.
    #[instrument]
    pub fn new(config: SessionConfig) -> Self {
        info!(mode = %config.mode, tier = %config.tier, "Starting session");
        Self {
            config,
            board: Board::new(),
            active: Mark::X,
            phase: Phase::AwaitingHuman,
            history: Vec::new(),
            hint: None,
            generation: 0,
            hint_serial: 0,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move (the last mover once the game is over).
    pub fn active(&self) -> Mark {
        self.active
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the game so far.
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::Terminal(outcome) => outcome,
            _ => Outcome::InProgress,
        }
    }

    /// True while the AI owns the ply.
    pub fn is_ai_thinking(&self) -> bool {
        self.phase == Phase::AwaitingAi
    }

    /// Position of the visible hint, if any.
    pub fn hint(&self) -> Option<Position> {
        self.hint.map(|h| h.position)
    }

    /// Snapshots taken before each applied move, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Increments on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Session mode.
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    /// Configured AI tier.
    pub fn tier(&self) -> Tier {
        self.config.tier
    }

    /// Changes the AI tier for subsequent AI moves.
    #[instrument(skip(self))]
    pub fn set_tier(&mut self, tier: Tier) {
        self.config.tier = tier;
    }

    fn is_ai(&self, mark: Mark) -> bool {
        self.config.mode == GameMode::PlayerVsAi && mark == AI_MARK
    }

    fn waiting_phase(&self) -> Phase {
        if self.is_ai(self.active) {
            Phase::AwaitingAi
        } else {
            Phase::AwaitingHuman
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves
// ─────────────────────────────────────────────────────────────

impl Session {
    /// Applies a human move at `position`.
    ///
    /// # Errors
    ///
    /// - [`Rejection::GameOver`] once the game has ended.
    /// - [`Rejection::NotYourTurn`] while the AI owns the ply.
    /// - [`Rejection::CellOccupied`] if the square holds a mark.
    #[instrument(skip(self), fields(active = %self.active))]
    pub fn apply_move(&mut self, position: Position) -> Result<MoveReport, Rejection> {
        let rejection = match self.phase {
            Phase::Terminal(_) => Some(Rejection::GameOver),
            Phase::AwaitingAi => Some(Rejection::NotYourTurn),
            Phase::AwaitingHuman if !self.board.is_empty(position) => Some(Rejection::CellOccupied(position)),
            Phase::AwaitingHuman => None,
        };
        if let Some(rejection) = rejection {
            warn!(%rejection, "Move rejected");
            return Err(rejection);
        }
        Ok(self.place(position))
    }

    /// Issues a ticket for the pending AI move, if the AI owns the ply.
    #[instrument(skip(self))]
    pub fn begin_ai_turn(&self) -> Option<AiTicket> {
        (self.phase == Phase::AwaitingAi).then_some(AiTicket {
            generation: self.generation,
            mark: self.active,
        })
    }

    /// Plays the AI move authorised by `ticket`.
    ///
    /// A ticket from an earlier generation, or one arriving when the AI no
    /// longer owns the ply, is stale: nothing changes and `Ok(None)` comes back.
    ///
    /// # Errors
    ///
    /// [`Rejection::NoLegalMove`] if the AI is asked to move on a full board.
    /// Outcome detection runs after every ply, so this indicates a defect.
    #[instrument(skip(self, rng), fields(generation = self.generation))]
    pub fn resolve_ai_turn(
        &mut self,
        ticket: AiTicket,
        rng: &mut impl RandomSource,
    ) -> Result<Option<MoveReport>, Rejection> {
        if ticket.generation != self.generation || self.phase != Phase::AwaitingAi || ticket.mark != self.active {
            debug!(ticket_generation = ticket.generation, "Discarding stale AI ticket");
            return Ok(None);
        }
        match select_move(&self.board, ticket.mark, self.config.tier, rng) {
            Some(position) => Ok(Some(self.place(position))),
            None => {
                error!(board = %self.board.display(), "AI asked to move on a full board");
                debug_assert!(false, "outcome detection skipped before AI turn");
                Err(Rejection::NoLegalMove)
            }
        }
    }

    /// Plays the pending AI move immediately, without any delay.
    ///
    /// # Errors
    ///
    /// See [`Session::resolve_ai_turn`].
    pub fn play_ai_now(&mut self, rng: &mut impl RandomSource) -> Result<Option<MoveReport>, Rejection> {
        match self.begin_ai_turn() {
            Some(ticket) => self.resolve_ai_turn(ticket, rng),
            None => Ok(None),
        }
    }

    /// Snapshot, place, detect, then flip the turn or finish.
    fn place(&mut self, position: Position) -> MoveReport {
        let mark = self.active;
        self.history.push(HistoryEntry {
            board: self.board.clone(),
            active: mark,
        });
        self.board.set(position, Square::Occupied(mark));
        self.hint = None;

        let outcome = detect_outcome(&self.board);
        if outcome.is_terminal() {
            info!(%outcome, "Game over");
            self.phase = Phase::Terminal(outcome);
        } else {
            self.active = mark.opponent();
            self.phase = self.waiting_phase();
        }

        debug_assert!(
            (0..=1).contains(&(self.board.count(Mark::X) as i64 - self.board.count(Mark::O) as i64)),
            "marks must alternate starting with X"
        );
        debug!(%mark, %position, phase = ?self.phase, "Move applied");

        MoveReport {
            applied: Move::new(mark, position),
            outcome,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Undo, hint, reset
// ─────────────────────────────────────────────────────────────

impl Session {
    /// Reverts the last turn, spending one undo charge.
    ///
    /// Against the AI both the AI reply and the human move before it are
    /// reverted; in hot-seat games only the last move. Returns the number
    /// of plies reverted.
    ///
    /// # Errors
    ///
    /// - [`Rejection::GameOver`] once the game has ended.
    /// - [`Rejection::Locked`] while the AI owns the ply.
    /// - [`Rejection::NothingToUndo`] without enough history (no charge is spent).
    /// - [`Rejection::NoResourceAvailable`] when the ledger is empty.
    #[instrument(skip(self, ledger), fields(history = self.history.len()))]
    pub fn request_undo(&mut self, ledger: &mut impl ConsumableLedger) -> Result<usize, Rejection> {
        let plies = match self.config.mode {
            GameMode::PlayerVsAi => 2,
            GameMode::PlayerVsPlayer => 1,
        };
        self.check_human_phase()
            .and_then(|()| {
                if self.history.len() < plies {
                    Err(Rejection::NothingToUndo)
                } else {
                    Ok(())
                }
            })
            .and_then(|()| check_charge(Consumable::Undo, &*ledger))
            .inspect_err(|rejection| warn!(%rejection, "Undo rejected"))?;

        ledger.consume_undo();
        let restore_from = self.history.len() - plies;
        let entry = self.history[restore_from].clone();
        self.history.truncate(restore_from);
        self.board = entry.board;
        self.active = entry.active;
        self.phase = self.waiting_phase();
        self.hint = None;

        info!(plies, active = %self.active, "Undo applied");
        Ok(plies)
    }

    /// Reveals the optimal move for the active mark, spending one hint charge.
    ///
    /// Hints always use full-strength search regardless of the session tier.
    /// The board is not touched; the hint stays visible until a move, undo,
    /// reset, or [`Session::expire_hint`] with the returned ticket.
    ///
    /// # Errors
    ///
    /// - [`Rejection::GameOver`] once the game has ended.
    /// - [`Rejection::Locked`] while the AI owns the ply.
    /// - [`Rejection::NoResourceAvailable`] when the ledger is empty.
    #[instrument(skip(self, ledger), fields(active = %self.active))]
    pub fn request_hint(&mut self, ledger: &mut impl ConsumableLedger) -> Result<HintTicket, Rejection> {
        self.check_human_phase()
            .and_then(|()| check_charge(Consumable::Hint, &*ledger))
            .inspect_err(|rejection| warn!(%rejection, "Hint rejected"))?;

        let Some(position) = search_best_move(&self.board, self.active) else {
            error!("Hint requested on a full board");
            return Err(Rejection::NoLegalMove);
        };
        ledger.consume_hint();
        self.hint_serial += 1;
        self.hint = Some(ActiveHint {
            position,
            serial: self.hint_serial,
        });

        info!(%position, "Hint revealed");
        Ok(HintTicket {
            position,
            serial: self.hint_serial,
        })
    }

    /// Clears the hint issued with `ticket`. A newer or already-cleared hint is left alone.
    #[instrument(skip(self))]
    pub fn expire_hint(&mut self, ticket: HintTicket) -> bool {
        match self.hint {
            Some(active) if active.serial == ticket.serial => {
                self.hint = None;
                debug!("Hint expired");
                true
            }
            _ => false,
        }
    }

    /// Starts over: empty board, X to move, no history, no hint.
    ///
    /// Bumps the generation so any outstanding AI ticket goes stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.active = Mark::X;
        self.history.clear();
        self.hint = None;
        self.generation += 1;
        self.phase = self.waiting_phase();
        info!(generation = self.generation, "Session reset");
    }

    fn check_human_phase(&self) -> Result<(), Rejection> {
        match self.phase {
            Phase::Terminal(_) => Err(Rejection::GameOver),
            Phase::AwaitingAi => Err(Rejection::Locked),
            Phase::AwaitingHuman => Ok(()),
        }
    }
}

fn check_charge(kind: Consumable, ledger: &impl ConsumableLedger) -> Result<(), Rejection> {
    if ledger.has(kind) {
        Ok(())
    } else {
        Err(Rejection::NoResourceAvailable(kind))
    }
}
