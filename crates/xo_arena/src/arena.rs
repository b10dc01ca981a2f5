//! Timed driver around the turn controller.
//!
//! [`Arena`] owns a [`Session`] behind a mutex together with the player's
//! ledger and an RNG. Two kinds of timer run as tokio tasks:
//!
//! - the AI reply, applied after the configured thinking delay;
//! - hint expiry, clearing a revealed hint after its display duration.
//!
//! Both tasks are aborted on [`Arena::reset`] and on drop. They also carry
//! engine tickets, so a task that wins the race against an abort still finds
//! its ticket stale and leaves the new game alone.

use crate::ArenaStats;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use xo_engine::{
    AiTicket, Board, ConsumableLedger, HintTicket, Mark, MoveReport, Outcome, Phase, Position, Rejection,
    RngSource, Session, SessionConfig, Tier,
};

/// Delays applied by the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pause before the AI reply is applied.
    pub ai_delay: Duration,
    /// How long a hint stays visible.
    pub hint_duration: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            ai_delay: Duration::from_millis(800),
            hint_duration: Duration::from_secs(3),
        }
    }
}

/// Read-only view of the arena at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaSnapshot {
    /// Board.
    pub board: Board,
    /// Mark to move.
    pub active: Mark,
    /// Turn-controller phase.
    pub phase: Phase,
    /// Outcome so far.
    pub outcome: Outcome,
    /// True while the AI reply is pending.
    pub ai_thinking: bool,
    /// Visible hint.
    pub hint: Option<Position>,
    /// Configured tier.
    pub tier: Tier,
    /// Results of finished games.
    pub stats: ArenaStats,
}

struct ArenaState<L> {
    session: Session,
    ledger: L,
    rng: RngSource<StdRng>,
    stats: ArenaStats,
}

impl<L> ArenaState<L> {
    fn record(&mut self, report: &MoveReport) {
        if report.outcome.is_terminal() {
            self.stats.record(self.session.mode(), report.outcome);
        }
    }
}

#[derive(Default)]
struct Timers {
    ai: Option<JoinHandle<()>>,
    hint: Option<JoinHandle<()>>,
}

impl Timers {
    fn abort_all(&mut self) {
        for handle in [self.ai.take(), self.hint.take()].into_iter().flatten() {
            handle.abort();
        }
    }
}

/// A session with a human-paced AI opponent.
pub struct Arena<L> {
    state: Arc<Mutex<ArenaState<L>>>,
    timers: StdMutex<Timers>,
    timings: Timings,
}

impl<L> std::fmt::Debug for Arena<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena").field("timings", &self.timings).finish_non_exhaustive()
    }
}

impl<L: ConsumableLedger + Send + 'static> Arena<L> {
    /// Creates an arena seeded from the OS.
    #[instrument(skip(ledger))]
    pub fn new(config: SessionConfig, ledger: L, timings: Timings) -> Self {
        Self::with_rng(config, ledger, timings, StdRng::from_os_rng())
    }

    /// Creates an arena with a caller-supplied RNG.
    pub fn with_rng(config: SessionConfig, ledger: L, timings: Timings, rng: StdRng) -> Self {
        info!(mode = %config.mode, tier = %config.tier, ?timings, "Opening arena");
        Self {
            state: Arc::new(Mutex::new(ArenaState {
                session: Session::new(config),
                ledger,
                rng: RngSource(rng),
                stats: ArenaStats::default(),
            })),
            timers: StdMutex::new(Timers::default()),
            timings,
        }
    }

    fn timers(&self) -> std::sync::MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies a human move and, against the AI, schedules the reply.
    ///
    /// # Errors
    ///
    /// [`Rejection::Locked`] if the AI task is applying its move at this
    /// instant, otherwise whatever [`Session::apply_move`] rejects.
    #[instrument(skip(self))]
    pub async fn apply_move(&self, position: Position) -> Result<MoveReport, Rejection> {
        let mut state = self.state.try_lock().map_err(|_| {
            warn!("Move arrived while the session was busy");
            Rejection::Locked
        })?;
        let report = state.session.apply_move(position)?;
        state.record(&report);
        if let Some(ticket) = state.session.begin_ai_turn() {
            self.schedule_ai(ticket);
        }
        Ok(report)
    }

    fn schedule_ai(&self, ticket: AiTicket) {
        let state = Arc::clone(&self.state);
        let delay = self.timings.ai_delay;
        debug!(?delay, generation = ticket.generation(), "Scheduling AI reply");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = state.lock().await;
            let state = &mut *guard;
            match state.session.resolve_ai_turn(ticket, &mut state.rng) {
                Ok(Some(report)) => {
                    info!(applied = %report.applied, outcome = %report.outcome, "AI moved");
                    state.record(&report);
                }
                Ok(None) => debug!("AI reply discarded"),
                Err(rejection) => warn!(%rejection, "AI could not move"),
            }
        });
        if let Some(previous) = self.timers().ai.replace(handle) {
            previous.abort();
        }
    }

    /// Waits until a pending AI reply has been applied (or cancelled).
    pub async fn settle(&self) {
        let pending = self.timers().ai.take();
        if let Some(handle) = pending {
            if let Err(err) = handle.await {
                debug!(%err, "AI task ended without applying");
            }
        }
    }

    /// Reverts the last turn using one undo charge.
    ///
    /// # Errors
    ///
    /// See [`Session::request_undo`].
    #[instrument(skip(self))]
    pub async fn undo(&self) -> Result<usize, Rejection> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        state.session.request_undo(&mut state.ledger)
    }

    /// Reveals the best move and schedules its expiry.
    ///
    /// # Errors
    ///
    /// See [`Session::request_hint`].
    #[instrument(skip(self))]
    pub async fn hint(&self) -> Result<Position, Rejection> {
        let ticket = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            state.session.request_hint(&mut state.ledger)?
        };
        self.schedule_hint_expiry(ticket);
        Ok(ticket.position)
    }

    fn schedule_hint_expiry(&self, ticket: HintTicket) {
        let state = Arc::clone(&self.state);
        let duration = self.timings.hint_duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            state.lock().await.session.expire_hint(ticket);
        });
        if let Some(previous) = self.timers().hint.replace(handle) {
            previous.abort();
        }
    }

    /// Starts a new game, cancelling any pending AI reply and hint timer.
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        self.timers().abort_all();
        let mut state = self.state.lock().await;
        state.session.reset();
        if let Some(ticket) = state.session.begin_ai_turn() {
            self.schedule_ai(ticket);
        }
    }

    /// Changes the AI tier for subsequent replies.
    pub async fn set_tier(&self, tier: Tier) {
        self.state.lock().await.session.set_tier(tier);
    }

    /// Current state of the game.
    pub async fn snapshot(&self) -> ArenaSnapshot {
        let state = self.state.lock().await;
        let session = &state.session;
        ArenaSnapshot {
            board: session.board().clone(),
            active: session.active(),
            phase: session.phase(),
            outcome: session.outcome(),
            ai_thinking: session.is_ai_thinking(),
            hint: session.hint(),
            tier: session.tier(),
            stats: state.stats,
        }
    }

    /// Runs `f` against the ledger (e.g. to show remaining charges).
    pub async fn with_ledger<T>(&self, f: impl FnOnce(&L) -> T) -> T {
        f(&self.state.lock().await.ledger)
    }
}

impl<L> Drop for Arena<L> {
    fn drop(&mut self) {
        self.timers.get_mut().unwrap_or_else(PoisonError::into_inner).abort_all();
    }
}
