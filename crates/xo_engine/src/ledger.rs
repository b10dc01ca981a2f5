//! Consumable charges gating hint and undo.
//!
//! The turn controller never owns the player's inventory. It asks a
//! [`ConsumableLedger`] supplied by the caller, which keeps storage out of
//! the engine and lets tests hand in a plain counter.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Limited-use player resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Consumable {
    /// Reveals the best move.
    #[display("hint")]
    Hint,
    /// Reverts the last turn.
    #[display("undo")]
    Undo,
}

/// Check-and-debit interface for consumables.
pub trait ConsumableLedger {
    /// True if at least one hint charge remains.
    fn has_hint(&self) -> bool;
    /// Spends one hint charge.
    fn consume_hint(&mut self);
    /// True if at least one undo charge remains.
    fn has_undo(&self) -> bool;
    /// Spends one undo charge.
    fn consume_undo(&mut self);

    /// True if a charge of `kind` remains.
    fn has(&self, kind: Consumable) -> bool {
        match kind {
            Consumable::Hint => self.has_hint(),
            Consumable::Undo => self.has_undo(),
        }
    }

    /// Spends one charge of `kind`.
    fn consume(&mut self, kind: Consumable) {
        match kind {
            Consumable::Hint => self.consume_hint(),
            Consumable::Undo => self.consume_undo(),
        }
    }
}

impl<L: ConsumableLedger + ?Sized> ConsumableLedger for &mut L {
    fn has_hint(&self) -> bool {
        (**self).has_hint()
    }
    fn consume_hint(&mut self) {
        (**self).consume_hint()
    }
    fn has_undo(&self) -> bool {
        (**self).has_undo()
    }
    fn consume_undo(&mut self) {
        (**self).consume_undo()
    }
}

/// Starting hint charges for a new player.
pub const DEFAULT_HINTS: u32 = 3;

/// Starting undo charges for a new player.
pub const DEFAULT_UNDOS: u32 = 2;

/// Counter-backed ledger. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryLedger {
    hints: Option<u32>,
    undos: Option<u32>,
}

impl InMemoryLedger {
    /// Ledger with fixed charges.
    #[instrument]
    pub fn new(hints: u32, undos: u32) -> Self {
        Self {
            hints: Some(hints),
            undos: Some(undos),
        }
    }

    /// Ledger that never runs out.
    pub fn unlimited() -> Self {
        Self {
            hints: None,
            undos: None,
        }
    }

    /// Remaining hint charges (`None` = unlimited).
    pub fn hints(&self) -> Option<u32> {
        self.hints
    }

    /// Remaining undo charges (`None` = unlimited).
    pub fn undos(&self) -> Option<u32> {
        self.undos
    }

    fn spend(counter: &mut Option<u32>, kind: Consumable) {
        if let Some(n) = counter {
            *n = n.saturating_sub(1);
            debug!(%kind, remaining = *n, "Consumable spent");
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_HINTS, DEFAULT_UNDOS)
    }
}

impl ConsumableLedger for InMemoryLedger {
    fn has_hint(&self) -> bool {
        self.hints.is_none_or(|n| n > 0)
    }

    fn consume_hint(&mut self) {
        Self::spend(&mut self.hints, Consumable::Hint);
    }

    fn has_undo(&self) -> bool {
        self.undos.is_none_or(|n| n > 0)
    }

    fn consume_undo(&mut self) {
        Self::spend(&mut self.undos, Consumable::Undo);
    }
}
