//! Engine notifications and the observers that receive them.
//!
//! Observers get a shared reference to each event and nothing else. They
//! cannot reach back into the game, so an animation layer reacting to a
//! bust cannot re-enter a mutation for the same round.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::record::{Settlement, Snapshot};
use crate::board::Cell;
use crate::core::Position;
use crate::session::{Phase, RoundId};

/// Something observable the engine did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A cell was opened by the player or disclosed by a bust.
    CellRevealed {
        round: RoundId,
        position: Position,
        cell: Cell,
    },
    PhaseChanged {
        round: RoundId,
        from: Phase,
        to: Phase,
    },
    /// The round resolved. Sent exactly once per round.
    Settled(Settlement),
    LedgerChanged { money: u64, crystals: u64 },
    /// A fresh board replaced the previous round. Older rounds are stale.
    BoardReset { round: RoundId },
    /// Published last after every successful command.
    StateChanged(Snapshot),
}

impl EngineEvent {
    /// Round this event belongs to, if it is round-scoped.
    #[must_use]
    pub fn round(&self) -> Option<RoundId> {
        match self {
            EngineEvent::CellRevealed { round, .. }
            | EngineEvent::PhaseChanged { round, .. }
            | EngineEvent::BoardReset { round } => Some(*round),
            EngineEvent::Settled(settlement) => Some(settlement.round),
            EngineEvent::StateChanged(snapshot) => Some(snapshot.round),
            EngineEvent::LedgerChanged { .. } => None,
        }
    }
}

/// Receiver of engine events.
pub trait EngineObserver {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineObserver for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}

/// Recording observer. Clones share one buffer, so keep a clone to read
/// back what a registered copy received.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Settlements recorded so far.
    #[must_use]
    pub fn settlements(&self) -> Vec<Settlement> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                EngineEvent::Settled(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recent snapshot recorded.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<Snapshot> {
        self.events.lock().iter().rev().find_map(|e| match e {
            EngineEvent::StateChanged(s) => Some(s.clone()),
            _ => None,
        })
    }
}

impl EngineObserver for EventLog {
    fn on_event(&mut self, event: &EngineEvent) {
        self.events.lock().push(event.clone());
    }
}
