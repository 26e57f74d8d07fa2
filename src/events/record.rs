//! Outbound records: per-mutation snapshots and the one-shot settlement.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Position, BOARD_SIZE};
use crate::session::{Outcome, Phase, RoundId};

/// Read-only view of a session, published after every successful command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round: RoundId,
    pub phase: Phase,
    /// Revealed positions in reveal order.
    pub revealed: SmallVec<[Position; BOARD_SIZE]>,
    /// Raw cash amounts revealed so far, pre-multiplier.
    pub base_revealed_amounts: Vector<u32>,
    pub multiplier: u32,
    pub balance: u64,
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    #[must_use]
    pub fn total_base(&self) -> u64 {
        self.base_revealed_amounts.iter().map(|&a| u64::from(a)).sum()
    }
}

/// Final record of a resolved round. Emitted once per round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub round: RoundId,
    pub outcome: Outcome,
    /// Sum of revealed cash, pre-multiplier.
    pub total_base: u64,
    pub multiplier: u32,
    /// `total_base × multiplier`. On a bust this is the forfeited value.
    pub settled_amount: u64,
    /// A bust with value the ledger has enough crystals to recover.
    pub can_save: bool,
    pub crystal_cost: u64,
}

impl Settlement {
    /// Money actually paid out: the settled amount on a claim, nothing on a bust.
    #[must_use]
    pub fn payout(&self) -> u64 {
        match self.outcome {
            Outcome::Claimed => self.settled_amount,
            Outcome::Bust => 0,
        }
    }
}
