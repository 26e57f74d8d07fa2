//! Round lifecycle markers.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session. Only ever moves forward until a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Board exists but cannot be opened until the stake is paid.
    NotStarted,
    /// Stake paid; cells may be opened.
    Active,
    /// Terminal. See `Outcome`.
    Resolved,
}

/// How a resolved session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A bomb was opened; winnings are forfeited.
    Bust,
    /// The player took the current balance.
    Claimed,
}

/// Identity of one board. Incremented on every reset.
///
/// Presentation timers capture the round they were scheduled for and drop
/// their effect when it no longer matches the live round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::Active => "active",
            Phase::Resolved => "resolved",
        };
        f.write_str(name)
    }
}
