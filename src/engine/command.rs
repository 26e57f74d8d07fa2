//! Inbound commands from the UI.

use serde::{Deserialize, Serialize};

/// A player request.
///
/// Positions are raw indices so out-of-range input from the UI is refused
/// by the engine rather than by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Pay the stake and begin the round.
    Start,
    /// Open the cell at a board index.
    Open(usize),
    /// Take the current balance.
    Claim,
    /// Discard the round and deal a fresh board.
    Reset,
    /// Spend crystals to recover a busted round.
    Save,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Open(index) => write!(f, "open({})", index),
            Command::Claim => write!(f, "claim"),
            Command::Reset => write!(f, "reset"),
            Command::Save => write!(f, "save"),
        }
    }
}
