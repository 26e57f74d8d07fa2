//! Reasons a command was refused.
//!
//! Refusals are ordinary UI races (double clicks, stale buttons), not
//! programming errors. A refused command has changed nothing.

use thiserror::Error;

use super::phase::Phase;
use crate::core::Position;
use crate::economy::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("command needs phase {expected}, session is {actual}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("position {0} is off the board")]
    OutOfRange(usize),
    #[error("{0} is already revealed")]
    AlreadyRevealed(Position),
    #[error("only a busted round can be saved")]
    NotBusted,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl Rejection {
    pub(crate) fn wrong_phase(expected: Phase, actual: Phase) -> Self {
        Self::WrongPhase { expected, actual }
    }
}
