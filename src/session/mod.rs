//! Round state machine.
//!
//! `NotStarted → Active → Resolved`, and back to `NotStarted` only through a
//! reset onto a fresh board.

pub mod phase;
pub mod rejection;
pub mod state;

pub use phase::{Outcome, Phase, RoundId};
pub use rejection::Rejection;
pub use state::{Reveal, Session};
