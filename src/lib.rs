//! # roll-craft
//!
//! Session engine for a single-round "pick-a-tile" wagering game.
//!
//! A player stakes money to play a hidden 3×3 board of cash, ×2 multiplier,
//! bomb and blank cells. Cash accumulates into a balance that a later
//! multiplier rescales retroactively. The round ends either on the bomb
//! (bust, winnings forfeited unless saved with crystals) or on a claim.
//!
//! ## Design Principles
//!
//! 1. **Derived balance**: the balance is always
//!    `sum(revealed cash) × multiplier`, computed on demand.
//!
//! 2. **Refusal, not failure**: wrong-phase, duplicate or unaffordable
//!    commands return a `Rejection` and leave every bit of state untouched.
//!
//! 3. **Observe, don't reach in**: presentation code subscribes to
//!    `EngineEvent`s and reads snapshots; it never mutates the engine from a
//!    callback.
//!
//! ## Modules
//!
//! - `core`: positions, RNG, economy rules
//! - `board`: cells, layouts, shuffled generation
//! - `session`: the round state machine
//! - `economy`: money/crystal ledger
//! - `events`: snapshots, settlements, observers
//! - `engine`: the `Game` facade and `Command`s

pub mod core;
pub mod board;
pub mod session;
pub mod economy;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, GameRules, Position, BOARD_SIZE};

pub use crate::board::{Board, BoardError, BoardGenerator, BoardSource, Cell, CellKind};

pub use crate::session::{Outcome, Phase, Rejection, Reveal, RoundId, Session};

pub use crate::economy::{EconomyLedger, LedgerError, SharedLedger};

pub use crate::events::{EngineEvent, EngineObserver, EventLog, Settlement, Snapshot};

pub use crate::engine::{Command, Game};
