//! Notification contract between the engine and presentation collaborators.
//!
//! - `Snapshot`: published after every successful command
//! - `Settlement`: published once when a round resolves
//! - `EngineEvent` / `EngineObserver`: the delivery mechanism

pub mod event;
pub mod record;

pub use event::{EngineEvent, EngineObserver, EventLog};
pub use record::{Settlement, Snapshot};
