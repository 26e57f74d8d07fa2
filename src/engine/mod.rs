//! Command surface over a session, a board source and the ledger.

pub mod command;
pub mod game;

pub use command::Command;
pub use game::Game;
