//! Core types: board positions, RNG, configuration.

pub mod config;
pub mod position;
pub mod rng;

pub use config::{ConfigError, GameRules};
pub use position::{Position, BOARD_SIZE, BOARD_WIDTH};
pub use rng::GameRng;
