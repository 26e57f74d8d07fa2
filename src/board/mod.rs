//! Board cells, layouts and generation.

pub mod cell;
pub mod generator;
pub mod layout;

pub use cell::{Cell, CellKind, CASH_DENOMINATIONS, MULTIPLIER_FACTOR};
pub use generator::{BoardGenerator, BoardSource};
pub use layout::{Board, BoardError, COMPOSITION};
