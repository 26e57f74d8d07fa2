//! Hidden cell outcomes.

use serde::{Deserialize, Serialize};

/// Cash denominations a cash cell may carry.
pub const CASH_DENOMINATIONS: [u32; 5] = [10, 20, 30, 40, 50];

/// Factor carried by the multiplier cell.
pub const MULTIPLIER_FACTOR: u32 = 2;

/// Outcome hidden under one board cell. Immutable once generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Adds `amount` to the round's base total.
    Cash { amount: u32 },
    /// Multiplies the round multiplier by `factor`.
    Multiplier { factor: u32 },
    /// Ends the round as a bust.
    Bomb,
    /// No effect.
    Blank,
}

/// Discriminant of a `Cell`, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Cash,
    Multiplier,
    Bomb,
    Blank,
}

impl Cell {
    /// A cash cell.
    #[must_use]
    pub const fn cash(amount: u32) -> Self {
        Cell::Cash { amount }
    }

    /// The standard ×2 multiplier cell.
    #[must_use]
    pub const fn multiplier() -> Self {
        Cell::Multiplier {
            factor: MULTIPLIER_FACTOR,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self {
            Cell::Cash { .. } => CellKind::Cash,
            Cell::Multiplier { .. } => CellKind::Multiplier,
            Cell::Bomb => CellKind::Bomb,
            Cell::Blank => CellKind::Blank,
        }
    }

    /// Cash amount, zero for every other kind.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        match self {
            Cell::Cash { amount } => *amount,
            _ => 0,
        }
    }

    /// Multiplier factor, one for every other kind.
    #[must_use]
    pub const fn factor(&self) -> u32 {
        match self {
            Cell::Multiplier { factor } => *factor,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Cash { amount } => write!(f, "${}", amount),
            Cell::Multiplier { factor } => write!(f, "x{}", factor),
            Cell::Bomb => write!(f, "bomb"),
            Cell::Blank => write!(f, "0"),
        }
    }
}
