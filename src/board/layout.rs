//! The 3×3 board and its fixed composition.
//!
//! Every board holds exactly one bomb, one ×2 multiplier, five cash cells and
//! two blanks. `Board::from_cells` enforces that for hand-built layouts;
//! `BoardGenerator` only ever produces valid ones.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::{Cell, CellKind, CASH_DENOMINATIONS, MULTIPLIER_FACTOR};
use crate::core::{Position, BOARD_SIZE};

/// Required number of cells of each kind.
pub const COMPOSITION: [(CellKind, usize); 4] = [
    (CellKind::Bomb, 1),
    (CellKind::Multiplier, 1),
    (CellKind::Cash, 5),
    (CellKind::Blank, 2),
];

/// A layout that breaks the fixed composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} {kind:?} cells, found {found}")]
    WrongCount {
        kind: CellKind,
        expected: usize,
        found: usize,
    },
    #[error("cash amount {0} is not a valid denomination")]
    InvalidCashAmount(u32),
    #[error("multiplier factor {0} is not supported")]
    InvalidFactor(u32),
}

/// Ordered, immutable set of 9 cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Build a board from an explicit layout, checking its composition.
    ///
    /// ```
    /// use roll_craft::board::{Board, Cell};
    ///
    /// let board = Board::from_cells([
    ///     Cell::cash(10), Cell::cash(20), Cell::cash(30),
    ///     Cell::cash(40), Cell::cash(50), Cell::multiplier(),
    ///     Cell::Bomb, Cell::Blank, Cell::Blank,
    /// ]).unwrap();
    /// assert_eq!(board.total_cash(), 150);
    /// ```
    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Result<Self, BoardError> {
        for cell in &cells {
            match *cell {
                Cell::Cash { amount } if !CASH_DENOMINATIONS.contains(&amount) => {
                    return Err(BoardError::InvalidCashAmount(amount));
                }
                Cell::Multiplier { factor } if factor != MULTIPLIER_FACTOR => {
                    return Err(BoardError::InvalidFactor(factor));
                }
                _ => {}
            }
        }

        let board = Self { cells };
        for (kind, expected) in COMPOSITION {
            let found = board.count(kind);
            if found != expected {
                return Err(BoardError::WrongCount {
                    kind,
                    expected,
                    found,
                });
            }
        }
        Ok(board)
    }

    /// Wrap cells already known to satisfy the composition.
    pub(super) fn from_valid_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Cell at a position.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self.cells[position.index()]
    }

    /// All cells in position order.
    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Iterate `(position, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all().zip(self.cells.iter().copied())
    }

    /// Number of cells of the given kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    /// Position of the bomb.
    #[must_use]
    pub fn bomb_position(&self) -> Option<Position> {
        self.iter().find(|(_, c)| *c == Cell::Bomb).map(|(p, _)| p)
    }

    /// Sum of all cash on the board.
    #[must_use]
    pub fn total_cash(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.amount())).sum()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.chunks(crate::core::BOARD_WIDTH).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let labels: Vec<String> = row.iter().map(|c| format!("{:>5}", c.to_string())).collect();
            write!(f, "{}", labels.join(" "))?;
        }
        Ok(())
    }
}
