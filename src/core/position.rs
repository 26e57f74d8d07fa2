//! Board position addressing.
//!
//! ## Position
//!
//! Type-safe cell address on the 3×3 board, 0-based in row-major order.
//! Raw indices from the UI are converted with `Position::from_index`, which
//! rejects anything outside `0..BOARD_SIZE`.

use serde::{Deserialize, Serialize};

/// Number of cells on a board.
pub const BOARD_SIZE: usize = 9;

/// Width of the square board.
pub const BOARD_WIDTH: usize = 3;

/// Cell address on the board (0..=8, row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(u8);

impl Position {
    /// Convert a raw index, returning `None` when it is off the board.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Get the raw 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row on the 3×3 grid.
    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / BOARD_WIDTH
    }

    /// Column on the 3×3 grid.
    #[must_use]
    pub const fn column(self) -> usize {
        self.index() % BOARD_WIDTH
    }

    /// Bit used for this position in a reveal mask.
    #[must_use]
    pub(crate) const fn bit(self) -> u16 {
        1 << self.0
    }

    /// Iterate over every position on the board in index order.
    ///
    /// ```
    /// use roll_craft::core::Position;
    ///
    /// let all: Vec<_> = Position::all().collect();
    /// assert_eq!(all.len(), 9);
    /// assert_eq!(all[4].row(), 1);
    /// assert_eq!(all[4].column(), 1);
    /// ```
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8).map(Position)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

impl TryFrom<usize> for Position {
    type Error = usize;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(index)
    }
}
