//! Random board generation.
//!
//! `BoardGenerator` builds the fixed multiset (1 bomb, 1 ×2 multiplier,
//! 5 cash cells of `uniform(1..=5) × 10`, 2 blanks) and shuffles it with
//! Fisher–Yates. Successive boards come from one RNG stream, so they are
//! independent of each other.
//!
//! The engine takes boards through `BoardSource`, which any
//! `FnMut() -> Board` also implements. Tests use that to script layouts.

use super::cell::Cell;
use super::layout::Board;
use crate::core::{GameRng, BOARD_SIZE};

/// Supplier of fresh boards.
pub trait BoardSource {
    /// Produce the next board.
    fn next_board(&mut self) -> Board;
}

impl<F> BoardSource for F
where
    F: FnMut() -> Board,
{
    fn next_board(&mut self) -> Board {
        self()
    }
}

/// Shuffled-board generator.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    rng: GameRng,
}

impl BoardGenerator {
    /// Deterministic generator for a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }

    /// Seed of the underlying RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Generate a shuffled board.
    pub fn generate(&mut self) -> Board {
        let mut cells = [Cell::Blank; BOARD_SIZE];
        cells[0] = Cell::Bomb;
        cells[1] = Cell::multiplier();
        for cell in &mut cells[2..7] {
            *cell = Cell::cash(self.rng.gen_range_u32(1..=5) * 10);
        }
        // cells[7..9] stay blank

        for i in (1..BOARD_SIZE).rev() {
            let j = self.rng.index_upto(i);
            cells.swap(i, j);
        }

        Board::from_valid_cells(cells)
    }
}

impl BoardSource for BoardGenerator {
    fn next_board(&mut self) -> Board {
        self.generate()
    }
}
