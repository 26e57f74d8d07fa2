//! Random number generation for board layouts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Entropy-seeded**: Production play draws a fresh seed from the OS
//!
//! ```
//! use roll_craft::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.index_upto(8), b.index_upto(8));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG backing the board generator.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, upper]` (inclusive).
    pub fn index_upto(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }

    /// Uniform integer in the inclusive range.
    pub fn gen_range_u32(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }
}
