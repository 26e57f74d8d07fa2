//! Economy configuration.
//!
//! `GameRules` carries the economy constants a round is played under. The
//! board composition is fixed and lives in `crate::board`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money deducted to start a round.
pub const DEFAULT_STAKE_COST: u64 = 10;

/// Crystals spent to recover a busted round.
pub const DEFAULT_SAVE_COST: u64 = 20;

/// Money the ledger starts with.
pub const DEFAULT_STARTING_MONEY: u64 = 100;

/// Crystals the ledger starts with.
pub const DEFAULT_STARTING_CRYSTALS: u64 = 100;

/// Invalid rule values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("stake cost must be greater than zero")]
    ZeroStakeCost,
    #[error("save cost must be greater than zero")]
    ZeroSaveCost,
}

/// Economy rules for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Money debited by `start`.
    pub stake_cost: u64,

    /// Crystals debited by `save`.
    pub save_cost: u64,

    /// Initial ledger money.
    pub starting_money: u64,

    /// Initial ledger crystals.
    pub starting_crystals: u64,

    /// Board RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            stake_cost: DEFAULT_STAKE_COST,
            save_cost: DEFAULT_SAVE_COST,
            starting_money: DEFAULT_STARTING_MONEY,
            starting_crystals: DEFAULT_STARTING_CRYSTALS,
            seed: None,
        }
    }
}

impl GameRules {
    /// Set the stake cost.
    #[must_use]
    pub fn with_stake_cost(mut self, cost: u64) -> Self {
        self.stake_cost = cost;
        self
    }

    /// Set the save cost.
    #[must_use]
    pub fn with_save_cost(mut self, cost: u64) -> Self {
        self.save_cost = cost;
        self
    }

    /// Set the starting balances.
    #[must_use]
    pub fn with_starting_balances(mut self, money: u64, crystals: u64) -> Self {
        self.starting_money = money;
        self.starting_crystals = crystals;
        self
    }

    /// Use a fixed RNG seed for reproducible boards.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the rules are playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stake_cost == 0 {
            return Err(ConfigError::ZeroStakeCost);
        }
        if self.save_cost == 0 {
            return Err(ConfigError::ZeroSaveCost);
        }
        Ok(())
    }
}
