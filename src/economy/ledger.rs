//! Player-wide currency balances.
//!
//! Two currencies:
//! - **money**: soft currency, staked to start a round and won back on claim
//! - **crystals**: hard currency, spent to recover a busted round
//!
//! Every transaction is all-or-nothing: on `Err` both balances are untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameRules;

/// Why a ledger transaction was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("need {needed} money, have {available}")]
    InsufficientMoney { needed: u64, available: u64 },
    #[error("need {needed} crystals, have {available}")]
    InsufficientCrystals { needed: u64, available: u64 },
    #[error("nothing to recover from a zero-value bust")]
    NothingToSave,
}

/// Money and crystal balances. Outlives any single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyLedger {
    money: u64,
    crystals: u64,
}

impl Default for EconomyLedger {
    fn default() -> Self {
        Self::from_rules(&GameRules::default())
    }
}

impl EconomyLedger {
    /// Create a ledger with explicit starting balances.
    #[must_use]
    pub const fn new(money: u64, crystals: u64) -> Self {
        Self { money, crystals }
    }

    /// Create a ledger with the starting balances from `rules`.
    #[must_use]
    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.starting_money, rules.starting_crystals)
    }

    #[must_use]
    pub const fn money(&self) -> u64 {
        self.money
    }

    #[must_use]
    pub const fn crystals(&self) -> u64 {
        self.crystals
    }

    /// Whether `debit_stake(cost)` would succeed.
    #[must_use]
    pub const fn can_afford(&self, cost: u64) -> bool {
        self.money >= cost
    }

    /// Whether `save_on_bust(crystal_cost, amount)` would succeed.
    #[must_use]
    pub const fn can_save(&self, crystal_cost: u64, amount: u64) -> bool {
        self.crystals >= crystal_cost && amount > 0
    }

    /// Take the stake for a new round.
    pub fn debit_stake(&mut self, cost: u64) -> Result<(), LedgerError> {
        if !self.can_afford(cost) {
            return Err(LedgerError::InsufficientMoney {
                needed: cost,
                available: self.money,
            });
        }
        self.money -= cost;
        Ok(())
    }

    /// Pay out a claimed round.
    pub fn credit_claim(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spend crystals to recover the forfeited value of a bust.
    pub fn save_on_bust(&mut self, crystal_cost: u64, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::NothingToSave);
        }
        if self.crystals < crystal_cost {
            return Err(LedgerError::InsufficientCrystals {
                needed: crystal_cost,
                available: self.crystals,
            });
        }
        self.crystals -= crystal_cost;
        self.money = self.money.saturating_add(amount);
        Ok(())
    }
}
