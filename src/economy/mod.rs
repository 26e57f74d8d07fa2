//! Persistent currencies and the transactions that cross round boundaries.

pub mod ledger;
pub mod shared;

pub use ledger::{EconomyLedger, LedgerError};
pub use shared::SharedLedger;
