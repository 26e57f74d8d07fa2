//! Single-writer handle to a ledger shared between games.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::ledger::EconomyLedger;

/// Cloneable handle to one ledger.
///
/// Each transaction runs under a single lock acquisition, so a debit can
/// never interleave with a concurrent credit.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<EconomyLedger>>,
}

impl SharedLedger {
    #[must_use]
    pub fn new(ledger: EconomyLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Lock the ledger for a multi-step transaction.
    pub fn lock(&self) -> MutexGuard<'_, EconomyLedger> {
        self.inner.lock()
    }

    /// Copy of the current balances.
    #[must_use]
    pub fn balances(&self) -> EconomyLedger {
        *self.inner.lock()
    }

    #[must_use]
    pub fn money(&self) -> u64 {
        self.inner.lock().money()
    }

    #[must_use]
    pub fn crystals(&self) -> u64 {
        self.inner.lock().crystals()
    }
}
