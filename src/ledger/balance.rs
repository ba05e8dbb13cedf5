//! Balance management functionality

use crate::traits::*;
use crate::types::*;

/// Balance manager for per-account balance rows
///
/// Balances are created lazily: the first read of an account materializes
/// a zero balance through the storage layer's atomic get-or-create.
pub struct BalanceManager<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> BalanceManager<S> {
    /// Create a new balance manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get the balance for an account, creating a zero balance if none
    /// exists
    ///
    /// Only fails on storage errors; a missing account is not a fault.
    pub async fn get_or_create(&self, account_id: &str) -> LedgerResult<Balance> {
        self.storage.get_or_create_balance(account_id).await
    }

    /// Get the balance for an account without creating one
    pub async fn get(&self, account_id: &str) -> LedgerResult<Option<Balance>> {
        self.storage.get_balance(account_id).await
    }
}
