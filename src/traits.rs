//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use std::collections::HashMap;

use crate::types::*;

/// Storage abstraction for the points ledger
///
/// This trait allows the ledger core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. Methods take `&self`; implementations are expected to use
/// interior mutability or a connection pool.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Get the balance row for an account, if one exists
    async fn get_balance(&self, account_id: &str) -> LedgerResult<Option<Balance>>;

    /// Get the balance row for an account, creating a zero balance if none
    /// exists
    ///
    /// Must be atomic: two concurrent calls for the same account return the
    /// same row, never two competing zero rows.
    async fn get_or_create_balance(&self, account_id: &str) -> LedgerResult<Balance>;

    /// Append a transaction and apply its amount to the account balance as
    /// one atomic unit, creating the balance row if missing
    ///
    /// This is the serialization point of the ledger. For a debit (negative
    /// amount) the balance update is conditional: the commit fails with
    /// [`LedgerError::InsufficientBalance`] and writes nothing when the
    /// committed balance does not cover the amount. Implementations must
    /// guarantee that two concurrent commits against the same account
    /// cannot both pass the sufficiency check against a stale balance, and
    /// that a failed or aborted commit leaves no partial state.
    ///
    /// Returns the post-commit balance.
    async fn commit_transaction(&self, transaction: &Transaction) -> LedgerResult<Balance>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>>;

    /// List transactions for an account, newest first, with offset
    /// pagination
    async fn list_transactions(
        &self,
        account_id: &str,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<Transaction>>;

    /// Sum the amounts of all committed transactions for an account
    ///
    /// Used for integrity verification against the balance row.
    async fn sum_transactions(&self, account_id: &str) -> LedgerResult<i64>;

    /// Insert or replace the gate entry for a product, keyed by product id
    ///
    /// Last writer wins; the original `created_at` is preserved on update.
    /// Returns the stored entry.
    async fn upsert_product_gate(&self, gate: &ProductGate) -> LedgerResult<ProductGate>;

    /// Get the gate entry for a product, if one exists
    async fn get_product_gate(&self, product_id: &str) -> LedgerResult<Option<ProductGate>>;

    /// Get the gate entries for several products at once
    ///
    /// Products without an entry are simply absent from the result.
    async fn get_product_gates(
        &self,
        product_ids: &[String],
    ) -> LedgerResult<HashMap<String, ProductGate>>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before it is committed
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()>;
}

/// Default transaction validator with the basic ledger rules
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        if transaction.account_id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "transaction account id cannot be empty".to_string(),
            ));
        }

        if transaction.amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "transaction amount cannot be zero".to_string(),
            ));
        }

        // The stored sign must agree with the kind
        if transaction.amount.signum() != transaction.kind.sign() {
            return Err(LedgerError::Validation(format!(
                "{:?} transaction carries amount {}",
                transaction.kind, transaction.amount
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_transaction(amount: i64, kind: TransactionKind) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            account_id: "c1".to_string(),
            amount,
            kind,
            reference_type: String::new(),
            reference_id: String::new(),
            description: "test".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn default_validator_rejects_sign_mismatch() {
        let validator = DefaultTransactionValidator;
        assert!(validator
            .validate_transaction(&raw_transaction(100, TransactionKind::Credit))
            .is_ok());
        assert!(validator
            .validate_transaction(&raw_transaction(-40, TransactionKind::Debit))
            .is_ok());
        assert!(validator
            .validate_transaction(&raw_transaction(-40, TransactionKind::Credit))
            .is_err());
        assert!(validator
            .validate_transaction(&raw_transaction(100, TransactionKind::Debit))
            .is_err());
        assert!(validator
            .validate_transaction(&raw_transaction(0, TransactionKind::Credit))
            .is_err());
    }
}
