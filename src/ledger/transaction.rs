//! Transaction processing and history

use crate::traits::*;
use crate::types::*;

/// Transaction manager for the credit/debit critical path
///
/// Builds transactions, validates them, and hands them to the storage
/// layer's atomic commit. The manager itself holds no balance state and
/// performs no locking; per-account serialization is the storage
/// contract ([`LedgerStorage::commit_transaction`]).
pub struct TransactionManager<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: LedgerStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Credit an account
    ///
    /// Fails with [`LedgerError::InvalidAmount`] if `amount <= 0`. Appends
    /// a credit transaction and increments the balance atomically,
    /// returning the post-credit balance.
    pub async fn credit(
        &self,
        account_id: &str,
        amount: i64,
        reference_type: &str,
        reference_id: &str,
        description: &str,
    ) -> LedgerResult<Balance> {
        let transaction = Transaction::credit(
            account_id.to_string(),
            amount,
            reference_type.to_string(),
            reference_id.to_string(),
            description.to_string(),
        )?;
        self.record(transaction).await
    }

    /// Debit an account
    ///
    /// Fails with [`LedgerError::InvalidAmount`] if `amount <= 0` and with
    /// [`LedgerError::InsufficientBalance`] if the committed balance does
    /// not cover the amount. The sufficiency check and the write are one
    /// atomic unit, so no interleaved debit can pass the check against a
    /// stale balance. Returns the post-debit balance.
    pub async fn debit(
        &self,
        account_id: &str,
        amount: i64,
        reference_type: &str,
        reference_id: &str,
        description: &str,
    ) -> LedgerResult<Balance> {
        let transaction = Transaction::debit(
            account_id.to_string(),
            amount,
            reference_type.to_string(),
            reference_id.to_string(),
            description.to_string(),
        )?;
        self.record(transaction).await
    }

    /// Validate and commit a pre-built transaction
    pub async fn record(&self, transaction: Transaction) -> LedgerResult<Balance> {
        self.validator.validate_transaction(&transaction)?;

        let balance = self.storage.commit_transaction(&transaction).await?;

        tracing::debug!(
            transaction_id = %transaction.id,
            account_id = %transaction.account_id,
            amount = transaction.amount,
            kind = ?transaction.kind,
            balance = balance.balance,
            "committed ledger transaction"
        );

        Ok(balance)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// List transactions for an account, newest first
    pub async fn list_transactions(
        &self,
        account_id: &str,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        self.storage
            .list_transactions(account_id, limit, offset)
            .await
    }
}

/// Common transaction patterns
pub mod patterns {
    use super::*;

    /// Reference type for manual admin adjustments
    pub const REF_ADMIN_ADJUSTMENT: &str = "admin_adjustment";
    /// Reference type for promotional grants
    pub const REF_PROMOTION: &str = "promotion";
    /// Reference type for order settlements
    pub const REF_ORDER: &str = "order";

    /// Create a manual credit adjustment (admin grants points)
    pub fn admin_adjustment_credit(
        account_id: &str,
        amount: i64,
        description: &str,
    ) -> LedgerResult<Transaction> {
        Transaction::credit(
            account_id.to_string(),
            amount,
            REF_ADMIN_ADJUSTMENT.to_string(),
            String::new(),
            description.to_string(),
        )
    }

    /// Create a manual debit adjustment (admin revokes points)
    pub fn admin_adjustment_debit(
        account_id: &str,
        amount: i64,
        description: &str,
    ) -> LedgerResult<Transaction> {
        Transaction::debit(
            account_id.to_string(),
            amount,
            REF_ADMIN_ADJUSTMENT.to_string(),
            String::new(),
            description.to_string(),
        )
    }

    /// Create a promotional credit tied to a promotion id
    pub fn promotion_credit(
        account_id: &str,
        amount: i64,
        promotion_id: &str,
        description: &str,
    ) -> LedgerResult<Transaction> {
        Transaction::credit(
            account_id.to_string(),
            amount,
            REF_PROMOTION.to_string(),
            promotion_id.to_string(),
            description.to_string(),
        )
    }

    /// Create a debit settling points spent on an order
    pub fn order_debit(account_id: &str, amount: i64, order_id: &str) -> LedgerResult<Transaction> {
        Transaction::debit(
            account_id.to_string(),
            amount,
            REF_ORDER.to_string(),
            order_id.to_string(),
            format!("Dust spent on order {}", order_id),
        )
    }
}
