//! Main ledger facade that coordinates balances, transactions, and gates

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::gate::GateRegistry;
use crate::ledger::{BalanceManager, TransactionManager};
use crate::traits::*;
use crate::types::*;

/// Points ledger coordinating all operations
///
/// The ledger is passive and reactive: callers (checkout workflows, admin
/// adjustments, order-settlement handlers) invoke it, never the other way
/// around. All methods take `&self`, so the ledger can be shared across
/// concurrent request handlers behind an `Arc` without external locking.
pub struct Ledger<S: LedgerStorage> {
    balance_manager: BalanceManager<S>,
    transaction_manager: TransactionManager<S>,
    gate_registry: GateRegistry<S>,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            balance_manager: BalanceManager::new(storage.clone()),
            transaction_manager: TransactionManager::new(storage.clone()),
            gate_registry: GateRegistry::new(storage),
        }
    }

    /// Create a new ledger with a custom transaction validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self {
            balance_manager: BalanceManager::new(storage.clone()),
            transaction_manager: TransactionManager::with_validator(storage.clone(), validator),
            gate_registry: GateRegistry::new(storage),
        }
    }

    // Balance operations
    /// Get the balance for an account, creating a zero balance if none
    /// exists
    pub async fn get_balance(&self, account_id: &str) -> LedgerResult<Balance> {
        self.balance_manager.get_or_create(account_id).await
    }

    // Transaction operations
    /// Credit an account and return the post-credit balance
    pub async fn credit(
        &self,
        account_id: &str,
        amount: i64,
        reference_type: &str,
        reference_id: &str,
        description: &str,
    ) -> LedgerResult<Balance> {
        self.transaction_manager
            .credit(account_id, amount, reference_type, reference_id, description)
            .await
    }

    /// Debit an account and return the post-debit balance
    ///
    /// The sufficiency check runs against the committed balance inside the
    /// storage layer's atomic commit; on [`LedgerError::InsufficientBalance`]
    /// nothing is written.
    pub async fn debit(
        &self,
        account_id: &str,
        amount: i64,
        reference_type: &str,
        reference_id: &str,
        description: &str,
    ) -> LedgerResult<Balance> {
        self.transaction_manager
            .debit(account_id, amount, reference_type, reference_id, description)
            .await
    }

    /// Validate and commit a pre-built transaction (see
    /// [`crate::ledger::transaction::patterns`])
    pub async fn record_transaction(&self, transaction: Transaction) -> LedgerResult<Balance> {
        self.transaction_manager.record(transaction).await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        self.transaction_manager.get_transaction(transaction_id).await
    }

    /// List transactions for an account, newest first, with offset
    /// pagination
    pub async fn list_transactions(
        &self,
        account_id: &str,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        self.transaction_manager
            .list_transactions(account_id, limit, offset)
            .await
    }

    // Product gate operations
    /// Insert or update the points-purchase settings for a product
    pub async fn set_product_gate(
        &self,
        product_id: &str,
        points_only: bool,
        points_price: Option<i64>,
    ) -> LedgerResult<ProductGate> {
        self.gate_registry
            .set(product_id, points_only, points_price)
            .await
    }

    /// Get the points-purchase settings for a product, if any
    pub async fn get_product_gate(&self, product_id: &str) -> LedgerResult<Option<ProductGate>> {
        self.gate_registry.get(product_id).await
    }

    /// Get the points-purchase settings for several products at once
    pub async fn get_product_gates(
        &self,
        product_ids: &[String],
    ) -> LedgerResult<HashMap<String, ProductGate>> {
        self.gate_registry.get_bulk(product_ids).await
    }

    // Integrity
    /// Verify the ledger invariant for one account: the balance row must
    /// equal the sum of all committed transaction amounts
    pub async fn verify_account(&self, account_id: &str) -> LedgerResult<IntegrityReport> {
        let balance = self.balance_manager.get_or_create(account_id).await?;
        let transaction_sum = self
            .transaction_manager
            .storage
            .sum_transactions(account_id)
            .await?;

        Ok(IntegrityReport {
            account_id: account_id.to_string(),
            balance: balance.balance,
            transaction_sum,
            is_consistent: balance.balance == transaction_sum && balance.balance >= 0,
        })
    }
}

/// Report on one account's ledger consistency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub account_id: String,
    pub balance: i64,
    pub transaction_sum: i64,
    pub is_consistent: bool,
}
