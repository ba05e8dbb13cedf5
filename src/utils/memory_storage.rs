//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Inner {
    balances: HashMap<String, Balance>,
    // Append-only journal; insertion order is commit order.
    journal: Vec<Transaction>,
    gates: HashMap<String, ProductGate>,
}

/// In-memory storage implementation for testing and development
///
/// All state lives behind a single lock, so `commit_transaction` is
/// naturally atomic: the sufficiency check, the journal append, and the
/// balance update happen in one write-lock scope and concurrent commits
/// are serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.balances.clear();
        inner.journal.clear();
        inner.gates.clear();
    }

    /// Number of transactions in the journal, across all accounts
    pub fn journal_len(&self) -> usize {
        self.inner.read().unwrap().journal.len()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn get_balance(&self, account_id: &str) -> LedgerResult<Option<Balance>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.balances.get(account_id).cloned())
    }

    async fn get_or_create_balance(&self, account_id: &str) -> LedgerResult<Balance> {
        let mut inner = self.inner.write().unwrap();
        let balance = inner
            .balances
            .entry(account_id.to_string())
            .or_insert_with(|| Balance::new(account_id.to_string()));
        Ok(balance.clone())
    }

    async fn commit_transaction(&self, transaction: &Transaction) -> LedgerResult<Balance> {
        let mut inner = self.inner.write().unwrap();

        let current = inner
            .balances
            .get(&transaction.account_id)
            .map(|b| b.balance)
            .unwrap_or(0);

        // Conditional update: a debit must be covered by the committed
        // balance or nothing is written.
        if transaction.amount < 0 && current < transaction.magnitude() {
            return Err(LedgerError::InsufficientBalance {
                available: current,
                requested: transaction.magnitude(),
            });
        }

        inner.journal.push(transaction.clone());

        let account_id = transaction.account_id.clone();
        let balance = inner
            .balances
            .entry(account_id.clone())
            .or_insert_with(|| Balance::new(account_id));
        balance.balance += transaction.amount;
        balance.updated_at = chrono::Utc::now().naive_utc();

        Ok(balance.clone())
    }

    async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .journal
            .iter()
            .find(|txn| txn.id == transaction_id)
            .cloned())
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        let inner = self.inner.read().unwrap();
        // Reverse journal order gives newest-first without relying on
        // timestamp ties.
        Ok(inner
            .journal
            .iter()
            .rev()
            .filter(|txn| txn.account_id == account_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn sum_transactions(&self, account_id: &str) -> LedgerResult<i64> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .journal
            .iter()
            .filter(|txn| txn.account_id == account_id)
            .map(|txn| txn.amount)
            .sum())
    }

    async fn upsert_product_gate(&self, gate: &ProductGate) -> LedgerResult<ProductGate> {
        let mut inner = self.inner.write().unwrap();
        let mut stored = gate.clone();
        if let Some(existing) = inner.gates.get(&gate.product_id) {
            stored.created_at = existing.created_at;
        }
        stored.updated_at = chrono::Utc::now().naive_utc();
        inner
            .gates
            .insert(stored.product_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_product_gate(&self, product_id: &str) -> LedgerResult<Option<ProductGate>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.gates.get(product_id).cloned())
    }

    async fn get_product_gates(
        &self,
        product_ids: &[String],
    ) -> LedgerResult<HashMap<String, ProductGate>> {
        let inner = self.inner.read().unwrap();
        Ok(product_ids
            .iter()
            .filter_map(|id| inner.gates.get(id).map(|gate| (id.clone(), gate.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commit_creates_balance_lazily() {
        let storage = MemoryStorage::new();
        let txn = Transaction::credit(
            "c1".to_string(),
            100,
            "promotion".to_string(),
            "promo_1".to_string(),
            String::new(),
        )
        .unwrap();

        let balance = storage.commit_transaction(&txn).await.unwrap();
        assert_eq!(balance.balance, 100);
        assert_eq!(storage.journal_len(), 1);
    }

    #[tokio::test]
    async fn overdraft_commit_writes_nothing() {
        let storage = MemoryStorage::new();
        let txn = Transaction::debit(
            "c1".to_string(),
            50,
            "order".to_string(),
            "order_1".to_string(),
            String::new(),
        )
        .unwrap();

        let err = storage.commit_transaction(&txn).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                available: 0,
                requested: 50
            }
        ));
        assert_eq!(storage.journal_len(), 0);
        assert!(storage.get_balance("c1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let storage = MemoryStorage::new();
        for amount in [10, 20, 30] {
            let txn = Transaction::credit(
                "c1".to_string(),
                amount,
                "promotion".to_string(),
                String::new(),
                format!("credit {}", amount),
            )
            .unwrap();
            storage.commit_transaction(&txn).await.unwrap();
        }

        let page = storage.list_transactions("c1", 2, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].amount, 30);
        assert_eq!(page[1].amount, 20);

        let rest = storage.list_transactions("c1", 2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].amount, 10);
    }

    #[tokio::test]
    async fn upsert_preserves_created_at() {
        let storage = MemoryStorage::new();
        let first = ProductGate::new("p1".to_string(), true, Some(100)).unwrap();
        let stored = storage.upsert_product_gate(&first).await.unwrap();

        let second = ProductGate::new("p1".to_string(), true, Some(250)).unwrap();
        let updated = storage.upsert_product_gate(&second).await.unwrap();

        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.points_price, Some(250));
    }
}
