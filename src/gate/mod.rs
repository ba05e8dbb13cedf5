//! Product gate registry
//!
//! A keyed store mapping a product id to its points-purchase settings:
//! whether the product is purchasable with points only, and at what points
//! price. Independent of the ledger's financial invariant; consulted by
//! checkout-adjacent workflows before they debit points.

use std::collections::HashMap;

use crate::traits::*;
use crate::types::*;

/// Registry for per-product points-purchase settings
pub struct GateRegistry<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> GateRegistry<S> {
    /// Create a new gate registry
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Insert or update the gate for a product
    ///
    /// Upsert by product id, last writer wins, no history retained. Fails
    /// with [`LedgerError::InvalidAmount`] when `points_only` is set
    /// without a positive `points_price`.
    pub async fn set(
        &self,
        product_id: &str,
        points_only: bool,
        points_price: Option<i64>,
    ) -> LedgerResult<ProductGate> {
        let gate = ProductGate::new(product_id.to_string(), points_only, points_price)?;
        self.storage.upsert_product_gate(&gate).await
    }

    /// Get the gate for a product, if one exists
    ///
    /// Absence is an expected case and is reported as `Ok(None)`.
    pub async fn get(&self, product_id: &str) -> LedgerResult<Option<ProductGate>> {
        self.storage.get_product_gate(product_id).await
    }

    /// Get the gates for several products at once
    ///
    /// Products without a gate are simply absent from the result map.
    pub async fn get_bulk(
        &self,
        product_ids: &[String],
    ) -> LedgerResult<HashMap<String, ProductGate>> {
        self.storage.get_product_gates(product_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn set_and_get_round_trip() {
        let registry = GateRegistry::new(MemoryStorage::new());

        registry.set("p1", true, Some(150)).await.unwrap();
        let gate = registry.get("p1").await.unwrap().unwrap();
        assert!(gate.points_only);
        assert_eq!(gate.points_price, Some(150));
    }

    #[tokio::test]
    async fn points_only_without_price_is_invalid() {
        let registry = GateRegistry::new(MemoryStorage::new());

        assert!(matches!(
            registry.set("p1", true, Some(0)).await,
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            registry.set("p1", true, None).await,
            Err(LedgerError::InvalidAmount(_))
        ));
        // Nothing was stored
        assert!(registry.get("p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bulk_lookup_skips_missing_products() {
        let registry = GateRegistry::new(MemoryStorage::new());

        registry.set("p1", true, Some(100)).await.unwrap();
        registry.set("p2", false, None).await.unwrap();

        let ids = vec!["p1".to_string(), "p2".to_string(), "p3".to_string()];
        let gates = registry.get_bulk(&ids).await.unwrap();

        assert_eq!(gates.len(), 2);
        assert!(gates.contains_key("p1"));
        assert!(gates.contains_key("p2"));
        assert!(!gates.contains_key("p3"));
    }

    #[tokio::test]
    async fn upsert_is_last_writer_wins() {
        let registry = GateRegistry::new(MemoryStorage::new());

        registry.set("p1", true, Some(100)).await.unwrap();
        registry.set("p1", false, None).await.unwrap();

        let gate = registry.get("p1").await.unwrap().unwrap();
        assert!(!gate.points_only);
        assert_eq!(gate.points_price, None);
    }
}
