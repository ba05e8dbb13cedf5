//! Checkout-adjacent workflows
//!
//! Thin orchestration around the ledger core: applying points to a cart
//! produces a payment intent without mutating the ledger, and the actual
//! debit happens later when the order is settled. Settlement is a
//! best-effort, fire-and-forget adapter with no compensating action: a
//! failed debit is logged and reported as failed, but is never meant to
//! fail the surrounding order flow.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ledger::transaction::patterns;
use crate::ledger::Ledger;
use crate::traits::LedgerStorage;
use crate::types::*;

/// Intent to pay part of a cart with points
///
/// Binds the cart, the account, and the requested amount for settlement
/// when the order is finalized. Producing an intent reserves nothing: the
/// balance pre-check is advisory and the atomic debit at settlement time
/// is what enforces correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Cart the points apply to
    pub cart_id: String,
    /// Account paying with points
    pub account_id: String,
    /// Points amount to debit at settlement
    pub amount: i64,
    /// When the intent was created
    pub created_at: NaiveDateTime,
}

/// Validate an account's balance and produce a payment intent for a cart
///
/// Fails with [`LedgerError::InvalidAmount`] for non-positive amounts and
/// with [`LedgerError::InsufficientBalance`] when the current balance does
/// not cover the request. Does not mutate the ledger; the balance may
/// still change between this pre-check and settlement, in which case the
/// settlement debit rejects on its own.
pub async fn apply_points_to_cart<S: LedgerStorage + Clone>(
    ledger: &Ledger<S>,
    account_id: &str,
    cart_id: &str,
    amount: i64,
) -> LedgerResult<PaymentIntent> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(format!(
            "points amount must be positive, got {}",
            amount
        )));
    }

    let balance = ledger.get_balance(account_id).await?;
    if balance.balance < amount {
        return Err(LedgerError::InsufficientBalance {
            available: balance.balance,
            requested: amount,
        });
    }

    Ok(PaymentIntent {
        cart_id: cart_id.to_string(),
        account_id: account_id.to_string(),
        amount,
        created_at: chrono::Utc::now().naive_utc(),
    })
}

/// Order-placed event as seen by the settlement adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// Order that was placed
    pub order_id: String,
    /// Account that placed the order, when known
    pub account_id: Option<String>,
    /// Points amount to settle; zero means no points were applied
    pub points_amount: i64,
}

/// Outcome of a best-effort settlement
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    /// The debit committed; contains the post-debit balance
    Settled(Balance),
    /// The order carried no points payment or no account; nothing to do
    NothingToSettle,
    /// The debit failed; logged, not retried, no compensating action
    Failed,
}

impl SettlementOutcome {
    /// Whether the settlement actually debited points
    pub fn is_settled(&self) -> bool {
        matches!(self, SettlementOutcome::Settled(_))
    }
}

/// Settle the points portion of a placed order by debiting the account
///
/// Best-effort: errors are logged and surface as
/// [`SettlementOutcome::Failed`] rather than propagating, so an order flow
/// driving this from an event handler can continue. The outcome never
/// reports success for a failed debit.
pub async fn settle_order<S: LedgerStorage + Clone>(
    ledger: &Ledger<S>,
    event: &OrderPlaced,
) -> SettlementOutcome {
    let Some(account_id) = event.account_id.as_deref() else {
        tracing::warn!(
            order_id = %event.order_id,
            "order has no account id, cannot settle points"
        );
        return SettlementOutcome::NothingToSettle;
    };

    if event.points_amount <= 0 {
        return SettlementOutcome::NothingToSettle;
    }

    let debit = match patterns::order_debit(account_id, event.points_amount, &event.order_id) {
        Ok(debit) => debit,
        Err(err) => {
            tracing::error!(
                order_id = %event.order_id,
                account_id = %account_id,
                error = %err,
                "failed to build settlement debit"
            );
            return SettlementOutcome::Failed;
        }
    };

    match ledger.record_transaction(debit).await {
        Ok(balance) => {
            tracing::debug!(
                order_id = %event.order_id,
                account_id = %account_id,
                amount = event.points_amount,
                balance = balance.balance,
                "settled points for order"
            );
            SettlementOutcome::Settled(balance)
        }
        Err(err) => {
            tracing::error!(
                order_id = %event.order_id,
                account_id = %account_id,
                amount = event.points_amount,
                error = %err,
                "points settlement failed for order"
            );
            SettlementOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::patterns::REF_ADMIN_ADJUSTMENT;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn intent_requires_sufficient_balance() {
        let ledger = Ledger::new(MemoryStorage::new());
        ledger
            .credit("c1", 100, REF_ADMIN_ADJUSTMENT, "", "")
            .await
            .unwrap();

        let intent = apply_points_to_cart(&ledger, "c1", "cart_1", 80)
            .await
            .unwrap();
        assert_eq!(intent.amount, 80);
        assert_eq!(intent.account_id, "c1");

        // The pre-check mutates nothing
        assert_eq!(ledger.get_balance("c1").await.unwrap().balance, 100);

        let err = apply_points_to_cart(&ledger, "c1", "cart_1", 150)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                available: 100,
                requested: 150
            }
        ));
    }

    #[tokio::test]
    async fn intent_rejects_non_positive_amounts() {
        let ledger = Ledger::new(MemoryStorage::new());
        assert!(matches!(
            apply_points_to_cart(&ledger, "c1", "cart_1", 0).await,
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn settlement_debits_the_account() {
        let ledger = Ledger::new(MemoryStorage::new());
        ledger
            .credit("c1", 100, REF_ADMIN_ADJUSTMENT, "", "")
            .await
            .unwrap();

        let event = OrderPlaced {
            order_id: "order_1".to_string(),
            account_id: Some("c1".to_string()),
            points_amount: 60,
        };

        let outcome = settle_order(&ledger, &event).await;
        match outcome {
            SettlementOutcome::Settled(balance) => assert_eq!(balance.balance, 40),
            other => panic!("expected settled outcome, got {:?}", other),
        }

        let history = ledger.list_transactions("c1", 10, 0).await.unwrap();
        assert_eq!(history[0].reference_type, "order");
        assert_eq!(history[0].reference_id, "order_1");
    }

    #[tokio::test]
    async fn settlement_failure_is_reported_not_propagated() {
        let ledger = Ledger::new(MemoryStorage::new());

        // No balance: the debit must fail, the adapter must not panic or
        // report success, and the ledger must stay untouched.
        let event = OrderPlaced {
            order_id: "order_1".to_string(),
            account_id: Some("c1".to_string()),
            points_amount: 60,
        };
        assert_eq!(settle_order(&ledger, &event).await, SettlementOutcome::Failed);
        assert_eq!(ledger.get_balance("c1").await.unwrap().balance, 0);
        assert!(ledger.list_transactions("c1", 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settlement_skips_orders_without_points_or_account() {
        let ledger = Ledger::new(MemoryStorage::new());

        let no_account = OrderPlaced {
            order_id: "order_1".to_string(),
            account_id: None,
            points_amount: 60,
        };
        assert_eq!(
            settle_order(&ledger, &no_account).await,
            SettlementOutcome::NothingToSettle
        );

        let no_points = OrderPlaced {
            order_id: "order_2".to_string(),
            account_id: Some("c1".to_string()),
            points_amount: 0,
        };
        assert_eq!(
            settle_order(&ledger, &no_points).await,
            SettlementOutcome::NothingToSettle
        );
    }
}
