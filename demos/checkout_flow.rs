//! Checkout flow walkthrough: product gates, cart pre-check, settlement
//!
//! Run with: cargo run --example checkout_flow

use dust_core::{
    apply_points_to_cart, settle_order, Ledger, LedgerError, MemoryStorage, OrderPlaced,
    SettlementOutcome,
};

#[tokio::main]
async fn main() -> Result<(), LedgerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let ledger = Ledger::new(MemoryStorage::new());

    println!("=== Checkout Flow Demo ===\n");

    // Admin marks a product as purchasable with points only
    let gate = ledger.set_product_gate("sku_glow", true, Some(150)).await?;
    println!(
        "Gate for {}: points_only={}, price={:?}",
        gate.product_id, gate.points_only, gate.points_price
    );

    // The storefront checks eligibility for a whole cart in one call
    let ids = vec!["sku_glow".to_string(), "sku_plain".to_string()];
    let gates = ledger.get_product_gates(&ids).await?;
    for id in &ids {
        match gates.get(id) {
            Some(gate) if gate.points_only => println!("{}: points only", id),
            Some(_) => println!("{}: points optional", id),
            None => println!("{}: no gate, currency purchase", id),
        }
    }

    // Customer earns points, then applies them to a cart
    ledger
        .credit("customer_1", 200, "promotion", "promo_1", "")
        .await?;

    let intent = apply_points_to_cart(&ledger, "customer_1", "cart_1", 150).await?;
    println!(
        "\nPayment intent: {} points bound to {} (balance untouched: {})",
        intent.amount,
        intent.cart_id,
        ledger.get_balance("customer_1").await?.balance
    );

    // Order placement drives the best-effort settlement
    let event = OrderPlaced {
        order_id: "order_1001".to_string(),
        account_id: Some(intent.account_id.clone()),
        points_amount: intent.amount,
    };
    match settle_order(&ledger, &event).await {
        SettlementOutcome::Settled(balance) => {
            println!("Settled order_1001, balance now {}", balance.balance)
        }
        SettlementOutcome::NothingToSettle => println!("Nothing to settle"),
        SettlementOutcome::Failed => println!("Settlement failed (logged, not retried)"),
    }

    // A second settlement attempt overdraws and fails without side effects
    let replay = OrderPlaced {
        order_id: "order_1002".to_string(),
        account_id: Some("customer_1".to_string()),
        points_amount: 150,
    };
    match settle_order(&ledger, &replay).await {
        SettlementOutcome::Failed => println!("Second settlement rejected, no partial state"),
        other => println!("Unexpected outcome: {:?}", other.is_settled()),
    }

    let report = ledger.verify_account("customer_1").await?;
    println!(
        "Integrity: balance {} == transaction sum {} -> {}",
        report.balance, report.transaction_sum, report.is_consistent
    );

    Ok(())
}
