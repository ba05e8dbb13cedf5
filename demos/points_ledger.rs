//! Basic points ledger walkthrough
//!
//! Run with: cargo run --example points_ledger

use dust_core::{patterns, Ledger, LedgerError, MemoryStorage};

#[tokio::main]
async fn main() -> Result<(), LedgerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let ledger = Ledger::new(MemoryStorage::new());

    println!("=== Points Ledger Demo ===\n");

    // Balances materialize lazily with a zero balance
    let balance = ledger.get_balance("customer_1").await?;
    println!("Fresh balance: {} points", balance.balance);

    // Credit some points
    let balance = ledger
        .credit(
            "customer_1",
            500,
            "admin_adjustment",
            "",
            "Welcome grant",
        )
        .await?;
    println!("After welcome grant: {} points", balance.balance);

    // Promotional credit via a pattern helper
    let grant = patterns::promotion_credit("customer_1", 150, "promo_spring", "Spring promo")?;
    let balance = ledger.record_transaction(grant).await?;
    println!("After promotion: {} points", balance.balance);

    // Spend some points
    let balance = ledger
        .debit("customer_1", 200, "order", "order_1001", "")
        .await?;
    println!("After order_1001: {} points", balance.balance);

    // An overdraft is rejected and leaves no trace
    match ledger.debit("customer_1", 10_000, "order", "order_1002", "").await {
        Err(LedgerError::InsufficientBalance {
            available,
            requested,
        }) => println!("Overdraft rejected: available {}, requested {}", available, requested),
        other => println!("Unexpected outcome: {:?}", other.map(|b| b.balance)),
    }

    // Transaction history, newest first
    println!("\nHistory:");
    for txn in ledger.list_transactions("customer_1", 10, 0).await? {
        println!(
            "  {:>6} [{}] {}",
            txn.amount, txn.reference_type, txn.description
        );
    }

    // The ledger invariant: balance == sum of transactions
    let report = ledger.verify_account("customer_1").await?;
    println!(
        "\nIntegrity: balance {} == transaction sum {} -> {}",
        report.balance, report.transaction_sum, report.is_consistent
    );

    Ok(())
}
