//! # Dust Core
//!
//! A points-style value ledger: it tracks a per-account integer balance
//! ("dust"), records every mutation as an immutable transaction, and
//! enforces that the balance always equals the sum of its transactions.
//!
//! ## Features
//!
//! - **Atomic credit/debit**: the sufficiency check and the write form one
//!   atomic unit per account, so concurrent debits can never overdraw
//! - **Immutable transaction log**: append-only entries with reference
//!   tags, the source of truth for every balance
//! - **Lazy balances**: accounts materialize with a zero balance on first
//!   access through an explicit get-or-create
//! - **Product gating**: per-product points-only flags and points prices
//!   for checkout workflows
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage; an in-memory backend ships for tests and development
//!
//! ## Quick Start
//!
//! ```rust
//! use dust_core::{Ledger, LedgerResult, MemoryStorage};
//!
//! async fn grant_points() -> LedgerResult<()> {
//!     let ledger = Ledger::new(MemoryStorage::new());
//!
//!     let balance = ledger
//!         .credit("customer_1", 100, "admin_adjustment", "", "")
//!         .await?;
//!     assert_eq!(balance.balance, 100);
//!     Ok(())
//! }
//! ```

pub mod checkout;
pub mod gate;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use checkout::*;
pub use gate::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;

// Re-export transaction patterns for convenience
pub use ledger::transaction::patterns;
