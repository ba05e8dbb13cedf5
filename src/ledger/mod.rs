//! Ledger module containing balance management and transaction processing

pub mod balance;
pub mod core;
pub mod transaction;

pub use balance::*;
pub use core::*;
pub use transaction::*;
