//! Core types and data structures for the points ledger

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit - increases the account balance
    Credit,
    /// Debit - decreases the account balance
    Debit,
}

impl TransactionKind {
    /// Returns the sign the stored amount must carry for this kind
    pub fn sign(&self) -> i64 {
        match self {
            TransactionKind::Credit => 1,
            TransactionKind::Debit => -1,
        }
    }
}

/// Per-account running balance
///
/// Derived state: at all times `balance` equals the sum of the amounts of
/// every committed transaction for the account. Owned by the ledger;
/// callers never mutate it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Account the balance belongs to
    pub account_id: String,
    /// Current balance in points; never negative
    pub balance: i64,
    /// When the balance row was created
    pub created_at: NaiveDateTime,
    /// When the balance was last updated
    pub updated_at: NaiveDateTime,
}

impl Balance {
    /// Create a fresh zero balance for an account
    pub fn new(account_id: String) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            account_id,
            balance: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Immutable ledger entry
///
/// Amounts follow the sign convention of the kind: credits are stored
/// positive, debits negative, so the sum of all amounts for an account is
/// its balance. Transactions are append-only and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Account the transaction applies to
    pub account_id: String,
    /// Signed amount: positive for credits, negative for debits
    pub amount: i64,
    /// Kind of transaction (Credit or Debit)
    pub kind: TransactionKind,
    /// Tag describing what caused the transaction (e.g. "order",
    /// "promotion", "admin_adjustment")
    pub reference_type: String,
    /// Identifier of the related entity (order id, promotion id, ...)
    pub reference_id: String,
    /// Human-readable description
    pub description: String,
    /// When the transaction was created
    pub created_at: NaiveDateTime,
}

impl Transaction {
    fn build(
        account_id: String,
        amount: i64,
        kind: TransactionKind,
        reference_type: String,
        reference_id: String,
        description: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id,
            amount,
            kind,
            reference_type,
            reference_id,
            description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Create a credit transaction from a positive amount
    ///
    /// An empty description is replaced with a default one.
    pub fn credit(
        account_id: String,
        amount: i64,
        reference_type: String,
        reference_id: String,
        description: String,
    ) -> LedgerResult<Self> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "credit amount must be positive, got {}",
                amount
            )));
        }
        let description = if description.trim().is_empty() {
            format!("Credited {} dust", amount)
        } else {
            description
        };
        Ok(Self::build(
            account_id,
            amount,
            TransactionKind::Credit,
            reference_type,
            reference_id,
            description,
        ))
    }

    /// Create a debit transaction from a positive amount
    ///
    /// The stored amount is negated. An empty description is replaced with
    /// a default one.
    pub fn debit(
        account_id: String,
        amount: i64,
        reference_type: String,
        reference_id: String,
        description: String,
    ) -> LedgerResult<Self> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "debit amount must be positive, got {}",
                amount
            )));
        }
        let description = if description.trim().is_empty() {
            format!("Debited {} dust", amount)
        } else {
            description
        };
        Ok(Self::build(
            account_id,
            -amount,
            TransactionKind::Debit,
            reference_type,
            reference_id,
            description,
        ))
    }

    /// The positive magnitude of the transaction amount
    pub fn magnitude(&self) -> i64 {
        self.amount.abs()
    }
}

/// Points-purchase settings for a product
///
/// When `points_only` is set the product can only be bought with points,
/// at `points_price`. Upserted by admin action; last writer wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGate {
    /// Product the gate applies to
    pub product_id: String,
    /// Whether the product must be purchased with points
    pub points_only: bool,
    /// Points price; required and positive when `points_only` is set
    pub points_price: Option<i64>,
    /// When the gate was first created
    pub created_at: NaiveDateTime,
    /// When the gate was last updated
    pub updated_at: NaiveDateTime,
}

impl ProductGate {
    /// Create a new product gate entry
    ///
    /// Fails with [`LedgerError::InvalidAmount`] if `points_only` is set
    /// without a positive `points_price`.
    pub fn new(
        product_id: String,
        points_only: bool,
        points_price: Option<i64>,
    ) -> LedgerResult<Self> {
        if points_only && !points_price.is_some_and(|p| p > 0) {
            return Err(LedgerError::InvalidAmount(
                "points-only products require a positive points price".to_string(),
            ));
        }
        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            product_id,
            points_only,
            points_price,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: i64, requested: i64 },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_stores_positive_amount() {
        let txn = Transaction::credit(
            "c1".to_string(),
            100,
            "admin_adjustment".to_string(),
            String::new(),
            String::new(),
        )
        .unwrap();
        assert_eq!(txn.amount, 100);
        assert_eq!(txn.kind, TransactionKind::Credit);
        assert_eq!(txn.description, "Credited 100 dust");
    }

    #[test]
    fn debit_stores_negative_amount() {
        let txn = Transaction::debit(
            "c1".to_string(),
            40,
            "order".to_string(),
            "order_1".to_string(),
            "Points spent".to_string(),
        )
        .unwrap();
        assert_eq!(txn.amount, -40);
        assert_eq!(txn.kind, TransactionKind::Debit);
        assert_eq!(txn.magnitude(), 40);
        assert_eq!(txn.description, "Points spent");
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(matches!(
            Transaction::credit(
                "c1".to_string(),
                0,
                String::new(),
                String::new(),
                String::new()
            ),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            Transaction::debit(
                "c1".to_string(),
                -5,
                String::new(),
                String::new(),
                String::new()
            ),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn transaction_kind_serializes_lowercase() {
        let txn = Transaction::debit(
            "c1".to_string(),
            40,
            "order".to_string(),
            "order_1".to_string(),
            String::new(),
        )
        .unwrap();

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["kind"], "debit");
        assert_eq!(json["amount"], -40);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn points_only_gate_requires_positive_price() {
        assert!(ProductGate::new("p1".to_string(), true, None).is_err());
        assert!(ProductGate::new("p1".to_string(), true, Some(0)).is_err());
        assert!(ProductGate::new("p1".to_string(), true, Some(150)).is_ok());
        assert!(ProductGate::new("p1".to_string(), false, None).is_ok());
    }
}
