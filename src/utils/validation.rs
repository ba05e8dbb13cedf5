//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i64) -> LedgerResult<()> {
    if amount <= 0 {
        Err(LedgerError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that an account ID is valid
pub fn validate_account_id(account_id: &str) -> LedgerResult<()> {
    if account_id.trim().is_empty() {
        return Err(LedgerError::Validation(
            "account ID cannot be empty".to_string(),
        ));
    }

    if account_id.len() > 64 {
        return Err(LedgerError::Validation(
            "account ID cannot exceed 64 characters".to_string(),
        ));
    }

    // Alphanumeric plus dashes and underscores
    if !account_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "account ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that a transaction description fits storage limits
pub fn validate_description(description: &str) -> LedgerResult<()> {
    if description.len() > 500 {
        return Err(LedgerError::Validation(
            "description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced transaction validator with detailed field checks
pub struct EnhancedTransactionValidator;

impl TransactionValidator for EnhancedTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        // Basic rules first
        DefaultTransactionValidator.validate_transaction(transaction)?;

        validate_account_id(&transaction.account_id)?;
        validate_description(&transaction.description)?;

        if transaction.reference_type.len() > 64 {
            return Err(LedgerError::Validation(
                "reference type cannot exceed 64 characters".to_string(),
            ));
        }

        Ok(())
    }
}
