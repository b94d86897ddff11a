//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Charge amount sign does not match its category convention
    #[error("Amount sign mismatch: {category} charge cannot have amount {amount}")]
    AmountSignMismatch {
        category: String,
        amount: Decimal,
    },

    /// Payment amount is negative
    #[error("Negative payment amount: {0}")]
    NegativePayment(Decimal),

    /// Money arithmetic failed (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
