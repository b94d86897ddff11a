//! Tax domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PortError, TemporalError};
use domain_ledger::LedgerError;

/// Errors that can occur in the tax domain
#[derive(Debug, Error)]
pub enum TaxError {
    /// Exemption or billing period has end before start
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// Money arithmetic failed (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Posting a credit-note charge failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Store operation failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
