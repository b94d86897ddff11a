//! Payment records
//!
//! A payment is a receipt of funds against a tenant's total balance. It
//! may carry an informational invoice reference, but that reference
//! never constrains allocation order: the waterfall decides which
//! charges the money settles. Payments are immutable after creation;
//! deleting one is allowed and must trigger a re-allocation by the
//! caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, Money, PaymentId, TenantId};
use crate::error::LedgerError;

/// A receipt of funds for a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Amount received (always positive)
    pub amount: Money,
    /// Date the funds were received
    pub date_received: NaiveDate,
    /// Informational invoice reference (does not constrain allocation)
    pub invoice_ref: Option<InvoiceId>,
    /// External reference (cheque number, transfer id)
    pub reference: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NegativePayment` for negative amounts;
    /// malformed receipts are rejected before they can reach the
    /// allocator.
    pub fn new(
        tenant_id: TenantId,
        amount: Money,
        date_received: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativePayment(amount.amount()));
        }

        Ok(Self {
            id: PaymentId::new_v7(),
            tenant_id,
            amount,
            date_received,
            invoice_ref: None,
            reference: None,
            created_at: Utc::now(),
        })
    }

    /// Sets the informational invoice reference
    pub fn with_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_ref = Some(invoice_id);
        self
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_new() {
        let payment = Payment::new(
            TenantId::new(),
            Money::new(dec!(600), Currency::MYR),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap()
        .with_reference("CHQ-1042");

        assert_eq!(payment.amount.amount(), dec!(600));
        assert_eq!(payment.reference.as_deref(), Some("CHQ-1042"));
        assert!(payment.invoice_ref.is_none());
    }

    #[test]
    fn test_payment_rejects_negative_amount() {
        let result = Payment::new(
            TenantId::new(),
            Money::new(dec!(-1), Currency::MYR),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        );
        assert!(matches!(result, Err(LedgerError::NegativePayment(_))));
    }
}
