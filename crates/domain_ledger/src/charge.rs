//! Charge records
//!
//! A charge is a single billable line item owed by a tenant. Charges are
//! immutable once posted; corrections are new credit charges, never
//! edits. The invoice reference groups related charges for display and
//! reconciliation, but allocation always operates on individual charges.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ChargeId, InvoiceId, Money, TenantId};
use crate::error::LedgerError;

/// The closed set of charge categories
///
/// The category determines the settlement priority in the waterfall and
/// the sign convention of the amount: credits are negative, everything
/// else is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    /// Monthly rent
    Rent,
    /// Penalty interest on overdue rent
    LateFee,
    /// Service tax (SST)
    Tax,
    /// Re-billed tenant cost (repairs, utilities)
    Chargeback,
    /// Negative correction reducing the outstanding balance
    Credit,
    /// Anything else
    Other,
}

impl ChargeCategory {
    /// Settlement priority in the payment waterfall (lower settles first)
    ///
    /// Penalty interest and base rent are cleared before discretionary
    /// charge-backs; this ordering is business policy, not an
    /// implementation detail.
    pub fn settlement_priority(&self) -> u8 {
        match self {
            ChargeCategory::LateFee => 1,
            ChargeCategory::Rent => 2,
            _ => 3,
        }
    }

    /// Returns true if the category carries a negative amount
    pub fn is_credit(&self) -> bool {
        matches!(self, ChargeCategory::Credit)
    }
}

/// A single billable line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    /// Unique identifier
    pub id: ChargeId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Parent invoice (grouping only; allocation operates on charges)
    pub invoice_id: InvoiceId,
    /// Category
    pub category: ChargeCategory,
    /// Signed amount; credits are negative
    pub amount: Money,
    /// Date the parent invoice was issued
    pub issue_date: NaiveDate,
    /// Date payment falls due
    pub due_date: NaiveDate,
    /// Human-readable description
    pub description: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Charge {
    /// Creates a new charge, enforcing the category sign convention
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AmountSignMismatch` when a credit carries a
    /// non-negative amount or any other category carries a negative one.
    pub fn new(
        tenant_id: TenantId,
        invoice_id: InvoiceId,
        category: ChargeCategory,
        amount: Money,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        let sign_ok = if category.is_credit() {
            amount.is_negative()
        } else {
            !amount.is_negative()
        };
        if !sign_ok {
            return Err(LedgerError::AmountSignMismatch {
                category: format!("{:?}", category),
                amount: amount.amount(),
            });
        }

        Ok(Self {
            id: ChargeId::new_v7(),
            tenant_id,
            invoice_id,
            category,
            amount,
            issue_date,
            due_date,
            description: None,
            created_at: Utc::now(),
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_settlement_priority_ordering() {
        assert!(ChargeCategory::LateFee.settlement_priority() < ChargeCategory::Rent.settlement_priority());
        assert!(ChargeCategory::Rent.settlement_priority() < ChargeCategory::Tax.settlement_priority());
        assert_eq!(
            ChargeCategory::Chargeback.settlement_priority(),
            ChargeCategory::Credit.settlement_priority()
        );
    }

    #[test]
    fn test_charge_rejects_negative_rent() {
        let result = Charge::new(
            TenantId::new(),
            InvoiceId::new(),
            ChargeCategory::Rent,
            Money::new(dec!(-100), Currency::MYR),
            d(2024, 1, 1),
            d(2024, 1, 1),
        );
        assert!(matches!(result, Err(LedgerError::AmountSignMismatch { .. })));
    }

    #[test]
    fn test_charge_rejects_positive_credit() {
        let result = Charge::new(
            TenantId::new(),
            InvoiceId::new(),
            ChargeCategory::Credit,
            Money::new(dec!(100), Currency::MYR),
            d(2024, 1, 1),
            d(2024, 1, 1),
        );
        assert!(matches!(result, Err(LedgerError::AmountSignMismatch { .. })));
    }

    #[test]
    fn test_charge_accepts_negative_credit() {
        let charge = Charge::new(
            TenantId::new(),
            InvoiceId::new(),
            ChargeCategory::Credit,
            Money::new(dec!(-283.87), Currency::MYR),
            d(2024, 2, 1),
            d(2024, 2, 1),
        )
        .unwrap()
        .with_description("SST refund");

        assert!(charge.amount.is_negative());
        assert_eq!(charge.description.as_deref(), Some("SST refund"));
    }
}
