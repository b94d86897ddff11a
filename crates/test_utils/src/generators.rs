//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants: charges respect the category sign
//! convention, payments are non-negative, and every generated record
//! shares the MYR currency so mixed-currency failures stay a deliberate
//! test case rather than generator noise.

use chrono::{Days, NaiveDate};
use core_kernel::{Currency, Money, TenantId};
use domain_ledger::{Charge, ChargeCategory, Payment};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::IdFixtures;

/// Strategy for generating non-credit charge categories
pub fn debit_category_strategy() -> impl Strategy<Value = ChargeCategory> {
    prop_oneof![
        Just(ChargeCategory::Rent),
        Just(ChargeCategory::LateFee),
        Just(ChargeCategory::Tax),
        Just(ChargeCategory::Chargeback),
        Just(ChargeCategory::Other),
    ]
}

/// Strategy for positive amounts in minor units (one cent to RM 100k)
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for positive MYR Money values
pub fn myr_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::MYR))
}

/// Strategy for business dates across 2024
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..365).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

/// Strategy for well-formed debit charges for the nil tenant
pub fn charge_strategy() -> impl Strategy<Value = Charge> {
    (debit_category_strategy(), myr_money_strategy(), date_strategy()).prop_map(
        |(category, amount, due)| {
            Charge::new(
                IdFixtures::nil_tenant(),
                core_kernel::InvoiceId::new(),
                category,
                amount,
                due.checked_sub_days(Days::new(14)).unwrap_or(due),
                due,
            )
            .expect("generated charge respects the sign convention")
        },
    )
}

/// Strategy for sets of charges sharing one tenant
pub fn charge_set_strategy(max: usize) -> impl Strategy<Value = Vec<Charge>> {
    proptest::collection::vec(charge_strategy(), 0..=max)
}

/// Strategy for well-formed payments for the nil tenant
pub fn payment_strategy() -> impl Strategy<Value = Payment> {
    (myr_money_strategy(), date_strategy()).prop_map(|(amount, received)| {
        Payment::new(IdFixtures::nil_tenant(), amount, received)
            .expect("generated payment is non-negative")
    })
}

/// Strategy for sets of payments sharing one tenant
pub fn payment_set_strategy(max: usize) -> impl Strategy<Value = Vec<Payment>> {
    proptest::collection::vec(payment_strategy(), 0..=max)
}

/// Strategy for proration fractions in [0, 1] with 4 decimal places
pub fn fraction_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// Strategy for a tenant id (fresh per case)
pub fn tenant_strategy() -> impl Strategy<Value = TenantId> {
    any::<u128>().prop_map(|bits| TenantId::from_uuid(uuid::Uuid::from_u128(bits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_charges_are_well_formed(charge in charge_strategy()) {
            prop_assert!(!charge.amount.is_negative());
            prop_assert!(charge.issue_date <= charge.due_date);
        }

        #[test]
        fn generated_payments_are_non_negative(payment in payment_strategy()) {
            prop_assert!(!payment.amount.is_negative());
        }
    }
}
