//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the rental
//! ledger. These fixtures are designed to be consistent and predictable
//! for unit tests: the canonical tenant rents for RM 10,000 a month and
//! is billed on the first of January 2024.

use chrono::NaiveDate;
use core_kernel::{Currency, DateRange, Money, TenantId};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The canonical monthly rent
    pub fn monthly_rent() -> Money {
        Money::new(dec!(10000.00), Currency::MYR)
    }

    /// Full-rate SST on the canonical rent (8% of 10,000)
    pub fn full_sst() -> Money {
        Money::new(dec!(800.00), Currency::MYR)
    }

    /// A small late fee
    pub fn late_fee() -> Money {
        Money::new(dec!(50.00), Currency::MYR)
    }

    /// A zero MYR amount
    pub fn myr_zero() -> Money {
        Money::zero(Currency::MYR)
    }

    /// An SGD amount for currency mismatch tests
    pub fn sgd_100() -> Money {
        Money::new(dec!(100.00), Currency::SGD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Canonical invoice issue date (Jan 1, 2024)
    pub fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Canonical due date two weeks after issue
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
    }

    /// The canonical billing period (all of January 2024)
    pub fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    /// The canonical mid-month exemption period (Jan 10-20)
    pub fn mid_january_exemption() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        )
        .unwrap()
    }

    /// Tax commencement well before any fixture invoice
    pub fn commencement() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// A random but plausible tenant trading name
    pub fn tenant_name() -> String {
        CompanyName().fake()
    }

    /// A cheque-style payment reference
    pub fn payment_reference() -> String {
        "CHQ-1042".to_string()
    }

    /// An exemption letter reference
    pub fn exemption_letter() -> String {
        "MOF-SST-2024-0117".to_string()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A fresh tenant id
    pub fn tenant_id() -> TenantId {
        TenantId::new()
    }

    /// The nil-UUID tenant, for tests that need a stable id
    pub fn nil_tenant() -> TenantId {
        TenantId::from_uuid(uuid::Uuid::nil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sst_is_eight_percent_of_rent() {
        let expected = MoneyFixtures::monthly_rent().multiply(dec!(0.08));
        assert_eq!(MoneyFixtures::full_sst(), expected.round_half_up());
    }

    #[test]
    fn test_exemption_sits_inside_billing_period() {
        let period = TemporalFixtures::january();
        let exemption = TemporalFixtures::mid_january_exemption();
        assert!(period.overlaps(&exemption));
        assert_eq!(exemption.days(), 11);
    }
}
