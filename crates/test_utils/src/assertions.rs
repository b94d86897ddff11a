//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::UnsettledCharge;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that the unsettled set totals the expected amount
///
/// # Panics
///
/// Panics when the sum of unsettled amounts differs from `expected`, or
/// when the set mixes currencies.
pub fn assert_unsettled_total(unsettled: &[UnsettledCharge], expected: &Money) {
    let mut total = Money::zero(expected.currency());
    for item in unsettled {
        total = total
            .checked_add(&item.unsettled_amount)
            .expect("unsettled set should be single-currency");
    }
    assert_eq!(
        &total, expected,
        "Unsettled total mismatch: got {}, expected {} across {} charges",
        total,
        expected,
        unsettled.len()
    );
}
