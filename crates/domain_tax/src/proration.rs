//! SST computation with fractional-day proration
//!
//! The billed tax and any later recomputation must agree to the cent, so
//! every step stays in decimal arithmetic and the single rounding point
//! is a half-up round to two places at the end.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{DateRange, Money};

use crate::exemption::{ExemptionInterval, TaxProfile};

/// Service tax rate: 8%
pub const SST_RATE: Decimal = dec!(0.08);

/// Fraction of a billing period that is taxable, in `[0, 1]`
///
/// A day is exempt when any interval covers it; overlapping intervals
/// never double-subtract (union semantics). Day-by-day iteration is fine
/// here: periods are at most a month and exemption sets are small.
/// An empty or inverted period yields zero.
pub fn taxable_fraction(period: &DateRange, exemptions: &[ExemptionInterval]) -> Decimal {
    let total_days = period.days();
    if total_days <= 0 {
        return Decimal::ZERO;
    }

    let taxable_days = period
        .iter_days()
        .filter(|day| !exemptions.iter().any(|e| e.covers(*day)))
        .count() as i64;

    Decimal::from(taxable_days) / Decimal::from(total_days)
}

/// The SST due on a base amount for an invoice
///
/// Returns zero when the tenant has no commencement date (the tax regime
/// is not active for them). With a billing period supplied, the tax is
/// `base x taxable_fraction x 8%`, rounded half-up to cents. Without a
/// period the check is binary: tax applies in full when the invoice date
/// is on or after commencement and not inside any exemption interval.
///
/// The commencement check and the exemption check are independent: an
/// exemption never unsets the commencement requirement, and vice versa.
pub fn tax_due(
    profile: &TaxProfile,
    base_amount: Money,
    invoice_date: NaiveDate,
    period: Option<&DateRange>,
) -> Money {
    let zero = Money::zero(base_amount.currency());

    let Some(commencement) = profile.commencement_date else {
        return zero;
    };

    if let Some(period) = period {
        let fraction = taxable_fraction(period, &profile.exemptions);
        return base_amount.multiply(fraction * SST_RATE).round_half_up();
    }

    // Fallback path: binary test on the invoice date alone
    if invoice_date >= commencement && !profile.is_exempt_on(invoice_date) {
        return base_amount.multiply(SST_RATE).round_half_up();
    }

    zero
}
