//! Retroactive exemption reconciliation
//!
//! When an exemption is registered after invoices have already been
//! issued, the tax on those invoices was computed without it. The
//! reconciler walks the historical ledger, recomputes what each
//! invoice's tax should have been under the updated profile, and emits
//! credit notes for any overcharge. Original charges are never mutated;
//! the correction is an append of negative `Credit` charges.
//!
//! Candidate selection is two-phase. A coarse pass keeps invoices whose
//! issue date falls inside the exemption window widened backwards by 31
//! days, which over-includes on purpose: an invoice issued shortly
//! before an exemption starts can still have a billing period reaching
//! into it. A precise pass then drops any invoice whose derived billing
//! period does not actually overlap the exemption.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{CreditNoteId, DateRange, InvoiceId, Money, TenantId};
use domain_ledger::{Charge, ChargeCategory};

use crate::error::TaxError;
use crate::exemption::{ExemptionInterval, TaxProfile};
use crate::proration::tax_due;

/// Widening applied to the coarse candidate window, in days
///
/// One month plus a day: no billing period is longer than a calendar
/// month, so an invoice issued more than 31 days before the exemption
/// starts cannot overlap it.
pub const CANDIDATE_WINDOW_DAYS: u64 = 31;

/// Minimum overcharge worth a credit note
///
/// Deltas at or below this are rounding noise from proration and are
/// deliberately not refunded.
pub const CREDIT_THRESHOLD: Decimal = dec!(0.05);

/// A compensating adjustment against an overcharged invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditNote {
    /// Unique identifier
    pub id: CreditNoteId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// The invoice whose tax was overcharged
    pub original_invoice: InvoiceId,
    /// The refund amount (always negative)
    pub amount: Money,
    /// Where the billing period and the exemption overlapped
    pub overlap: DateRange,
    /// Date the credit note was issued
    pub issued_on: NaiveDate,
    /// Human-readable explanation
    pub description: String,
}

impl CreditNote {
    /// Converts the credit note into a ledger charge for posting
    ///
    /// The resulting charge is due immediately: a credit is not a
    /// liability, so its due date is its issue date.
    pub fn into_charge(self) -> Result<Charge, TaxError> {
        let charge = Charge::new(
            self.tenant_id,
            self.original_invoice,
            ChargeCategory::Credit,
            self.amount,
            self.issued_on,
            self.issued_on,
        )?
        .with_description(self.description);
        Ok(charge)
    }
}

/// The result of reconciling one exemption against the ledger
#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    /// Credit notes produced, one per overcharged invoice
    pub credit_notes: Vec<CreditNote>,
    /// Sum of all credit amounts (negative or zero)
    pub total_credited: Money,
    /// Number of invoices that passed the coarse candidate window
    pub invoices_scanned: usize,
}

impl ReconciliationOutcome {
    fn empty(currency: core_kernel::Currency) -> Self {
        Self {
            credit_notes: Vec::new(),
            total_credited: Money::zero(currency),
            invoices_scanned: 0,
        }
    }
}

/// Recomputes tax on historical invoices affected by a new exemption
///
/// `profile` must already contain `exemption`; the recomputation runs
/// against the full updated exemption set, so stacking a second
/// exemption on an already-reconciled invoice only credits the
/// incremental difference.
///
/// The function is pure: it reads a charge snapshot and returns the
/// credit notes to post. Persisting them is the caller's job, which
/// keeps the read-compute-append sequence explicit at the service layer.
pub fn reconcile_exemption(
    profile: &TaxProfile,
    exemption: &ExemptionInterval,
    charges: &[Charge],
) -> Result<ReconciliationOutcome, TaxError> {
    let issued_on = exemption.created_at.date_naive();
    let window = exemption.period.widen_start(CANDIDATE_WINDOW_DAYS);

    let currency = charges
        .first()
        .map(|c| c.amount.currency())
        .unwrap_or(core_kernel::Currency::MYR);

    let mut by_invoice: HashMap<InvoiceId, Vec<&Charge>> = HashMap::new();
    for charge in charges {
        by_invoice.entry(charge.invoice_id).or_default().push(charge);
    }

    // The billing period is anchored at the invoice's issue date, taken
    // from the original lines: later credit notes carry their own issue
    // date and must not shift the anchor, and the snapshot's ordering
    // is the store's business, not ours.
    let mut candidates: Vec<(NaiveDate, InvoiceId, Vec<&Charge>)> = by_invoice
        .into_iter()
        .filter_map(|(invoice_id, lines)| {
            billing_anchor(&lines).map(|anchor| (anchor, invoice_id, lines))
        })
        .filter(|(anchor, _, _)| window.contains(*anchor))
        .collect();
    // Deterministic output order regardless of snapshot order
    candidates.sort_by_key(|(anchor, _, _)| *anchor);

    let mut outcome = ReconciliationOutcome::empty(currency);

    for (issue_date, invoice_id, lines) in candidates {
        outcome.invoices_scanned += 1;
        let period = DateRange::calendar_month_of(issue_date);

        if !period.overlaps(&exemption.period) {
            debug!(invoice = %invoice_id, "billing period misses exemption, skipping");
            continue;
        }

        let tax_lines = sum_category(&lines, ChargeCategory::Tax, currency)?;
        if tax_lines.is_zero() {
            debug!(invoice = %invoice_id, "no tax was charged, nothing to credit");
            continue;
        }

        // Prior credit notes on this invoice already refunded part of
        // the tax; netting them in keeps a second exemption from
        // re-crediting what the first one covered.
        let prior_credits = sum_category(&lines, ChargeCategory::Credit, currency)?;
        let charged_tax = tax_lines.checked_add(&prior_credits)?;

        let rent_base = sum_category(&lines, ChargeCategory::Rent, currency)?;
        if rent_base.is_zero() {
            warn!(
                invoice = %invoice_id,
                "tax charged without a rent base, skipping"
            );
            continue;
        }

        let recomputed = tax_due(profile, rent_base, issue_date, Some(&period));
        let delta = charged_tax.checked_sub(&recomputed)?;

        if delta.amount() <= CREDIT_THRESHOLD {
            debug!(invoice = %invoice_id, delta = %delta, "delta within tolerance");
            continue;
        }

        // Unwrap is safe: period and exemption overlap was checked above
        let overlap = period
            .intersect(&exemption.period)
            .expect("overlap verified before intersection");

        let note = CreditNote {
            id: CreditNoteId::new_v7(),
            tenant_id: exemption.tenant_id,
            original_invoice: invoice_id,
            amount: -delta,
            overlap,
            issued_on,
            description: format!(
                "SST adjustment for exemption {} to {}",
                overlap.start, overlap.end
            ),
        };

        outcome.total_credited = outcome.total_credited.checked_add(&note.amount)?;
        outcome.credit_notes.push(note);
    }

    Ok(outcome)
}

/// The earliest issue date among an invoice's original (non-credit)
/// lines, or None for a group holding only credit notes
fn billing_anchor(lines: &[&Charge]) -> Option<NaiveDate> {
    lines
        .iter()
        .filter(|c| !c.category.is_credit())
        .map(|c| c.issue_date)
        .min()
}

fn sum_category(
    lines: &[&Charge],
    category: ChargeCategory,
    currency: core_kernel::Currency,
) -> Result<Money, TaxError> {
    let mut total = Money::zero(currency);
    for line in lines.iter().filter(|c| c.category == category) {
        total = total.checked_add(&line.amount)?;
    }
    Ok(total)
}
