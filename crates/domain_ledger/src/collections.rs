//! Collection escalation built on the aging summary
//!
//! Two escalating actions hang off the allocator's output: demand
//! letters (whose severity follows the oldest unsettled charge) and
//! pro-rated late fees on overdue rent. Both produce proposals; posting
//! the resulting charge is a separate explicit step.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, InvoiceId, Money, TenantId};
use crate::allocator::UnsettledCharge;
use crate::charge::{Charge, ChargeCategory};
use crate::error::LedgerError;

/// Annual penalty rate applied to overdue rent
pub const PENALTY_RATE: Decimal = dec!(0.08);

/// Days after the due date before a rent charge attracts a penalty
pub const GRACE_PERIOD_DAYS: u64 = 7;

/// Demand letter severity, escalating with the oldest unsettled charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterSeverity {
    Reminder,
    DemandLetter,
    FinalNotice,
}

impl LetterSeverity {
    /// Severity for the oldest unsettled charge, or None when nothing is
    /// unsettled
    pub fn for_unsettled(unsettled: &[UnsettledCharge], as_of: NaiveDate) -> Option<Self> {
        let max_days_overdue = unsettled
            .iter()
            .map(|u| (as_of - u.charge.due_date).num_days())
            .max()?;

        Some(if max_days_overdue > 90 {
            LetterSeverity::FinalNotice
        } else if max_days_overdue > 30 {
            LetterSeverity::DemandLetter
        } else {
            LetterSeverity::Reminder
        })
    }
}

/// A proposed late fee for one tenant's overdue rent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateFeeProposal {
    pub tenant_id: TenantId,
    /// Total outstanding rent subject to the penalty
    pub outstanding_rent: Money,
    /// The fee to charge, rounded half-up to cents
    pub fee_amount: Money,
    /// Invoices whose rent attracted the fee
    pub referenced_invoices: Vec<InvoiceId>,
    /// Per-item breakdown for the operator
    pub details: Vec<String>,
}

impl LateFeeProposal {
    /// Materializes the proposal as a posted late-fee charge
    ///
    /// The charge references the penalized invoices in its description so
    /// a later assessment run can detect that these invoices have
    /// already been fee'd.
    pub fn into_charge(self, posted_on: NaiveDate) -> Result<Charge, LedgerError> {
        let refs = self
            .referenced_invoices
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Charge::new(
            self.tenant_id,
            InvoiceId::new_v7(),
            ChargeCategory::LateFee,
            self.fee_amount,
            posted_on,
            posted_on,
        )
        .map(|c| c.with_description(format!("8% late fee on outstanding rent (ref: {})", refs)))
    }
}

/// Proposes a late fee for a tenant's unsettled rent charges
///
/// A rent charge attracts a penalty once the assessment date is past its
/// due date plus the 7-day grace period. The fee is pro-rated per day:
/// `outstanding x 8% p.a. x days_late / 365`, where days are counted
/// from the end of the grace period. Invoices listed in
/// `already_assessed` are skipped so re-running an assessment never
/// doubles a fee.
///
/// Returns None when no charge qualifies.
pub fn propose_late_fees(
    tenant_id: TenantId,
    unsettled: &[UnsettledCharge],
    assessment_date: NaiveDate,
    already_assessed: &HashSet<InvoiceId>,
) -> Result<Option<LateFeeProposal>, LedgerError> {
    let currency = unsettled
        .first()
        .map(|u| u.unsettled_amount.currency())
        .unwrap_or(Currency::MYR);

    let mut outstanding_rent = Money::zero(currency);
    let mut fee = Money::zero(currency);
    let mut referenced = Vec::new();
    let mut details = Vec::new();

    for item in unsettled {
        if item.charge.category != ChargeCategory::Rent {
            continue;
        }
        if already_assessed.contains(&item.charge.invoice_id) {
            continue;
        }

        let late_trigger = item.charge.due_date + Days::new(GRACE_PERIOD_DAYS);
        if assessment_date < late_trigger {
            continue;
        }

        let days_late = (assessment_date - late_trigger).num_days().max(1);
        let item_fee = item
            .unsettled_amount
            .multiply(PENALTY_RATE * Decimal::from(days_late) / dec!(365));

        outstanding_rent = outstanding_rent.checked_add(&item.unsettled_amount)?;
        fee = fee.checked_add(&item_fee)?;
        referenced.push(item.charge.invoice_id);
        details.push(format!(
            "{} due {} ({} days past grace)",
            item.unsettled_amount, item.charge.due_date, days_late
        ));
    }

    if fee.is_zero() {
        return Ok(None);
    }

    Ok(Some(LateFeeProposal {
        tenant_id,
        outstanding_rent,
        fee_amount: fee.round_half_up(),
        referenced_invoices: referenced,
        details,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn unsettled_rent(amount: Decimal, due: NaiveDate) -> UnsettledCharge {
        let charge = Charge::new(
            TenantId::from_uuid(uuid::Uuid::nil()),
            InvoiceId::new(),
            ChargeCategory::Rent,
            Money::new(amount, Currency::MYR),
            due,
            due,
        )
        .unwrap();
        UnsettledCharge {
            unsettled_amount: charge.amount,
            charge,
        }
    }

    #[test]
    fn test_severity_escalation() {
        let items = vec![unsettled_rent(dec!(1000), d(2024, 1, 1))];

        assert_eq!(
            LetterSeverity::for_unsettled(&items, d(2024, 1, 15)),
            Some(LetterSeverity::Reminder)
        );
        assert_eq!(
            LetterSeverity::for_unsettled(&items, d(2024, 2, 15)),
            Some(LetterSeverity::DemandLetter)
        );
        assert_eq!(
            LetterSeverity::for_unsettled(&items, d(2024, 6, 1)),
            Some(LetterSeverity::FinalNotice)
        );
        assert_eq!(LetterSeverity::for_unsettled(&[], d(2024, 6, 1)), None);
    }

    #[test]
    fn test_no_fee_within_grace_period() {
        let items = vec![unsettled_rent(dec!(1000), d(2024, 1, 1))];
        let proposal =
            propose_late_fees(items[0].charge.tenant_id, &items, d(2024, 1, 7), &HashSet::new())
                .unwrap();
        assert!(proposal.is_none());
    }

    #[test]
    fn test_fee_prorated_per_day() {
        // Due Jan 1, grace ends Jan 8, assessed Jan 21: 13 days late
        let items = vec![unsettled_rent(dec!(1000), d(2024, 1, 1))];
        let proposal =
            propose_late_fees(items[0].charge.tenant_id, &items, d(2024, 1, 21), &HashSet::new())
                .unwrap()
                .unwrap();

        // 1000 * 0.08 * 13/365 = 2.8493... -> 2.85
        assert_eq!(proposal.fee_amount.amount(), dec!(2.85));
        assert_eq!(proposal.outstanding_rent.amount(), dec!(1000));
        assert_eq!(proposal.referenced_invoices.len(), 1);
    }

    #[test]
    fn test_already_assessed_invoices_skipped() {
        let items = vec![unsettled_rent(dec!(1000), d(2024, 1, 1))];
        let assessed: HashSet<_> = [items[0].charge.invoice_id].into_iter().collect();

        let proposal =
            propose_late_fees(items[0].charge.tenant_id, &items, d(2024, 3, 1), &assessed).unwrap();
        assert!(proposal.is_none());
    }

    #[test]
    fn test_non_rent_charges_ignored() {
        let mut item = unsettled_rent(dec!(500), d(2024, 1, 1));
        item.charge.category = ChargeCategory::Chargeback;

        let proposal = propose_late_fees(
            item.charge.tenant_id,
            &[item],
            d(2024, 3, 1),
            &HashSet::new(),
        )
        .unwrap();
        assert!(proposal.is_none());
    }

    #[test]
    fn test_proposal_into_charge() {
        let items = vec![unsettled_rent(dec!(1000), d(2024, 1, 1))];
        let proposal =
            propose_late_fees(items[0].charge.tenant_id, &items, d(2024, 1, 21), &HashSet::new())
                .unwrap()
                .unwrap();

        let charge = proposal.into_charge(d(2024, 1, 21)).unwrap();
        assert_eq!(charge.category, ChargeCategory::LateFee);
        assert_eq!(charge.amount.amount(), dec!(2.85));
        assert!(charge.description.unwrap().contains("late fee"));
    }
}
