//! Aging buckets for unsettled charges
//!
//! Every caller that needs "what is overdue and by how much" goes
//! through `age_unsettled`; ad-hoc date arithmetic against due dates is
//! not allowed elsewhere. The summary feeds the aging report and the
//! collection escalation logic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use crate::allocator::UnsettledCharge;
use crate::error::LedgerError;

/// Time-since-due classification for collections reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Not yet overdue (days overdue <= 0)
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    /// Classifies a days-overdue count into exactly one bucket
    pub fn classify(days_overdue: i64) -> Self {
        if days_overdue <= 0 {
            AgingBucket::Current
        } else if days_overdue <= 30 {
            AgingBucket::Days1To30
        } else if days_overdue <= 60 {
            AgingBucket::Days31To60
        } else if days_overdue <= 90 {
            AgingBucket::Days61To90
        } else {
            AgingBucket::Over90
        }
    }

    /// Report label
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "current",
            AgingBucket::Days1To30 => "1-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "over-90",
        }
    }
}

/// Per-bucket totals of unsettled amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingSummary {
    pub current: Money,
    pub days_1_30: Money,
    pub days_31_60: Money,
    pub days_61_90: Money,
    pub over_90: Money,
    /// Sum across all buckets
    pub total: Money,
}

impl AgingSummary {
    /// An empty summary in the given currency
    pub fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            current: zero,
            days_1_30: zero,
            days_31_60: zero,
            days_61_90: zero,
            over_90: zero,
            total: zero,
        }
    }

    /// The total for one bucket
    pub fn bucket_total(&self, bucket: AgingBucket) -> Money {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Days1To30 => self.days_1_30,
            AgingBucket::Days31To60 => self.days_31_60,
            AgingBucket::Days61To90 => self.days_61_90,
            AgingBucket::Over90 => self.over_90,
        }
    }
}

/// Buckets each unsettled amount by days overdue as of the given date
///
/// Days overdue = `as_of - due_date`. Deterministic: identical inputs
/// always produce identical totals, and each amount lands in exactly one
/// bucket.
pub fn age_unsettled(
    unsettled: &[UnsettledCharge],
    as_of: NaiveDate,
) -> Result<AgingSummary, LedgerError> {
    let currency = unsettled
        .first()
        .map(|u| u.unsettled_amount.currency())
        .unwrap_or(Currency::MYR);
    let mut summary = AgingSummary::empty(currency);

    for item in unsettled {
        let days_overdue = (as_of - item.charge.due_date).num_days();
        let amount = item.unsettled_amount;

        match AgingBucket::classify(days_overdue) {
            AgingBucket::Current => summary.current = summary.current.checked_add(&amount)?,
            AgingBucket::Days1To30 => summary.days_1_30 = summary.days_1_30.checked_add(&amount)?,
            AgingBucket::Days31To60 => {
                summary.days_31_60 = summary.days_31_60.checked_add(&amount)?
            }
            AgingBucket::Days61To90 => {
                summary.days_61_90 = summary.days_61_90.checked_add(&amount)?
            }
            AgingBucket::Over90 => summary.over_90 = summary.over_90.checked_add(&amount)?,
        }
        summary.total = summary.total.checked_add(&amount)?;
    }

    Ok(summary)
}
