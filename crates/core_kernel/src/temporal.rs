//! Date-range handling for billing periods and exemption intervals
//!
//! All business dates in the rental ledger are timezone-free calendar
//! dates. A `DateRange` is a closed interval: both endpoints are part of
//! the range, so a one-day range has `days() == 1`.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// A closed date interval `[start, end]`
///
/// Used for invoice billing periods and tax exemption intervals. Both
/// endpoints are inclusive, matching the convention of the proration
/// logic: an exemption covering Jan 10-20 exempts eleven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the range (inclusive)
    pub start: NaiveDate,
    /// End of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range, rejecting inverted endpoints
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a single-day range
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// The calendar month containing `issue_date`, anchored at the issue
    /// date itself
    ///
    /// Invoices represent exactly one calendar month starting on the
    /// issue date, so the billing period runs from the issue date to the
    /// last day of that month. Uses the actual month length, so February
    /// periods are 28 or 29 days long.
    pub fn calendar_month_of(issue_date: NaiveDate) -> Self {
        let end = last_day_of_month(issue_date.year(), issue_date.month());
        Self {
            start: issue_date,
            end,
        }
    }

    /// Returns true if the range contains the given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the range, counting both endpoints
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The intersection with another range, if any
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start > end {
            None
        } else {
            Some(DateRange { start, end })
        }
    }

    /// Returns true if the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.intersect(other).is_some()
    }

    /// Iterates over every day in the range
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Widens the range backwards by the given number of days
    ///
    /// Used for the coarse candidate search window in exemption
    /// reconciliation, which is deliberately over-inclusive.
    pub fn widen_start(&self, days: u64) -> Self {
        Self {
            start: self
                .start
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN),
            end: self.end,
        }
    }
}

/// Returns the last day of the given calendar month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // First of the following month always exists
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always valid")
        .pred_opt()
        .expect("month start has a predecessor")
}
