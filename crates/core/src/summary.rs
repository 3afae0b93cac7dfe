//! Per-student hour totals relative to a reference date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::activity::ActivityRecord;

/// Approved hours all-time, in the reference year, and in the reference month.
///
/// Always satisfies `monthly <= yearly <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: f64,
    pub yearly: f64,
    pub monthly: f64,
}

/// Reduce a student's records to a [`Summary`] as of `today`.
///
/// Records that are not approved are ignored entirely. Malformed hours
/// contribute zero.
pub fn compute_summary(records: &[ActivityRecord], today: NaiveDate) -> Summary {
    let mut summary = Summary::default();

    for record in records.iter().filter(|r| r.is_approved()) {
        let hours = record.counted_hours();
        summary.total += hours;

        if record.date.year() == today.year() {
            summary.yearly += hours;
            if record.date.month() == today.month() {
                summary.monthly += hours;
            }
        }
    }

    summary
}

/// Sum of approved hours over any set of records.
pub fn approved_hours<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    records
        .into_iter()
        .filter(|r| r.is_approved())
        .map(ActivityRecord::counted_hours)
        .sum()
}
