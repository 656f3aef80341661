//! Recurrence expansion over the working-date calendar.
//!
//! Recurrence is defined relative to the externally supplied working-date
//! set, not the raw calendar: a task whose start date is not a working date
//! never recurs, and weekly recurrence strides over working-date positions
//! rather than 7-calendar-day gaps. Both are firm policy.

use chrono::{Months, NaiveDate};

use crate::task::Frequency;

/// Expands a task into the concrete dates it occurs on.
///
/// The start date is located in `working_dates` by day equality (first
/// match wins); when absent, every frequency yields no occurrences.
#[must_use]
pub fn occurrences(
    start_date: NaiveDate,
    working_dates: &[NaiveDate],
    frequency: Frequency,
) -> Vec<NaiveDate> {
    let Some(start) = working_dates.iter().position(|wd| *wd == start_date) else {
        return Vec::new();
    };

    match frequency {
        Frequency::Daily => working_dates[start..].to_vec(),
        Frequency::Weekly => working_dates[start..].iter().copied().step_by(7).collect(),
        Frequency::Monthly => monthly(start_date, working_dates),
        Frequency::OneTime => vec![working_dates[start]],
    }
}

/// Monthly expansion: advance one calendar month at a time from the start
/// date (clamped at short month ends) and keep each date that is a member
/// of the working-date set, until the cursor passes the last working date.
fn monthly(start_date: NaiveDate, working_dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let Some(last) = working_dates.last().copied() else {
        return dates;
    };
    let mut cursor = start_date;
    while cursor <= last {
        if working_dates.contains(&cursor) {
            dates.push(cursor);
        }
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    dates
}
