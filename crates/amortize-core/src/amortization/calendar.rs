//! Whole-calendar-month arithmetic. Billing dates are always the first of a month.

use chrono::{Datelike, NaiveDate};

use crate::error::AmortizeError;
use crate::AmortizeResult;

/// The first day of the calendar month following `date`.
///
/// December rolls over to January of the next year. The day of `date` is ignored.
pub fn next_month(date: NaiveDate) -> AmortizeResult<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| AmortizeError::date_out_of_range(date))
}

/// Whole months from `from` to `to`, counting year and month only.
///
/// Negative when `to` lies in an earlier month; zero for the same month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + (i64::from(to.month()) - i64::from(from.month()))
}

/// True when both dates fall in the same calendar month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
