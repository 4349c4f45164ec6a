//! # Calendar Difference
//!
//! Human "X years, Y months, Z days" differences. Fields are subtracted
//! directly; when the day field would go negative a month is borrowed,
//! using the actual length of the borrowed month. If `from`'s day does not
//! exist in that month (Jan 31 borrowing a 29-day February) the month is
//! counted to its last day.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ensure_ordered;
use crate::errors::{CalcError, CalcResult};

/// Calendar difference between two dates.
///
/// ## JSON Example
///
/// ```json
/// { "years": 3, "months": 2, "days": 14 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateDiff {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DateDiff {
    /// Whole months, ignoring the day remainder
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Calendar difference from `from` to `to`. Requires `to >= from`.
///
/// # Example
///
/// ```rust
/// use calc_core::calendar::{diff, parse_date, DateDiff};
///
/// let birth = parse_date("1990-08-20").unwrap();
/// let today = parse_date("2024-05-04").unwrap();
/// assert_eq!(diff(birth, today).unwrap(), DateDiff { years: 33, months: 8, days: 14 });
/// ```
pub fn diff(from: NaiveDate, to: NaiveDate) -> CalcResult<DateDiff> {
    ensure_ordered(from, to, "end date")?;

    let mut months = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    if months < 0 {
        return Err(CalcError::internal(format!("negative month count between {} and {}", from, to)));
    }

    // Whole months forward from `from`; chrono clamps to the month's last day
    let anchor = from
        .checked_add_months(Months::new(months as u32))
        .ok_or_else(|| CalcError::internal(format!("{} + {} months overflowed", from, months)))?;
    let days = to.signed_duration_since(anchor).num_days();
    trace!(%from, %to, months, %anchor, days, "calendar diff");

    if days < 0 {
        return Err(CalcError::internal(format!("negative day count between {} and {}", from, to)));
    }

    Ok(DateDiff {
        years: (months / 12) as u32,
        months: (months % 12) as u32,
        days: days as u32,
    })
}

/// Age at a given date, with the extras an age calculator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeSummary {
    /// Years, months, days since birth
    pub age: DateDiff,
    /// Days since birth
    pub total_days: i64,
    /// Whole weeks since birth
    pub total_weeks: i64,
    /// Next birthday on or after `today` (Feb 29 falls on Feb 28 in common years)
    pub next_birthday: NaiveDate,
    /// Days from `today` to `next_birthday`
    pub days_until_next_birthday: i64,
}

/// `birth` plus `years`, with Feb 29 falling on Feb 28 in common years.
fn anniversary(birth: NaiveDate, years: u32) -> CalcResult<NaiveDate> {
    birth
        .checked_add_months(Months::new(years * 12))
        .ok_or_else(|| CalcError::invalid_date(birth.to_string(), "next birthday is out of range"))
}

/// Compute the age of someone born on `birth` as of `today`.
///
/// A birthday that falls on `today` always yields a whole number of years,
/// including a Feb 29 birthday observed on Feb 28.
pub fn age(birth: NaiveDate, today: NaiveDate) -> CalcResult<AgeSummary> {
    let mut age = diff(birth, today)?;
    let total_days = today.signed_duration_since(birth).num_days();

    let mut years = age.years;
    let mut next_birthday = anniversary(birth, years)?;
    if next_birthday < today {
        years += 1;
        next_birthday = anniversary(birth, years)?;
    }
    if next_birthday == today {
        age = DateDiff {
            years,
            months: 0,
            days: 0,
        };
    }

    Ok(AgeSummary {
        age,
        total_days,
        total_weeks: total_days / 7,
        next_birthday,
        days_until_next_birthday: next_birthday.signed_duration_since(today).num_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dd(years: u32, months: u32, days: u32) -> DateDiff {
        DateDiff { years, months, days }
    }

    #[test]
    fn test_leap_february_borrow() {
        assert_eq!(diff(date(2024, 1, 31), date(2024, 3, 1)).unwrap(), dd(0, 1, 1));
        assert_eq!(diff(date(2023, 1, 31), date(2023, 3, 1)).unwrap(), dd(0, 1, 1));
    }

    #[test]
    fn test_identity() {
        for d in [date(2024, 2, 29), date(1999, 12, 31), date(2000, 1, 1)] {
            assert_eq!(diff(d, d).unwrap(), DateDiff::default());
        }
    }

    #[test]
    fn test_borrow_uses_actual_month_length() {
        // Borrow from April (30 days)
        assert_eq!(diff(date(2000, 5, 15), date(2024, 5, 14)).unwrap(), dd(23, 11, 29));
        // Borrow from February in a common year
        assert_eq!(diff(date(2023, 1, 20), date(2023, 3, 5)).unwrap(), dd(0, 1, 13));
        // Borrow from February in a leap year
        assert_eq!(diff(date(2024, 1, 20), date(2024, 3, 5)).unwrap(), dd(0, 1, 14));
    }

    #[test]
    fn test_year_wrap() {
        assert_eq!(diff(date(2023, 11, 10), date(2024, 2, 5)).unwrap(), dd(0, 2, 26));
        assert_eq!(diff(date(2023, 12, 31), date(2024, 1, 1)).unwrap(), dd(0, 0, 1));
        assert_eq!(diff(date(2020, 6, 1), date(2024, 6, 1)).unwrap(), dd(4, 0, 0));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let err = diff(date(2024, 3, 1), date(2024, 1, 31)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATE");
    }

    #[test]
    fn test_diff_consistent_with_month_addition() {
        // from + years/months + days lands exactly on `to` unless the anchor clamped
        let from = date(2021, 3, 15);
        let mut to = from;
        for _ in 0..400 {
            let d = diff(from, to).unwrap();
            let anchor = from.checked_add_months(Months::new(d.total_months())).unwrap();
            assert_eq!(anchor + chrono::Days::new(d.days as u64), to);
            to = to.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_age_summary() {
        let summary = age(date(1990, 8, 20), date(2024, 5, 4)).unwrap();
        assert_eq!(summary.age, dd(33, 8, 14));
        assert_eq!(summary.next_birthday, date(2024, 8, 20));
        assert_eq!(summary.days_until_next_birthday, 108);
        assert_eq!(summary.total_days, 12311);
        assert_eq!(summary.total_weeks, 1758);
    }

    #[test]
    fn test_age_on_birthday() {
        let summary = age(date(2000, 5, 4), date(2024, 5, 4)).unwrap();
        assert_eq!(summary.age, dd(24, 0, 0));
        assert_eq!(summary.next_birthday, date(2024, 5, 4));
        assert_eq!(summary.days_until_next_birthday, 0);
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        let summary = age(date(2004, 2, 29), date(2025, 1, 10)).unwrap();
        assert_eq!(summary.next_birthday, date(2025, 2, 28));
    }

    #[test]
    fn test_leap_day_birthday_observed_on_feb_28() {
        let summary = age(date(2004, 2, 29), date(2025, 2, 28)).unwrap();
        assert_eq!(summary.next_birthday, date(2025, 2, 28));
        assert_eq!(summary.days_until_next_birthday, 0);
        assert_eq!(summary.age, dd(21, 0, 0));

        let day_before = age(date(2004, 2, 29), date(2025, 2, 27)).unwrap();
        assert_eq!(day_before.age.years, 20);
        assert_eq!(day_before.days_until_next_birthday, 1);

        let in_leap_year = age(date(2004, 2, 29), date(2024, 2, 28)).unwrap();
        assert_eq!(in_leap_year.next_birthday, date(2024, 2, 29));
        assert_eq!(in_leap_year.age.years, 19);
    }

    #[test]
    fn test_age_rejects_future_birth() {
        assert!(age(date(2030, 1, 1), date(2024, 1, 1)).is_err());
    }
}
