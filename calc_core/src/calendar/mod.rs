//! # Calendar Arithmetic
//!
//! Calendar-accurate date differences and cycle-based date projections.
//! All functions take the "current date" as an explicit argument; nothing
//! here reads the system clock.
//!
//! - [`diff`] - `{years, months, days}` between two dates, plus age summaries
//! - [`cycle`] - recurring, fixed-offset, and gestation projections
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calendar::{diff, parse_date, DateDiff};
//!
//! let from = parse_date("2024-01-31").unwrap();
//! let to = parse_date("2024-03-01").unwrap();
//! assert_eq!(diff(from, to).unwrap(), DateDiff { years: 0, months: 1, days: 1 });
//! ```

pub mod cycle;
pub mod diff;

pub use cycle::{
    due_date, gestational_age, next_periods, ovulation, CycleProjection, FertilityWindow,
    GestationalAge, Occurrences, Pregnancy,
};
pub use diff::{age, diff, AgeSummary, DateDiff};

use chrono::{Days, Months, NaiveDate};

use crate::errors::{CalcError, CalcResult};

/// Date format accepted by [`parse_date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> CalcResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| CalcError::invalid_date(text, format!("expected YYYY-MM-DD ({})", e)))
}

/// Add `days` (possibly negative) to `date`.
///
/// ```rust
/// use calc_core::calendar::{add_days, parse_date};
///
/// let lmp = parse_date("2024-01-01").unwrap();
/// assert_eq!(add_days(lmp, 280).unwrap(), parse_date("2024-10-07").unwrap());
/// assert_eq!(add_days(lmp, -1).unwrap(), parse_date("2023-12-31").unwrap());
/// ```
pub fn add_days(date: NaiveDate, days: i64) -> CalcResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| {
        CalcError::invalid_date(
            date.to_string(),
            format!("adding {} days leaves the supported calendar range", days),
        )
    })
}

/// Number of days in `month` of `year` (28-31, leap-year aware).
pub fn days_in_month(year: i32, month: u32) -> CalcResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalcError::invalid_date(format!("{}-{:02}", year, month), "no such month"))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CalcError::invalid_date(first.to_string(), "month after is out of range"))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Reject `later` preceding `earlier`.
pub(crate) fn ensure_ordered(earlier: NaiveDate, later: NaiveDate, what: &str) -> CalcResult<()> {
    if later < earlier {
        return Err(CalcError::invalid_date(
            later.to_string(),
            format!("{} must not be before {}", what, earlier),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date(" 2024-02-29 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in ["2023-02-29", "2024-13-01", "31/01/2024", "", "tomorrow"] {
            let err = parse_date(bad).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_DATE", "input {:?}", bad);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert!(days_in_month(2024, 13).is_err());
    }

    #[test]
    fn test_add_days_overflow() {
        let err = add_days(NaiveDate::MAX, 1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DATE");
    }
}
