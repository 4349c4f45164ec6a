//! # Cycle Projection
//!
//! Every projection here reduces to one primitive, "add K days to a
//! reference date", optionally followed by advancing in whole cycle lengths
//! until the date is no earlier than a cutoff:
//!
//! 1. **Recurring**: [`next_periods`] - upcoming occurrences spaced one cycle
//!    apart, starting from the first one on or after `today`
//! 2. **Fixed offset**: [`ovulation`] - a single estimate a constant number of
//!    days after the reference
//! 3. **Fixed total**: [`due_date`] - gestation length plus a linear
//!    adjustment for cycles longer or shorter than the reference cycle
//!
//! Cycle lengths outside the [`CyclePolicy`] window are rejected, never
//! clamped.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calendar::{next_periods, parse_date};
//! use calc_core::settings::CyclePolicy;
//!
//! let lmp = parse_date("2024-01-01").unwrap();
//! let today = parse_date("2024-02-10").unwrap();
//! let upcoming: Vec<_> = next_periods(lmp, 28, today, 3, &CyclePolicy::default())
//!     .unwrap()
//!     .map(|d| d.to_string())
//!     .collect();
//! assert_eq!(upcoming, ["2024-02-26", "2024-03-25", "2024-04-22"]);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{add_days, ensure_ordered};
use crate::errors::{CalcError, CalcResult};
use crate::settings::CyclePolicy;

/// A reference date, a validated cycle length, and a day offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProjection {
    /// Start of the reference cycle (e.g. last menstrual period)
    pub reference_date: NaiveDate,
    /// Days between occurrences
    pub cycle_length_days: u32,
    /// Days from the reference date to the first projected date
    pub offset_days: i64,
}

impl CycleProjection {
    /// Build a projection, rejecting cycle lengths outside `policy`.
    pub fn new(
        reference_date: NaiveDate,
        cycle_length_days: i64,
        offset_days: i64,
        policy: &CyclePolicy,
    ) -> CalcResult<Self> {
        let cycle_length_days = policy.check_length(cycle_length_days)?;
        Ok(CycleProjection {
            reference_date,
            cycle_length_days,
            offset_days,
        })
    }

    /// `reference_date + offset_days`
    pub fn first(&self) -> CalcResult<NaiveDate> {
        add_days(self.reference_date, self.offset_days)
    }

    /// `count` dates spaced one cycle apart. With a `cutoff`, the first date
    /// is advanced by whole cycles until it is no earlier than the cutoff.
    pub fn project(&self, cutoff: Option<NaiveDate>, count: usize) -> CalcResult<Occurrences> {
        let mut start = self.first()?;
        let step = i64::from(self.cycle_length_days);

        if let Some(cutoff) = cutoff {
            if start < cutoff {
                let gap = cutoff.signed_duration_since(start).num_days();
                let cycles = (gap + step - 1) / step;
                debug!(%start, %cutoff, cycles, "advancing projection past cutoff");
                start = add_days(start, cycles * step)?;
            }
        }

        Ok(Occurrences {
            start,
            step,
            count,
            index: 0,
        })
    }
}

/// Lazy, finite sequence of projected dates.
///
/// Clone it (or call [`Occurrences::restart`]) to iterate again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrences {
    start: NaiveDate,
    step: i64,
    count: usize,
    index: usize,
}

impl Occurrences {
    /// First date of the sequence
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Rewind to the first date
    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.index >= self.count {
            return None;
        }
        let offset = self.step.checked_mul(self.index as i64)?;
        match add_days(self.start, offset) {
            Ok(date) => {
                self.index += 1;
                Some(date)
            }
            // Ran off the end of the calendar
            Err(_) => {
                self.index = self.count;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.index))
    }
}

/// Upcoming periods: `lmp + k * cycle` for the smallest `k >= 1` that is no
/// earlier than `today`, followed by `count - 1` more.
pub fn next_periods(
    lmp: NaiveDate,
    cycle_length_days: i64,
    today: NaiveDate,
    count: usize,
    policy: &CyclePolicy,
) -> CalcResult<Occurrences> {
    ensure_ordered(lmp, today, "current date")?;
    let projection = CycleProjection::new(lmp, cycle_length_days, cycle_length_days, policy)?;
    projection.project(Some(today), count)
}

/// Ovulation estimate for one cycle and the fertile window around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilityWindow {
    pub ovulation: NaiveDate,
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
    pub next_period: NaiveDate,
}

/// Ovulation for the cycle starting at `lmp`: the next period minus the
/// luteal phase. `lmp` must not be after `today`.
///
/// ```rust
/// use calc_core::calendar::{ovulation, parse_date};
/// use calc_core::settings::CyclePolicy;
///
/// let lmp = parse_date("2024-03-01").unwrap();
/// let today = parse_date("2024-03-05").unwrap();
/// let window = ovulation(lmp, 28, today, &CyclePolicy::default()).unwrap();
/// assert_eq!(window.ovulation.to_string(), "2024-03-15");
/// assert_eq!(window.fertile_start.to_string(), "2024-03-10");
/// assert_eq!(window.fertile_end.to_string(), "2024-03-16");
/// assert_eq!(window.next_period.to_string(), "2024-03-29");
/// ```
pub fn ovulation(
    lmp: NaiveDate,
    cycle_length_days: i64,
    today: NaiveDate,
    policy: &CyclePolicy,
) -> CalcResult<FertilityWindow> {
    ensure_ordered(lmp, today, "current date")?;
    let offset = cycle_length_days - i64::from(policy.luteal_phase_days);
    let projection = CycleProjection::new(lmp, cycle_length_days, offset, policy)?;
    let ovulation = projection.first()?;

    Ok(FertilityWindow {
        ovulation,
        fertile_start: add_days(ovulation, -i64::from(policy.fertile_days_before))?,
        fertile_end: add_days(ovulation, i64::from(policy.fertile_days_after))?,
        next_period: add_days(lmp, i64::from(projection.cycle_length_days))?,
    })
}

/// Pregnancy estimates derived from the last menstrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pregnancy {
    /// Estimated due date
    pub due_date: NaiveDate,
    /// Estimated conception (ovulation of the LMP cycle)
    pub conception_estimate: NaiveDate,
}

/// Due date: `lmp + gestation_days + (cycle - reference_length_days)`.
///
/// ```rust
/// use calc_core::calendar::{due_date, parse_date};
/// use calc_core::settings::CyclePolicy;
///
/// let lmp = parse_date("2024-01-01").unwrap();
/// let policy = CyclePolicy::default();
/// assert_eq!(due_date(lmp, 28, &policy).unwrap().due_date.to_string(), "2024-10-07");
/// assert_eq!(due_date(lmp, 35, &policy).unwrap().due_date.to_string(), "2024-10-14");
/// ```
pub fn due_date(lmp: NaiveDate, cycle_length_days: i64, policy: &CyclePolicy) -> CalcResult<Pregnancy> {
    let adjustment = cycle_length_days - i64::from(policy.reference_length_days);
    let total = i64::from(policy.gestation_days) + adjustment;
    let projection = CycleProjection::new(lmp, cycle_length_days, total, policy)?;

    Ok(Pregnancy {
        due_date: projection.first()?,
        conception_estimate: add_days(lmp, cycle_length_days - i64::from(policy.luteal_phase_days))?,
    })
}

/// Time elapsed since the last menstrual period, in obstetric weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationalAge {
    pub weeks: i64,
    pub days: i64,
    pub total_days: i64,
}

impl GestationalAge {
    /// Trimester (1-3) by completed weeks
    pub fn trimester(&self) -> u8 {
        match self.weeks {
            w if w < 13 => 1,
            w if w < 27 => 2,
            _ => 3,
        }
    }
}

/// Gestational age on `today` for a pregnancy dated from `lmp`.
pub fn gestational_age(lmp: NaiveDate, today: NaiveDate) -> CalcResult<GestationalAge> {
    ensure_ordered(lmp, today, "current date")?;
    let total_days = today.signed_duration_since(lmp).num_days();
    Ok(GestationalAge {
        weeks: total_days / 7,
        days: total_days % 7,
        total_days,
    })
}

/// Reject an occurrence count outside `1..=max`.
pub(crate) fn check_count(count: usize, max: usize) -> CalcResult<usize> {
    if count == 0 || count > max {
        return Err(CalcError::InvalidValue {
            field: "count".to_string(),
            value: count.to_string(),
            reason: format!("must be between 1 and {}", max),
        });
    }
    Ok(count)
}
