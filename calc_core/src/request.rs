//! # Calculation Requests
//!
//! One tagged enum covering every engine operation, so a front end (or an
//! LLM tool call) can drive calc_core with a single JSON document and get a
//! single JSON document back.
//!
//! ## JSON Example
//!
//! ```json
//! { "type": "Convert", "value": 100.0, "from_unit": "C", "to_unit": "F" }
//! { "type": "Combinations", "n": 10, "r": 3 }
//! { "type": "NextPeriods", "last_period": "2024-01-01", "cycle_length_days": 28,
//!   "today": "2024-02-10", "count": 3 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::request::{Outcome, Request};
//! use calc_core::settings::Settings;
//!
//! let request: Request = serde_json::from_str(
//!     r#"{ "type": "Amortize", "principal": 12000.0, "annual_rate_percent": 0.0, "term_months": 12 }"#,
//! ).unwrap();
//!
//! match request.evaluate(&Settings::default()).unwrap() {
//!     Outcome::Loan(summary) => assert_eq!(summary.monthly_payment, 1000.0),
//!     other => panic!("unexpected outcome {:?}", other),
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::{self, LoanSummary, LoanTerms, ScheduleRow};
use crate::calendar::{self, AgeSummary, DateDiff, FertilityWindow, GestationalAge, Pregnancy};
use crate::combinatorics::{CombinatoricsRequest, CombinatoricsResult};
use crate::errors::CalcResult;
use crate::settings::Settings;
use crate::units::{ConversionRequest, ConversionResult};

/// Most occurrences a recurring projection may return
pub const MAX_OCCURRENCES: usize = 24;

fn default_count() -> usize {
    3
}

/// Every operation calc_core offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Unit conversion
    Convert(ConversionRequest),
    /// nPr (the result carries nCr as well)
    Permutations(CombinatoricsRequest),
    /// nCr (the result carries nPr as well)
    Combinations(CombinatoricsRequest),
    /// Years, months, days between two dates
    DateDiff { from: NaiveDate, to: NaiveDate },
    /// Age as of `today`
    Age { birth_date: NaiveDate, today: NaiveDate },
    /// Upcoming periods
    NextPeriods {
        last_period: NaiveDate,
        cycle_length_days: i64,
        today: NaiveDate,
        #[serde(default = "default_count")]
        count: usize,
    },
    /// Ovulation and fertile window for one cycle
    Ovulation {
        last_period: NaiveDate,
        cycle_length_days: i64,
        today: NaiveDate,
    },
    /// Due date and conception estimate
    DueDate {
        last_period: NaiveDate,
        cycle_length_days: i64,
    },
    /// Weeks and days since the last period
    GestationalAge { last_period: NaiveDate, today: NaiveDate },
    /// Loan payment totals
    Amortize(LoanTerms),
    /// Month-by-month loan breakdown
    Schedule(LoanTerms),
}

/// Result of evaluating a [`Request`]. Amounts are rounded per
/// [`Settings::display`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "result")]
pub enum Outcome {
    Conversion(ConversionResult),
    Combinatorics(CombinatoricsResult),
    DateDiff(DateDiff),
    Age(AgeSummary),
    Dates(Vec<NaiveDate>),
    Fertility(FertilityWindow),
    Pregnancy(Pregnancy),
    GestationalAge(GestationalAge),
    Loan(LoanSummary),
    Schedule(Vec<ScheduleRow>),
}

impl Request {
    /// Get the request type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            Request::Convert(_) => "Convert",
            Request::Permutations(_) => "Permutations",
            Request::Combinations(_) => "Combinations",
            Request::DateDiff { .. } => "DateDiff",
            Request::Age { .. } => "Age",
            Request::NextPeriods { .. } => "NextPeriods",
            Request::Ovulation { .. } => "Ovulation",
            Request::DueDate { .. } => "DueDate",
            Request::GestationalAge { .. } => "GestationalAge",
            Request::Amortize(_) => "Amortize",
            Request::Schedule(_) => "Schedule",
        }
    }

    /// Run the request against the engines.
    ///
    /// `settings` is validated first, so a hand-built [`Settings`] with an
    /// unusable policy fails with `InvalidSettings`.
    pub fn evaluate(&self, settings: &Settings) -> CalcResult<Outcome> {
        debug!(calc_type = self.calc_type(), "evaluating request");
        settings.validate()?;
        let money = settings.display.currency_precision;

        let outcome = match self {
            Request::Convert(req) => {
                Outcome::Conversion(req.calculate()?.rounded(settings.display.precision))
            }
            Request::Permutations(req) | Request::Combinations(req) => {
                Outcome::Combinatorics(req.calculate(settings.combinatorics.max_n)?)
            }
            Request::DateDiff { from, to } => Outcome::DateDiff(calendar::diff(*from, *to)?),
            Request::Age { birth_date, today } => Outcome::Age(calendar::age(*birth_date, *today)?),
            Request::NextPeriods {
                last_period,
                cycle_length_days,
                today,
                count,
            } => {
                let count = calendar::cycle::check_count(*count, MAX_OCCURRENCES)?;
                let dates = calendar::next_periods(*last_period, *cycle_length_days, *today, count, &settings.cycle)?;
                Outcome::Dates(dates.collect())
            }
            Request::Ovulation {
                last_period,
                cycle_length_days,
                today,
            } => Outcome::Fertility(calendar::ovulation(
                *last_period,
                *cycle_length_days,
                *today,
                &settings.cycle,
            )?),
            Request::DueDate {
                last_period,
                cycle_length_days,
            } => Outcome::Pregnancy(calendar::due_date(*last_period, *cycle_length_days, &settings.cycle)?),
            Request::GestationalAge { last_period, today } => {
                Outcome::GestationalAge(calendar::gestational_age(*last_period, *today)?)
            }
            Request::Amortize(terms) => Outcome::Loan(amortization::amortize(terms)?.rounded(money)),
            Request::Schedule(terms) => {
                let rows = amortization::schedule(terms)?
                    .into_iter()
                    .map(|row| round_row(row, money))
                    .collect();
                Outcome::Schedule(rows)
            }
        };
        Ok(outcome)
    }
}

fn round_row(row: ScheduleRow, digits: u32) -> ScheduleRow {
    use crate::format::round_to;
    ScheduleRow {
        month: row.month,
        payment: round_to(row.payment, digits),
        principal: round_to(row.principal, digits),
        interest: round_to(row.interest, digits),
        balance: round_to(row.balance, digits),
    }
}
