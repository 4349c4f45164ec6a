//! # Loan Amortization (EMI)
//!
//! Fixed-rate, fixed-term loan payments using the standard equated monthly
//! installment formula:
//!
//! ```text
//! r   = annual_rate_percent / 12 / 100
//! EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! A zero rate makes the formula 0/0, so it is handled as straight division
//! `P / n`. All arithmetic is f64 with no intermediate rounding; round the
//! final outputs with [`LoanSummary::rounded`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::amortization::{amortize, LoanTerms};
//!
//! let summary = amortize(&LoanTerms::new(100_000.0, 12.0, 12)).unwrap().rounded(2);
//! assert_eq!(summary.monthly_payment, 8884.88);
//! assert_eq!(summary.total_interest, 6618.55);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::round_to;

/// Loan parameters.
///
/// ## JSON Example
///
/// ```json
/// { "principal": 250000.0, "annual_rate_percent": 6.5, "term_months": 360 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual rate in percent (12.0 means 12%)
    pub annual_rate_percent: f64,
    /// Number of monthly payments
    pub term_months: i64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: i64) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    /// Terms for a loan quoted in whole years
    pub fn from_years(principal: f64, annual_rate_percent: f64, term_years: i64) -> Self {
        LoanTerms::new(principal, annual_rate_percent, term_years.saturating_mul(12))
    }

    /// Validate input parameters.
    ///
    /// A zero rate is accepted (interest-free loan); negative rates are not.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::invalid_terms(
                "principal",
                self.principal.to_string(),
                "Principal must be a positive number",
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(CalcError::invalid_terms(
                "annual_rate_percent",
                self.annual_rate_percent.to_string(),
                "Rate must be zero or a positive number",
            ));
        }
        if self.term_months <= 0 {
            return Err(CalcError::invalid_terms(
                "term_months",
                self.term_months.to_string(),
                "Term must be at least one month",
            ));
        }
        if self.term_months > i64::from(i32::MAX) {
            return Err(CalcError::invalid_terms(
                "term_months",
                self.term_months.to_string(),
                "Term is too long",
            ));
        }
        Ok(())
    }

    /// Monthly rate as a fraction (0.01 for 12% per year)
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

/// Payment totals for a loan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "monthly_payment": 8884.88,
///   "total_payment": 106618.55,
///   "total_interest": 6618.55
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    /// Copy with every amount rounded to `digits` fractional digits
    pub fn rounded(&self, digits: u32) -> Self {
        LoanSummary {
            monthly_payment: round_to(self.monthly_payment, digits),
            total_payment: round_to(self.total_payment, digits),
            total_interest: round_to(self.total_interest, digits),
        }
    }
}

fn monthly_payment(terms: &LoanTerms) -> f64 {
    let n = terms.term_months as f64;
    let r = terms.monthly_rate();
    if r == 0.0 {
        return terms.principal / n;
    }
    // P*r / (1 - (1+r)^-n), with ln_1p/exp_m1 so small rates keep their precision
    let discount = -(-n * r.ln_1p()).exp_m1();
    terms.principal * r / discount
}

/// Compute the monthly payment, total payment, and total interest.
///
/// # Errors
///
/// `InvalidTerms` for a non-positive principal or term, a negative rate, or
/// a payment that overflows f64.
pub fn amortize(terms: &LoanTerms) -> CalcResult<LoanSummary> {
    terms.validate()?;

    let payment = monthly_payment(terms);
    let total_payment = payment * terms.term_months as f64;
    if !payment.is_finite() || !total_payment.is_finite() {
        return Err(CalcError::invalid_terms(
            "annual_rate_percent",
            terms.annual_rate_percent.to_string(),
            "Payment is too large to represent",
        ));
    }
    debug!(
        principal = terms.principal,
        rate = terms.annual_rate_percent,
        months = terms.term_months,
        payment,
        "amortized loan"
    );

    Ok(LoanSummary {
        monthly_payment: payment,
        total_payment,
        total_interest: total_payment - terms.principal,
    })
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based payment number
    pub month: i64,
    pub payment: f64,
    /// Portion of the payment that reduces the balance
    pub principal: f64,
    /// Portion of the payment charged as interest
    pub interest: f64,
    /// Balance remaining after this payment
    pub balance: f64,
}

/// Longest schedule [`schedule`] will produce (100 years of payments)
pub const MAX_SCHEDULE_MONTHS: i64 = 1200;

/// Month-by-month breakdown of every payment.
///
/// The final payment absorbs floating-point drift so the balance ends at
/// exactly zero and the principal portions sum to the principal.
pub fn schedule(terms: &LoanTerms) -> CalcResult<Vec<ScheduleRow>> {
    let summary = amortize(terms)?;
    if terms.term_months > MAX_SCHEDULE_MONTHS {
        return Err(CalcError::invalid_terms(
            "term_months",
            terms.term_months.to_string(),
            format!("Schedules are limited to {} months", MAX_SCHEDULE_MONTHS),
        ));
    }

    let rate = terms.monthly_rate();
    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(terms.term_months as usize);

    for month in 1..=terms.term_months {
        let interest = balance * rate;
        let (payment, principal) = if month == terms.term_months {
            (balance + interest, balance)
        } else {
            let principal = summary.monthly_payment - interest;
            (summary.monthly_payment, principal)
        };
        balance -= principal;
        if month == terms.term_months {
            balance = 0.0;
        }
        rows.push(ScheduleRow {
            month,
            payment,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}
