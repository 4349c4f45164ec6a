//! Plain-text rendering of calculation outcomes.

use std::fmt;

use calc_core::format::display;
use calc_core::units::{domain_units, Domain};
use calc_core::{Outcome, Settings};

const RULE: &str = "═══════════════════════════════════════";

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", RULE)?;
    writeln!(f, "  {}", title)?;
    writeln!(f, "{}", RULE)
}

/// Terminal view of an outcome.
pub struct OutcomeView<'a> {
    outcome: &'a Outcome,
    settings: &'a Settings,
}

/// Render an outcome for a terminal.
pub fn outcome<'a>(outcome: &'a Outcome, settings: &'a Settings) -> OutcomeView<'a> {
    OutcomeView { outcome, settings }
}

impl fmt::Display for OutcomeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = self.settings.display.currency_precision;

        match self.outcome {
            Outcome::Conversion(result) => writeln!(
                f,
                "{} {}",
                display(result.value, self.settings.display.precision),
                result.unit
            ),
            Outcome::Combinatorics(result) => {
                heading(f, &format!("n = {}, r = {}", result.n, result.r))?;
                writeln!(f, "  nPr = {}", result.permutations)?;
                writeln!(f, "  nCr = {}", result.combinations)
            }
            Outcome::DateDiff(d) => writeln!(f, "{} years, {} months, {} days", d.years, d.months, d.days),
            Outcome::Age(summary) => {
                heading(f, "AGE")?;
                let a = summary.age;
                writeln!(f, "  Age:            {} years, {} months, {} days", a.years, a.months, a.days)?;
                writeln!(f, "  Total:          {} days ({} weeks)", summary.total_days, summary.total_weeks)?;
                writeln!(
                    f,
                    "  Next birthday:  {} (in {} days)",
                    summary.next_birthday, summary.days_until_next_birthday
                )
            }
            Outcome::Dates(dates) => {
                for (i, date) in dates.iter().enumerate() {
                    writeln!(f, "  {:>2}. {}", i + 1, date.format("%a %Y-%m-%d"))?;
                }
                Ok(())
            }
            Outcome::Fertility(window) => {
                heading(f, "OVULATION ESTIMATE")?;
                writeln!(f, "  Ovulation:      {}", window.ovulation)?;
                writeln!(f, "  Fertile window: {} to {}", window.fertile_start, window.fertile_end)?;
                writeln!(f, "  Next period:    {}", window.next_period)
            }
            Outcome::Pregnancy(pregnancy) => {
                heading(f, "PREGNANCY ESTIMATE")?;
                writeln!(f, "  Due date:       {}", pregnancy.due_date)?;
                writeln!(f, "  Conception:     {}", pregnancy.conception_estimate)
            }
            Outcome::GestationalAge(age) => writeln!(
                f,
                "{} weeks, {} days (trimester {})",
                age.weeks,
                age.days,
                age.trimester()
            ),
            Outcome::Loan(summary) => {
                heading(f, "LOAN SUMMARY")?;
                writeln!(f, "  Monthly payment: {}", display(summary.monthly_payment, money))?;
                writeln!(f, "  Total interest:  {}", display(summary.total_interest, money))?;
                writeln!(f, "  Total payment:   {}", display(summary.total_payment, money))
            }
            Outcome::Schedule(rows) => {
                let p = money as usize;
                writeln!(
                    f,
                    "{:>5} {:>14} {:>14} {:>14} {:>16}",
                    "Month", "Payment", "Principal", "Interest", "Balance"
                )?;
                for row in rows {
                    writeln!(
                        f,
                        "{:>5} {:>14.*} {:>14.*} {:>14.*} {:>16.*}",
                        row.month, p, row.payment, p, row.principal, p, row.interest, p, row.balance
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Terminal view of the unit catalog.
pub struct UnitList(Option<Domain>);

/// Render the unit catalog, optionally limited to one domain.
pub fn unit_list(domain: Option<Domain>) -> UnitList {
    UnitList(domain)
}

impl fmt::Display for UnitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domains: Vec<Domain> = match self.0 {
            Some(d) => vec![d],
            None => Domain::ALL.to_vec(),
        };

        for domain in domains {
            writeln!(f, "{} ({})", domain.display_name(), domain.code())?;
            for (i, unit) in domain_units(domain).iter().enumerate() {
                let marker = if i == 0 { " [base]" } else { "" };
                writeln!(f, "  {:<10} {}{}", unit.id, unit.label, marker)?;
            }
        }
        Ok(())
    }
}
