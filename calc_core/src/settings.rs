//! # Engine Settings
//!
//! Tunable policy values shared by the engines: display precision, the
//! combinatorics ceiling, and the cycle-projection constants. Settings are
//! plain data; calc_core never reads them from disk. Front ends load them
//! (e.g. from TOML) and pass them in.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.combinatorics.max_n, 50);
//! assert_eq!(settings.cycle.min_length_days, 20);
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Largest number of fractional digits an f64 can meaningfully carry
pub const MAX_PRECISION: u32 = 15;

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output rounding
    pub display: DisplaySettings,

    /// Exact-integer ceiling
    pub combinatorics: CombinatoricsSettings,

    /// Cycle and pregnancy projection constants
    pub cycle: CyclePolicy,
}

impl Settings {
    /// Check every section for internal consistency.
    pub fn validate(&self) -> CalcResult<()> {
        self.display.validate()?;
        self.combinatorics.validate()?;
        self.cycle.validate()
    }
}

/// Display rounding applied to final outputs only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Fractional digits for conversion results
    pub precision: u32,

    /// Fractional digits for monetary results
    pub currency_precision: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            precision: 6,
            currency_precision: 2,
        }
    }
}

impl DisplaySettings {
    fn validate(&self) -> CalcResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(CalcError::invalid_settings(
                "display.precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }
        if self.currency_precision > MAX_PRECISION {
            return Err(CalcError::invalid_settings(
                "display.currency_precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }
        Ok(())
    }
}

/// Bounds for the exact combinatorics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinatoricsSettings {
    /// Largest accepted n
    pub max_n: u32,
}

impl Default for CombinatoricsSettings {
    fn default() -> Self {
        CombinatoricsSettings {
            max_n: crate::combinatorics::DEFAULT_MAX_N,
        }
    }
}

impl CombinatoricsSettings {
    fn validate(&self) -> CalcResult<()> {
        if self.max_n == 0 {
            return Err(CalcError::invalid_settings("combinatorics.max_n", "must be positive"));
        }
        Ok(())
    }
}

/// Constants for cycle, ovulation, and due-date projections.
///
/// Defaults follow the usual clinical conventions: a 28-day reference cycle,
/// a 14-day luteal phase, and a 280-day gestation counted from the last
/// menstrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclePolicy {
    /// Shortest accepted cycle length (inclusive)
    pub min_length_days: u32,

    /// Longest accepted cycle length (inclusive)
    pub max_length_days: u32,

    /// Days from ovulation to the next period
    pub luteal_phase_days: u32,

    /// Gestation length for a reference-length cycle
    pub gestation_days: u32,

    /// Cycle length the gestation constant assumes
    pub reference_length_days: u32,

    /// Fertile days before ovulation
    pub fertile_days_before: u32,

    /// Fertile days after ovulation
    pub fertile_days_after: u32,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        CyclePolicy {
            min_length_days: 20,
            max_length_days: 45,
            luteal_phase_days: 14,
            gestation_days: 280,
            reference_length_days: 28,
            fertile_days_before: 5,
            fertile_days_after: 1,
        }
    }
}

impl CyclePolicy {
    /// Check the window is non-empty and the luteal phase fits inside it.
    pub fn validate(&self) -> CalcResult<()> {
        if self.min_length_days == 0 {
            return Err(CalcError::invalid_settings("cycle.min_length_days", "must be positive"));
        }
        if self.min_length_days > self.max_length_days {
            return Err(CalcError::invalid_settings(
                "cycle.min_length_days",
                format!(
                    "minimum {} exceeds maximum {}",
                    self.min_length_days, self.max_length_days
                ),
            ));
        }
        if self.luteal_phase_days >= self.min_length_days {
            return Err(CalcError::invalid_settings(
                "cycle.luteal_phase_days",
                "must be shorter than the shortest accepted cycle",
            ));
        }
        if self.gestation_days == 0 {
            return Err(CalcError::invalid_settings("cycle.gestation_days", "must be positive"));
        }
        Ok(())
    }

    /// Reject cycle lengths outside `[min_length_days, max_length_days]`.
    ///
    /// Out-of-range values are rejected, never clamped. A length of zero or
    /// less is rejected even when the policy's own window would admit it.
    pub fn check_length(&self, days: i64) -> CalcResult<u32> {
        let min = i64::from(self.min_length_days).max(1);
        if days < min || days > i64::from(self.max_length_days) {
            return Err(CalcError::InvalidCycleLength {
                days,
                min_days: self.min_length_days,
                max_days: self.max_length_days,
            });
        }
        Ok(days as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [display]
            precision = 4

            [cycle]
            max_length_days = 40
            "#,
        )
        .unwrap();

        assert_eq!(settings.display.precision, 4);
        assert_eq!(settings.display.currency_precision, 2);
        assert_eq!(settings.cycle.max_length_days, 40);
        assert_eq!(settings.cycle.min_length_days, 20);
        assert_eq!(settings.combinatorics.max_n, 50);
    }

    #[test]
    fn test_inverted_cycle_window_rejected() {
        let mut settings = Settings::default();
        settings.cycle.min_length_days = 46;
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTINGS");
    }

    #[test]
    fn test_excess_precision_rejected() {
        let mut settings = Settings::default();
        settings.display.precision = 20;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let mut settings = Settings::default();
        settings.combinatorics.max_n = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cycle_length_bounds_inclusive() {
        let policy = CyclePolicy::default();
        assert_eq!(policy.check_length(20).unwrap(), 20);
        assert_eq!(policy.check_length(45).unwrap(), 45);
        assert!(matches!(
            policy.check_length(19),
            Err(CalcError::InvalidCycleLength { days: 19, .. })
        ));
        assert!(policy.check_length(46).is_err());
        assert!(policy.check_length(-28).is_err());
    }

    #[test]
    fn test_zero_length_rejected_under_open_window() {
        let policy = CyclePolicy {
            min_length_days: 0,
            ..CyclePolicy::default()
        };
        assert!(matches!(
            policy.check_length(0),
            Err(CalcError::InvalidCycleLength { days: 0, .. })
        ));
        assert_eq!(policy.check_length(1).unwrap(), 1);
    }
}
