//! # Error Types
//!
//! Structured error types for calc_core. Every engine returns a typed
//! [`CalcError`] instead of a blank or NaN result, so the presentation layer
//! can decide whether to hide the output, show a message, or ask for
//! corrected input.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_principal(principal: f64) -> CalcResult<()> {
//!     if principal <= 0.0 {
//!         return Err(CalcError::invalid_terms(
//!             "principal",
//!             principal.to_string(),
//!             "Principal must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_principal(-5.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_TERMS");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// All variants except [`CalcError::Internal`] are pure functions of the
/// caller's input: retrying with the same input yields the same error.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A scalar input (or output) is NaN or infinite
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A unit id is not registered in any domain
    #[error("Unknown unit: '{unit_id}'")]
    UnknownUnit { unit_id: String },

    /// Source and target units belong to different measurement domains
    #[error("Cannot convert '{from_unit}' ({from_domain}) to '{to_unit}' ({to_domain})")]
    DomainMismatch {
        from_unit: String,
        from_domain: String,
        to_unit: String,
        to_domain: String,
    },

    /// Combinatorics arguments violate 0 <= r <= n
    #[error("Invalid range: n = {n}, r = {r} - {reason}")]
    InvalidRange { n: i64, r: i64, reason: String },

    /// n is above the exact-arithmetic ceiling
    #[error("Range too large: n = {n} exceeds the ceiling of {max_n}")]
    RangeTooLarge { n: i64, max_n: u32 },

    /// Loan parameters are non-positive or not finite
    #[error("Invalid loan terms for '{field}': {value} - {reason}")]
    InvalidTerms {
        field: String,
        value: String,
        reason: String,
    },

    /// A calendar date is malformed, out of order, or out of range
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Cycle length falls outside the accepted window
    #[error("Invalid cycle length: {days} days (accepted range {min_days}-{max_days})")]
    InvalidCycleLength { days: i64, min_days: u32, max_days: u32 },

    /// Settings violate their own constraints
    #[error("Invalid settings for '{field}': {reason}")]
    InvalidSettings { field: String, reason: String },

    /// An arithmetic invariant did not hold (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidValue error
    pub fn invalid_value(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit_id: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            unit_id: unit_id.into(),
        }
    }

    /// Create an InvalidRange error
    pub fn invalid_range(n: i64, r: i64, reason: impl Into<String>) -> Self {
        CalcError::InvalidRange {
            n,
            r,
            reason: reason.into(),
        }
    }

    /// Create an InvalidTerms error
    pub fn invalid_terms(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTerms {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSettings error
    pub fn invalid_settings(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input (everything but `Internal`)
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CalcError::Internal { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidValue { .. } => "INVALID_VALUE",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::DomainMismatch { .. } => "DOMAIN_MISMATCH",
            CalcError::InvalidRange { .. } => "INVALID_RANGE",
            CalcError::RangeTooLarge { .. } => "RANGE_TOO_LARGE",
            CalcError::InvalidTerms { .. } => "INVALID_TERMS",
            CalcError::InvalidDate { .. } => "INVALID_DATE",
            CalcError::InvalidCycleLength { .. } => "INVALID_CYCLE_LENGTH",
            CalcError::InvalidSettings { .. } => "INVALID_SETTINGS",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_range(5, 6, "r must not exceed n");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidRange\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_unit("furlong").error_code(), "UNKNOWN_UNIT");
        assert_eq!(
            CalcError::RangeTooLarge { n: 51, max_n: 50 }.error_code(),
            "RANGE_TOO_LARGE"
        );
        assert_eq!(CalcError::invalid_date("2024-13-01", "bad month").error_code(), "INVALID_DATE");
    }

    #[test]
    fn test_input_errors_are_distinguished_from_internal() {
        assert!(CalcError::invalid_value("value", f64::NAN, "not finite").is_input_error());
        assert!(!CalcError::internal("remainder").is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::InvalidCycleLength {
            days: 50,
            min_days: 20,
            max_days: 45,
        };
        assert_eq!(
            err.to_string(),
            "Invalid cycle length: 50 days (accepted range 20-45)"
        );
    }
}
