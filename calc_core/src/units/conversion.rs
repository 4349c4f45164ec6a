//! # Conversion
//!
//! Two-step conversion: normalize to the domain's base unit, then
//! denormalize to the target unit. Results are never rounded here; use
//! [`ConversionResult::rounded`] or [`crate::format`] for presentation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{lookup, Domain};
use crate::errors::{CalcError, CalcResult};
use crate::format::round_to;

/// Convert `value` from one unit to another within the same domain.
///
/// # Errors
///
/// - `InvalidValue` if `value` (or the converted result) is NaN or infinite
/// - `UnknownUnit` if either id is not registered
/// - `DomainMismatch` if the units belong to different domains
///
/// # Example
///
/// ```rust
/// use calc_core::units::convert;
///
/// let feet = convert(1.0, "m", "ft").unwrap();
/// assert!((feet - 3.280839895).abs() < 1e-9);
/// ```
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_value("value", value, "Value must be a finite number"));
    }

    let from = lookup(from_unit)?;
    let to = lookup(to_unit)?;

    if from.domain != to.domain {
        return Err(CalcError::DomainMismatch {
            from_unit: from.id.to_string(),
            from_domain: from.domain.to_string(),
            to_unit: to.id.to_string(),
            to_domain: to.domain.to_string(),
        });
    }

    if from.id == to.id {
        return Ok(value);
    }

    let base = from.to_base(value);
    let result = to.from_base(base);
    trace!(value, from = from.id, to = to.id, base, result, "converted");

    if !result.is_finite() {
        return Err(CalcError::invalid_value(
            "result",
            result,
            format!("{} {} has no finite value in {}", value, from.id, to.id),
        ));
    }
    Ok(result)
}

/// Input for a single conversion.
///
/// ## JSON Example
///
/// ```json
/// { "value": 100.0, "from_unit": "C", "to_unit": "F" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Value expressed in `from_unit`
    pub value: f64,
    /// Source unit id
    pub from_unit: String,
    /// Target unit id
    pub to_unit: String,
}

impl ConversionRequest {
    pub fn new(value: f64, from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        ConversionRequest {
            value,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }

    /// Run the conversion.
    pub fn calculate(&self) -> CalcResult<ConversionResult> {
        let value = convert(self.value, &self.from_unit, &self.to_unit)?;
        let domain = lookup(&self.from_unit)?.domain;
        Ok(ConversionResult {
            value,
            unit: self.to_unit.trim().to_string(),
            domain,
        })
    }
}

/// Output of a conversion, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Converted value in `unit`
    pub value: f64,
    /// Target unit id
    pub unit: String,
    /// Domain both units belong to
    pub domain: Domain,
}

impl ConversionResult {
    /// Copy with `value` rounded to `digits` fractional digits
    pub fn rounded(&self, digits: u32) -> Self {
        ConversionResult {
            value: round_to(self.value, digits),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{domain_units, Domain};

    fn assert_relative(actual: f64, expected: f64, tol: f64) {
        let scale = expected.abs().max(f64::MIN_POSITIVE);
        assert!(
            (actual - expected).abs() <= tol * scale,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_km_to_m() {
        assert_eq!(convert(1.0, "km", "m").unwrap(), 1000.0);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(convert(100.0, "C", "F").unwrap(), 212.0);
        assert_eq!(convert(-40.0, "F", "C").unwrap(), -40.0);
    }

    #[test]
    fn test_common_conversions() {
        assert_relative(convert(1.0, "mi", "km").unwrap(), 1.609344, 1e-12);
        assert_relative(convert(1.0, "lb", "g").unwrap(), 453.59237, 1e-12);
        assert_relative(convert(1.0, "ha", "ac").unwrap(), 2.471053814671653, 1e-12);
        assert_relative(convert(1.0, "gal_us", "l").unwrap(), 3.785411784, 1e-12);
        assert_relative(convert(1.0, "kWh", "J").unwrap(), 3.6e6, 1e-12);
        assert_relative(convert(1.0, "kcal", "kJ").unwrap(), 4.184, 1e-12);
        assert_relative(convert(100.0, "km_h", "m_s").unwrap(), 27.77777777777778, 1e-12);
        assert_relative(convert(1.0, "d", "h").unwrap(), 24.0, 1e-12);
        assert_relative(convert(1.0, "GiB", "MiB").unwrap(), 1024.0, 1e-12);
        assert_relative(convert(8.0, "bit", "B").unwrap(), 1.0, 1e-12);
        assert_relative(convert(180.0, "deg", "rad").unwrap(), std::f64::consts::PI, 1e-12);
        assert_relative(convert(1.0, "kgf", "N").unwrap(), 9.80665, 1e-12);
        assert_relative(convert(0.0, "C", "K").unwrap(), 273.15, 1e-12);
    }

    #[test]
    fn test_fuel_efficiency_inversion() {
        // 10 km/L consumes 10 L per 100 km
        assert_relative(convert(10.0, "km_l", "l_100km").unwrap(), 10.0, 1e-12);
        // 30 mpg (US) is about 7.84 L/100km
        assert_relative(convert(30.0, "mpg_us", "l_100km").unwrap(), 7.840486111111111, 1e-12);
        // Higher consumption means lower efficiency
        let thirsty = convert(12.0, "l_100km", "mpg_us").unwrap();
        let frugal = convert(4.0, "l_100km", "mpg_us").unwrap();
        assert!(frugal > thirsty);
    }

    #[test]
    fn test_zero_consumption_has_no_finite_result() {
        let err = convert(0.0, "l_100km", "km_l").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_round_trip_all_domains() {
        for domain in Domain::ALL {
            let units = domain_units(domain);
            for u in units {
                for v in units {
                    for x in [1.0, 37.5, 1234.5678, 0.001, -12.25] {
                        // Reciprocal units are undefined for non-positive values
                        if domain == Domain::FuelEfficiency && x <= 0.0 {
                            continue;
                        }
                        let there = convert(x, u.id, v.id).unwrap();
                        let back = convert(there, v.id, u.id).unwrap();
                        assert!(
                            (back - x).abs() <= 1e-9 * x.abs(),
                            "{} -> {} -> {}: {} became {}",
                            u.id,
                            v.id,
                            u.id,
                            x,
                            back
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_domain_mismatch() {
        let err = convert(1.0, "km", "kg").unwrap_err();
        assert_eq!(
            err,
            CalcError::DomainMismatch {
                from_unit: "km".to_string(),
                from_domain: "length".to_string(),
                to_unit: "kg".to_string(),
                to_domain: "mass".to_string(),
            }
        );
    }

    #[test]
    fn test_non_finite_input_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert(bad, "m", "ft").unwrap_err();
            assert_eq!(err.error_code(), "INVALID_VALUE");
        }
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(1.0, "furlong", "m").unwrap_err();
        assert_eq!(err, CalcError::unknown_unit("furlong"));
    }

    #[test]
    fn test_request_rounding_is_presentation_only() {
        let result = ConversionRequest::new(1.0, "in", "cm").calculate().unwrap();
        assert_eq!(result.domain, Domain::Length);
        assert_eq!(result.unit, "cm");
        assert_relative(result.value, 2.54, 1e-12);

        let third = ConversionRequest::new(1.0, "ft", "yd").calculate().unwrap();
        assert_eq!(third.rounded(4).value, 0.3333);
        assert!(third.value != 0.3333);
    }

    #[test]
    fn test_request_serialization_roundtrip() {
        let request = ConversionRequest::new(100.0, "C", "F");
        let json = serde_json::to_string(&request).unwrap();
        let roundtrip: ConversionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, roundtrip);
    }
}
