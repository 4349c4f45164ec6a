//! # Display Formatting
//!
//! Rounding helpers for presenting results. Engines never round
//! intermediate values; these are applied to final outputs only.

/// Round `value` to `digits` fractional digits.
///
/// Values too large to scale (where `value * 10^digits` overflows) are
/// returned unchanged, as are non-finite values.
///
/// ```rust
/// use calc_core::format::round_to;
///
/// assert_eq!(round_to(8884.878867, 2), 8884.88);
/// assert_eq!(round_to(-1.23456, 3), -1.235);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Render `value` rounded to `digits` fractional digits with trailing
/// zeros trimmed.
///
/// ```rust
/// use calc_core::format::display;
///
/// assert_eq!(display(1000.0, 6), "1000");
/// assert_eq!(display(0.3048, 6), "0.3048");
/// assert_eq!(display(1.0 / 3.0, 4), "0.3333");
/// ```
pub fn display(value: f64, digits: u32) -> String {
    let text = format!("{:.*}", digits as usize, round_to(value, digits));
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(display(-0.0000001, 4), "0");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_huge_values_unchanged() {
        assert_eq!(round_to(1e305, 6), 1e305);
    }

    #[test]
    fn test_display_integer_precision() {
        assert_eq!(display(212.0, 0), "212");
        assert_eq!(display(106618.546, 2), "106618.55");
    }
}
