//! # Exact Combinatorics
//!
//! Permutations (nPr) and combinations (nCr) computed with arbitrary-precision
//! integers. Factorials exceed 2^53 at 19!, so floating point is never used.
//!
//! ## Algorithm
//!
//! - `n!`, `r!`, `(n-r)!` by iterative products
//! - `nPr = n! / (n-r)!`
//! - `nCr = n! / (r! * (n-r)!)`
//!
//! Both divisions must leave no remainder; a remainder is reported as an
//! internal error rather than silently truncated.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::combinatorics::{combinations, permutations};
//!
//! assert_eq!(permutations(5, 2).unwrap().to_string(), "20");
//! assert_eq!(combinations(50, 25).unwrap().to_string(), "126410606437752");
//! assert_eq!(combinations(5, 6).unwrap_err().error_code(), "INVALID_RANGE");
//! ```

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Default ceiling on n; bounds the size of the exact results.
pub const DEFAULT_MAX_N: u32 = 50;

/// `n!` as an exact integer.
pub fn factorial(n: u32) -> BigUint {
    let mut product = BigUint::one();
    for k in 2..=n {
        product *= k;
    }
    product
}

/// Validate `0 <= r <= n <= max_n`, checking the ceiling before any
/// factorial is computed.
fn validate(n: i64, r: i64, max_n: u32) -> CalcResult<(u32, u32)> {
    if n < 0 {
        return Err(CalcError::invalid_range(n, r, "n must not be negative"));
    }
    if r < 0 {
        return Err(CalcError::invalid_range(n, r, "r must not be negative"));
    }
    if n > i64::from(max_n) {
        return Err(CalcError::RangeTooLarge { n, max_n });
    }
    if r > n {
        return Err(CalcError::invalid_range(n, r, "r must not exceed n"));
    }
    Ok((n as u32, r as u32))
}

fn exact_div(numerator: &BigUint, denominator: &BigUint, what: &str) -> CalcResult<BigUint> {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if !remainder.is_zero() {
        return Err(CalcError::internal(format!(
            "{} division left remainder {}",
            what, remainder
        )));
    }
    Ok(quotient)
}

/// nPr with the default ceiling of [`DEFAULT_MAX_N`].
pub fn permutations(n: i64, r: i64) -> CalcResult<BigUint> {
    permutations_bounded(n, r, DEFAULT_MAX_N)
}

/// nCr with the default ceiling of [`DEFAULT_MAX_N`].
pub fn combinations(n: i64, r: i64) -> CalcResult<BigUint> {
    combinations_bounded(n, r, DEFAULT_MAX_N)
}

/// nPr = n! / (n-r)!, rejecting n above `max_n`.
pub fn permutations_bounded(n: i64, r: i64, max_n: u32) -> CalcResult<BigUint> {
    let (n, r) = validate(n, r, max_n)?;
    let n_fact = factorial(n);
    let n_minus_r_fact = factorial(n - r);
    exact_div(&n_fact, &n_minus_r_fact, "permutation")
}

/// nCr = n! / (r! (n-r)!), rejecting n above `max_n`.
pub fn combinations_bounded(n: i64, r: i64, max_n: u32) -> CalcResult<BigUint> {
    let (n, r) = validate(n, r, max_n)?;
    let n_fact = factorial(n);
    let denominator = factorial(r) * factorial(n - r);
    exact_div(&n_fact, &denominator, "combination")
}

/// Input for a combinatorics calculation.
///
/// ## JSON Example
///
/// ```json
/// { "n": 10, "r": 3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinatoricsRequest {
    /// Size of the pool
    pub n: i64,
    /// Number of items chosen
    pub r: i64,
}

impl CombinatoricsRequest {
    pub fn new(n: i64, r: i64) -> Self {
        CombinatoricsRequest { n, r }
    }

    /// Compute both nPr and nCr.
    pub fn calculate(&self, max_n: u32) -> CalcResult<CombinatoricsResult> {
        let (n, r) = validate(self.n, self.r, max_n)?;
        debug!(n, r, "computing exact permutations and combinations");

        let n_fact = factorial(n);
        let r_fact = factorial(r);
        let n_minus_r_fact = factorial(n - r);

        let permutations = exact_div(&n_fact, &n_minus_r_fact, "permutation")?;
        let combinations = exact_div(&permutations, &r_fact, "combination")?;

        Ok(CombinatoricsResult {
            n: self.n,
            r: self.r,
            permutations,
            combinations,
        })
    }
}

/// Exact results. Big integers serialize as decimal strings so JSON
/// consumers never see them truncated to a double.
///
/// ## JSON Example
///
/// ```json
/// { "n": 10, "r": 3, "permutations": "720", "combinations": "120" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinatoricsResult {
    pub n: i64,
    pub r: i64,
    /// nPr
    #[serde(serialize_with = "serialize_decimal")]
    pub permutations: BigUint,
    /// nCr
    #[serde(serialize_with = "serialize_decimal")]
    pub combinations: BigUint,
}

impl CombinatoricsResult {
    /// Number of decimal digits in nPr (the larger of the two results)
    pub fn digit_count(&self) -> usize {
        self.permutations.to_str_radix(10).len()
    }
}

fn serialize_decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_str_radix(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    #[test]
    fn test_small_factorials() {
        assert_eq!(factorial(0), BigUint::one());
        assert_eq!(factorial(1), BigUint::one());
        assert_eq!(factorial(5), BigUint::from(120u32));
    }

    #[test]
    fn test_factorial_beyond_double_precision() {
        // 19! > 2^53; 25! does not fit in u64
        assert_eq!(factorial(19), big("121645100408832000"));
        assert_eq!(factorial(25), big("15511210043330985984000000"));
        assert_eq!(
            factorial(50),
            big("30414093201713378043612608166064768844377641568960512000000000000")
        );
    }

    #[test]
    fn test_known_values() {
        assert_eq!(permutations(10, 3).unwrap(), BigUint::from(720u32));
        assert_eq!(combinations(10, 3).unwrap(), BigUint::from(120u32));
        assert_eq!(combinations(52, 5).unwrap_err().error_code(), "RANGE_TOO_LARGE");
        assert_eq!(combinations_bounded(52, 5, 60).unwrap(), BigUint::from(2_598_960u32));
    }

    #[test]
    fn test_symmetry_and_identities() {
        for n in 0..=50i64 {
            assert_eq!(combinations(n, 0).unwrap(), BigUint::one());
            assert_eq!(permutations(n, n).unwrap(), factorial(n as u32));
            for r in 0..=n {
                let c = combinations(n, r).unwrap();
                assert_eq!(c, combinations(n, n - r).unwrap(), "C({n},{r}) symmetry");
                assert_eq!(
                    permutations(n, r).unwrap(),
                    &c * factorial(r as u32),
                    "P({n},{r}) = C({n},{r}) * {r}!"
                );
            }
        }
    }

    #[test]
    fn test_pascal_rule() {
        for n in 1..=50i64 {
            for r in 1..n {
                let lhs = combinations(n, r).unwrap();
                let rhs = combinations(n - 1, r - 1).unwrap() + combinations(n - 1, r).unwrap();
                assert_eq!(lhs, rhs);
            }
        }
    }

    #[test]
    fn test_range_rejection() {
        assert!(matches!(
            combinations(-1, 0),
            Err(CalcError::InvalidRange { n: -1, r: 0, .. })
        ));
        assert!(matches!(
            combinations(5, 6),
            Err(CalcError::InvalidRange { n: 5, r: 6, .. })
        ));
        assert!(matches!(
            combinations(5, -1),
            Err(CalcError::InvalidRange { .. })
        ));
        assert_eq!(
            combinations(51, 1),
            Err(CalcError::RangeTooLarge { n: 51, max_n: 50 })
        );
        assert!(permutations(51, 51).is_err());
    }

    #[test]
    fn test_request_result_serialization() {
        let result = CombinatoricsRequest::new(10, 3).calculate(DEFAULT_MAX_N).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"n":10,"r":3,"permutations":"720","combinations":"120"}"#
        );
    }

    #[test]
    fn test_request_matches_free_functions() {
        let result = CombinatoricsRequest::new(50, 20).calculate(DEFAULT_MAX_N).unwrap();
        assert_eq!(result.permutations, permutations(50, 20).unwrap());
        assert_eq!(result.combinations, combinations(50, 20).unwrap());
        assert_eq!(result.combinations, big("47129212243960"));
        assert_eq!(result.digit_count(), result.permutations.to_string().len());
    }

    #[test]
    fn test_custom_ceiling() {
        assert!(CombinatoricsRequest::new(10, 2).calculate(9).is_err());
        assert!(CombinatoricsRequest::new(10, 2).calculate(10).is_ok());
    }
}
