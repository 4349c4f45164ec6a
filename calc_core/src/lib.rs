//! # calc_core - Quantitative Calculation Engines
//!
//! `calc_core` is the computational heart of Reckon: a set of pure
//! calculation engines behind a clean, JSON-friendly API. Page rendering,
//! form state, and input sanitization belong to the front ends; this crate
//! only computes.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Requests and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never NaN or a silent blank
//! - **Deterministic**: No clock, file, or network access; "today" is an argument
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{amortization, combinatorics, units};
//!
//! assert_eq!(units::convert(1.0, "km", "m").unwrap(), 1000.0);
//! assert_eq!(combinatorics::combinations(5, 2).unwrap().to_string(), "10");
//!
//! let loan = amortization::LoanTerms::new(12_000.0, 0.0, 12);
//! assert_eq!(amortization::amortize(&loan).unwrap().monthly_payment, 1000.0);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Dimensional unit conversion across twelve domains
//! - [`combinatorics`] - Exact nPr / nCr with arbitrary-precision integers
//! - [`calendar`] - Calendar differences and cycle/due-date projections
//! - [`amortization`] - Loan EMI, totals, and payment schedules
//! - [`request`] - Tagged JSON requests dispatched to the engines
//! - [`settings`] - Precision, ceilings, and cycle policy
//! - [`format`] - Display rounding
//! - [`errors`] - Structured error types

pub mod amortization;
pub mod calendar;
pub mod combinatorics;
pub mod errors;
pub mod format;
pub mod request;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use request::{Outcome, Request};
pub use settings::Settings;
