//! # Dimensional Unit Conversion
//!
//! Converts a scalar between units of one measurement domain. Every domain
//! declares a single base unit; each unit knows how to map a value to and
//! from that base, so a domain of N units needs N definitions instead of N²
//! pairwise factors.
//!
//! ## Unit Kinds
//!
//! - **Linear**: `to_base` multiplies by a fixed positive factor,
//!   `from_base` divides by it (meters, bytes, joules, ...)
//! - **Affine / non-linear**: explicit formulas (temperature offsets, the
//!   reciprocal L/100km fuel-consumption unit)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, Domain};
//!
//! assert_eq!(convert(1.0, "km", "m").unwrap(), 1000.0);
//! assert_eq!(convert(100.0, "C", "F").unwrap(), 212.0);
//!
//! let err = convert(1.0, "km", "kg").unwrap_err();
//! assert_eq!(err.error_code(), "DOMAIN_MISMATCH");
//!
//! assert_eq!(Domain::Length.base_unit().id, "m");
//! ```

mod catalog;
pub mod conversion;
pub mod registry;

pub use conversion::{convert, ConversionRequest, ConversionResult};
pub use registry::{all_units, domain_units, lookup};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Measurement domain. Units only convert within their own domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Length,
    Area,
    Volume,
    Mass,
    Energy,
    Force,
    Speed,
    Time,
    DataStorage,
    FuelEfficiency,
    Angle,
    Temperature,
}

impl Domain {
    /// All domains for iteration
    pub const ALL: [Domain; 12] = [
        Domain::Length,
        Domain::Area,
        Domain::Volume,
        Domain::Mass,
        Domain::Energy,
        Domain::Force,
        Domain::Speed,
        Domain::Time,
        Domain::DataStorage,
        Domain::FuelEfficiency,
        Domain::Angle,
        Domain::Temperature,
    ];

    /// Machine-friendly name, matching the serde representation
    pub fn code(&self) -> &'static str {
        match self {
            Domain::Length => "length",
            Domain::Area => "area",
            Domain::Volume => "volume",
            Domain::Mass => "mass",
            Domain::Energy => "energy",
            Domain::Force => "force",
            Domain::Speed => "speed",
            Domain::Time => "time",
            Domain::DataStorage => "data_storage",
            Domain::FuelEfficiency => "fuel_efficiency",
            Domain::Angle => "angle",
            Domain::Temperature => "temperature",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Domain::Length => "Length",
            Domain::Area => "Area",
            Domain::Volume => "Volume",
            Domain::Mass => "Mass / Weight",
            Domain::Energy => "Energy",
            Domain::Force => "Force",
            Domain::Speed => "Speed",
            Domain::Time => "Time",
            Domain::DataStorage => "Data Storage",
            Domain::FuelEfficiency => "Fuel Efficiency",
            Domain::Angle => "Angle",
            Domain::Temperature => "Temperature",
        }
    }

    /// The reference unit every other unit in this domain converts through
    pub fn base_unit(&self) -> &'static Unit {
        &domain_units(*self)[0]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Domain {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Domain::ALL
            .iter()
            .copied()
            .find(|d| d.code() == normalized)
            .ok_or_else(|| CalcError::InvalidValue {
                field: "domain".to_string(),
                value: s.to_string(),
                reason: "Unknown measurement domain".to_string(),
            })
    }
}

/// How a unit maps to its domain's base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Linear,
    Affine,
}

/// The pair of base transforms for a unit.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// `base = value * factor`, factor > 0
    Factor(f64),
    /// Explicit formulas for units a single factor cannot express
    Formula {
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    },
}

/// A unit of measure registered in exactly one domain.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    /// Globally unique id (e.g. "km", "F", "mpg_us")
    pub id: &'static str,
    /// Owning domain
    pub domain: Domain,
    /// Human-readable label
    pub label: &'static str,
    transform: Transform,
}

impl Unit {
    /// Define a unit that is a fixed multiple of the base unit
    pub const fn linear(id: &'static str, domain: Domain, label: &'static str, factor: f64) -> Self {
        Unit {
            id,
            domain,
            label,
            transform: Transform::Factor(factor),
        }
    }

    /// Define a unit with explicit to/from base formulas
    pub const fn affine(
        id: &'static str,
        domain: Domain,
        label: &'static str,
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    ) -> Self {
        Unit {
            id,
            domain,
            label,
            transform: Transform::Formula { to_base, from_base },
        }
    }

    /// Linear or affine
    pub fn kind(&self) -> UnitKind {
        match self.transform {
            Transform::Factor(_) => UnitKind::Linear,
            Transform::Formula { .. } => UnitKind::Affine,
        }
    }

    /// The base transforms
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Express `value` (in this unit) in the domain's base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match self.transform {
            Transform::Factor(factor) => value * factor,
            Transform::Formula { to_base, .. } => to_base(value),
        }
    }

    /// Express `base` (in the domain's base unit) in this unit
    pub fn from_base(&self, base: f64) -> f64 {
        match self.transform {
            Transform::Factor(factor) => base / factor,
            Transform::Formula { from_base, .. } => from_base(base),
        }
    }

    /// Serializable description for selectors and listings
    pub fn info(&self) -> UnitInfo {
        UnitInfo {
            id: self.id.to_string(),
            domain: self.domain,
            label: self.label.to_string(),
            kind: self.kind(),
        }
    }
}

/// JSON-friendly view of a [`Unit`].
///
/// ## JSON Example
///
/// ```json
/// { "id": "ft", "domain": "length", "label": "Foot", "kind": "linear" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub id: String,
    pub domain: Domain,
    pub label: String,
    pub kind: UnitKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_from_str() {
        assert_eq!("length".parse::<Domain>().unwrap(), Domain::Length);
        assert_eq!("Data Storage".parse::<Domain>().unwrap(), Domain::DataStorage);
        assert_eq!("fuel-efficiency".parse::<Domain>().unwrap(), Domain::FuelEfficiency);
        assert!("luminosity".parse::<Domain>().is_err());
    }

    #[test]
    fn test_domain_serialization_matches_code() {
        for domain in Domain::ALL {
            let json = serde_json::to_string(&domain).unwrap();
            assert_eq!(json, format!("\"{}\"", domain.code()));
        }
    }

    #[test]
    fn test_base_units_are_identity() {
        for domain in Domain::ALL {
            let base = domain.base_unit();
            assert_eq!(base.domain, domain);
            for x in [-40.0, 0.0, 1.0, 123.456] {
                assert_eq!(base.to_base(x), x, "{} to_base", base.id);
                assert_eq!(base.from_base(x), x, "{} from_base", base.id);
            }
        }
    }

    #[test]
    fn test_unit_kinds() {
        assert_eq!(lookup("km").unwrap().kind(), UnitKind::Linear);
        assert_eq!(lookup("F").unwrap().kind(), UnitKind::Affine);
        assert_eq!(lookup("l_100km").unwrap().kind(), UnitKind::Affine);
    }

    #[test]
    fn test_unit_info_serialization() {
        let info = lookup("ft").unwrap().info();
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"id":"ft","domain":"length","label":"Foot","kind":"linear"}"#
        );
    }
}
