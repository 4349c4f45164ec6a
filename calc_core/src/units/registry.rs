//! # Unit Registry
//!
//! Id-based lookup over the unit tables. The index is built once, on first
//! use, and is read-only afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::catalog;
use super::{Domain, Unit};
use crate::errors::{CalcError, CalcResult};

static REGISTRY: Lazy<HashMap<&'static str, &'static Unit>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for domain in Domain::ALL {
        for unit in domain_units(domain) {
            index.insert(unit.id, unit);
        }
    }
    index
});

/// The unit table for a domain; the first entry is the base unit.
pub fn domain_units(domain: Domain) -> &'static [Unit] {
    match domain {
        Domain::Length => catalog::LENGTH,
        Domain::Area => catalog::AREA,
        Domain::Volume => catalog::VOLUME,
        Domain::Mass => catalog::MASS,
        Domain::Energy => catalog::ENERGY,
        Domain::Force => catalog::FORCE,
        Domain::Speed => catalog::SPEED,
        Domain::Time => catalog::TIME,
        Domain::DataStorage => catalog::DATA_STORAGE,
        Domain::FuelEfficiency => catalog::FUEL_EFFICIENCY,
        Domain::Angle => catalog::ANGLE,
        Domain::Temperature => catalog::TEMPERATURE,
    }
}

/// Every registered unit, grouped by domain in [`Domain::ALL`] order.
pub fn all_units() -> impl Iterator<Item = &'static Unit> {
    Domain::ALL.into_iter().flat_map(domain_units)
}

/// Find a unit by its id. Ids are case-sensitive ("kN" is not "KN").
///
/// ```rust
/// use calc_core::units::{lookup, Domain};
///
/// assert_eq!(lookup("mph").unwrap().domain, Domain::Speed);
/// assert!(lookup("furlong").is_err());
/// ```
pub fn lookup(id: &str) -> CalcResult<&'static Unit> {
    REGISTRY
        .get(id.trim())
        .copied()
        .ok_or_else(|| CalcError::unknown_unit(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_globally_unique() {
        let mut seen = HashSet::new();
        for unit in all_units() {
            assert!(seen.insert(unit.id), "duplicate unit id '{}'", unit.id);
        }
        assert_eq!(seen.len(), REGISTRY.len());
    }

    #[test]
    fn test_every_domain_has_units() {
        for domain in Domain::ALL {
            let units = domain_units(domain);
            assert!(units.len() >= 2, "{} has too few units", domain);
            assert!(units.iter().all(|u| u.domain == domain));
        }
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        assert_eq!(lookup(" km ").unwrap().id, "km");
    }

    #[test]
    fn test_lookup_case_sensitive() {
        assert_eq!(lookup("kN").unwrap().domain, Domain::Force);
        assert_eq!(lookup("K").unwrap().domain, Domain::Temperature);
        assert!(matches!(lookup("KN"), Err(CalcError::UnknownUnit { .. })));
    }
}
