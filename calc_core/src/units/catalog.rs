//! Unit tables, one per domain. The first entry of every table is the
//! domain's base unit.

use std::f64::consts::PI;

use super::{Domain, Unit};

// ============================================================================
// Length (base: meter)
// ============================================================================

pub(crate) static LENGTH: &[Unit] = &[
    Unit::linear("m", Domain::Length, "Meter", 1.0),
    Unit::linear("km", Domain::Length, "Kilometer", 1000.0),
    Unit::linear("cm", Domain::Length, "Centimeter", 0.01),
    Unit::linear("mm", Domain::Length, "Millimeter", 0.001),
    Unit::linear("um", Domain::Length, "Micrometer", 1e-6),
    Unit::linear("nm", Domain::Length, "Nanometer", 1e-9),
    Unit::linear("mi", Domain::Length, "Mile", 1609.344),
    Unit::linear("yd", Domain::Length, "Yard", 0.9144),
    Unit::linear("ft", Domain::Length, "Foot", 0.3048),
    Unit::linear("in", Domain::Length, "Inch", 0.0254),
    Unit::linear("nmi", Domain::Length, "Nautical Mile", 1852.0),
];

// ============================================================================
// Area (base: square meter)
// ============================================================================

pub(crate) static AREA: &[Unit] = &[
    Unit::linear("m2", Domain::Area, "Square Meter", 1.0),
    Unit::linear("km2", Domain::Area, "Square Kilometer", 1e6),
    Unit::linear("cm2", Domain::Area, "Square Centimeter", 1e-4),
    Unit::linear("mm2", Domain::Area, "Square Millimeter", 1e-6),
    Unit::linear("ha", Domain::Area, "Hectare", 1e4),
    Unit::linear("ac", Domain::Area, "Acre", 4046.8564224),
    Unit::linear("mi2", Domain::Area, "Square Mile", 2_589_988.110336),
    Unit::linear("yd2", Domain::Area, "Square Yard", 0.83612736),
    Unit::linear("ft2", Domain::Area, "Square Foot", 0.09290304),
    Unit::linear("in2", Domain::Area, "Square Inch", 0.00064516),
];

// ============================================================================
// Volume (base: liter)
// ============================================================================

pub(crate) static VOLUME: &[Unit] = &[
    Unit::linear("l", Domain::Volume, "Liter", 1.0),
    Unit::linear("ml", Domain::Volume, "Milliliter", 0.001),
    Unit::linear("m3", Domain::Volume, "Cubic Meter", 1000.0),
    Unit::linear("cm3", Domain::Volume, "Cubic Centimeter", 0.001),
    Unit::linear("gal_us", Domain::Volume, "Gallon (US)", 3.785411784),
    Unit::linear("qt_us", Domain::Volume, "Quart (US)", 0.946352946),
    Unit::linear("pt_us", Domain::Volume, "Pint (US)", 0.473176473),
    Unit::linear("cup_us", Domain::Volume, "Cup (US)", 0.2365882365),
    Unit::linear("floz_us", Domain::Volume, "Fluid Ounce (US)", 0.0295735295625),
    Unit::linear("tbsp_us", Domain::Volume, "Tablespoon (US)", 0.01478676478125),
    Unit::linear("tsp_us", Domain::Volume, "Teaspoon (US)", 0.00492892159375),
    Unit::linear("gal_uk", Domain::Volume, "Gallon (Imperial)", 4.54609),
    Unit::linear("ft3", Domain::Volume, "Cubic Foot", 28.316846592),
    Unit::linear("in3", Domain::Volume, "Cubic Inch", 0.016387064),
];

// ============================================================================
// Mass (base: kilogram)
// ============================================================================

pub(crate) static MASS: &[Unit] = &[
    Unit::linear("kg", Domain::Mass, "Kilogram", 1.0),
    Unit::linear("g", Domain::Mass, "Gram", 0.001),
    Unit::linear("mg", Domain::Mass, "Milligram", 1e-6),
    Unit::linear("t", Domain::Mass, "Metric Ton", 1000.0),
    Unit::linear("lb", Domain::Mass, "Pound", 0.45359237),
    Unit::linear("oz", Domain::Mass, "Ounce", 0.028349523125),
    Unit::linear("st", Domain::Mass, "Stone", 6.35029318),
    Unit::linear("ton_us", Domain::Mass, "Short Ton (US)", 907.18474),
    Unit::linear("ton_uk", Domain::Mass, "Long Ton (UK)", 1016.0469088),
];

// ============================================================================
// Energy (base: joule)
// ============================================================================

pub(crate) static ENERGY: &[Unit] = &[
    Unit::linear("J", Domain::Energy, "Joule", 1.0),
    Unit::linear("kJ", Domain::Energy, "Kilojoule", 1000.0),
    Unit::linear("cal", Domain::Energy, "Calorie", 4.184),
    Unit::linear("kcal", Domain::Energy, "Kilocalorie", 4184.0),
    Unit::linear("Wh", Domain::Energy, "Watt-hour", 3600.0),
    Unit::linear("kWh", Domain::Energy, "Kilowatt-hour", 3.6e6),
    Unit::linear("eV", Domain::Energy, "Electronvolt", 1.602176634e-19),
    Unit::linear("BTU", Domain::Energy, "British Thermal Unit", 1055.05585262),
    Unit::linear("ftlbf", Domain::Energy, "Foot-pound", 1.3558179483314004),
];

// ============================================================================
// Force (base: newton)
// ============================================================================

pub(crate) static FORCE: &[Unit] = &[
    Unit::linear("N", Domain::Force, "Newton", 1.0),
    Unit::linear("kN", Domain::Force, "Kilonewton", 1000.0),
    Unit::linear("dyn", Domain::Force, "Dyne", 1e-5),
    Unit::linear("lbf", Domain::Force, "Pound-force", 4.4482216152605),
    Unit::linear("kgf", Domain::Force, "Kilogram-force", 9.80665),
    Unit::linear("pdl", Domain::Force, "Poundal", 0.138254954376),
];

// ============================================================================
// Speed (base: meter per second)
// ============================================================================

pub(crate) static SPEED: &[Unit] = &[
    Unit::linear("m_s", Domain::Speed, "Meter per Second", 1.0),
    Unit::linear("km_h", Domain::Speed, "Kilometer per Hour", 1000.0 / 3600.0),
    Unit::linear("mph", Domain::Speed, "Mile per Hour", 0.44704),
    Unit::linear("knot", Domain::Speed, "Knot", 1852.0 / 3600.0),
    Unit::linear("ft_s", Domain::Speed, "Foot per Second", 0.3048),
];

// ============================================================================
// Time (base: second)
// ============================================================================

pub(crate) static TIME: &[Unit] = &[
    Unit::linear("s", Domain::Time, "Second", 1.0),
    Unit::linear("ns", Domain::Time, "Nanosecond", 1e-9),
    Unit::linear("us", Domain::Time, "Microsecond", 1e-6),
    Unit::linear("ms", Domain::Time, "Millisecond", 1e-3),
    Unit::linear("min", Domain::Time, "Minute", 60.0),
    Unit::linear("h", Domain::Time, "Hour", 3600.0),
    Unit::linear("d", Domain::Time, "Day", 86_400.0),
    Unit::linear("wk", Domain::Time, "Week", 604_800.0),
    // Gregorian averages: 365.2425 days per year, a twelfth of that per month
    Unit::linear("mo", Domain::Time, "Month (average)", 2_629_746.0),
    Unit::linear("yr", Domain::Time, "Year (average)", 31_556_952.0),
];

// ============================================================================
// Data storage (base: byte)
// ============================================================================

pub(crate) static DATA_STORAGE: &[Unit] = &[
    Unit::linear("B", Domain::DataStorage, "Byte", 1.0),
    Unit::linear("bit", Domain::DataStorage, "Bit", 0.125),
    Unit::linear("KB", Domain::DataStorage, "Kilobyte", 1e3),
    Unit::linear("MB", Domain::DataStorage, "Megabyte", 1e6),
    Unit::linear("GB", Domain::DataStorage, "Gigabyte", 1e9),
    Unit::linear("TB", Domain::DataStorage, "Terabyte", 1e12),
    Unit::linear("PB", Domain::DataStorage, "Petabyte", 1e15),
    Unit::linear("KiB", Domain::DataStorage, "Kibibyte", 1024.0),
    Unit::linear("MiB", Domain::DataStorage, "Mebibyte", 1_048_576.0),
    Unit::linear("GiB", Domain::DataStorage, "Gibibyte", 1_073_741_824.0),
    Unit::linear("TiB", Domain::DataStorage, "Tebibyte", 1_099_511_627_776.0),
];

// ============================================================================
// Fuel efficiency (base: kilometers per liter)
// ============================================================================

fn l_per_100km_to_base(value: f64) -> f64 {
    100.0 / value
}

fn l_per_100km_from_base(base: f64) -> f64 {
    100.0 / base
}

pub(crate) static FUEL_EFFICIENCY: &[Unit] = &[
    Unit::linear("km_l", Domain::FuelEfficiency, "Kilometer per Liter", 1.0),
    Unit::linear("mpg_us", Domain::FuelEfficiency, "Mile per Gallon (US)", 1.609344 / 3.785411784),
    Unit::linear("mpg_uk", Domain::FuelEfficiency, "Mile per Gallon (Imperial)", 1.609344 / 4.54609),
    // Consumption, not distance per volume: inverse of the base
    Unit::affine(
        "l_100km",
        Domain::FuelEfficiency,
        "Liter per 100 Kilometers",
        l_per_100km_to_base,
        l_per_100km_from_base,
    ),
];

// ============================================================================
// Angle (base: radian)
// ============================================================================

pub(crate) static ANGLE: &[Unit] = &[
    Unit::linear("rad", Domain::Angle, "Radian", 1.0),
    Unit::linear("deg", Domain::Angle, "Degree", PI / 180.0),
    Unit::linear("grad", Domain::Angle, "Gradian", PI / 200.0),
    Unit::linear("arcmin", Domain::Angle, "Minute of Arc", PI / 10_800.0),
    Unit::linear("arcsec", Domain::Angle, "Second of Arc", PI / 648_000.0),
    Unit::linear("turn", Domain::Angle, "Turn", 2.0 * PI),
];

// ============================================================================
// Temperature (base: degree Celsius)
// ============================================================================

fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * 5.0 / 9.0
}

fn celsius_to_fahrenheit(base: f64) -> f64 {
    base * 9.0 / 5.0 + 32.0
}

fn kelvin_to_celsius(value: f64) -> f64 {
    value - 273.15
}

fn celsius_to_kelvin(base: f64) -> f64 {
    base + 273.15
}

fn rankine_to_celsius(value: f64) -> f64 {
    (value - 491.67) * 5.0 / 9.0
}

fn celsius_to_rankine(base: f64) -> f64 {
    (base + 273.15) * 9.0 / 5.0
}

pub(crate) static TEMPERATURE: &[Unit] = &[
    Unit::linear("C", Domain::Temperature, "Degree Celsius", 1.0),
    Unit::affine(
        "F",
        Domain::Temperature,
        "Degree Fahrenheit",
        fahrenheit_to_celsius,
        celsius_to_fahrenheit,
    ),
    Unit::affine(
        "K",
        Domain::Temperature,
        "Kelvin",
        kelvin_to_celsius,
        celsius_to_kelvin,
    ),
    Unit::affine(
        "R",
        Domain::Temperature,
        "Degree Rankine",
        rankine_to_celsius,
        celsius_to_rankine,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(fahrenheit_to_celsius(-40.0), -40.0);
        assert!((celsius_to_kelvin(0.0) - 273.15).abs() < 1e-12);
        assert!((celsius_to_rankine(0.0) - 491.67).abs() < 1e-9);
    }

    #[test]
    fn test_fuel_consumption_is_reciprocal() {
        // 5 L/100km is 20 km/L
        assert!((l_per_100km_to_base(5.0) - 20.0).abs() < 1e-12);
        assert!((l_per_100km_from_base(20.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_factors_positive() {
        for table in [
            LENGTH, AREA, VOLUME, MASS, ENERGY, FORCE, SPEED, TIME, DATA_STORAGE, FUEL_EFFICIENCY, ANGLE,
            TEMPERATURE,
        ] {
            for unit in table {
                if let crate::units::Transform::Factor(factor) = unit.transform() {
                    assert!(factor > 0.0 && factor.is_finite(), "{} factor {}", unit.id, factor);
                }
            }
        }
    }
}
