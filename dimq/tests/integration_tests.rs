//! Integration-level tests for the `dimq` facade crate.

use dimq::*;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use std::io::Write;

fn q(text: &str) -> Quantity {
    Quantity::parse(text).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn smoke_test_prefix_parsing() {
    let (scale, km) = parse_unit("km").unwrap();
    let (_, m) = parse_unit("m").unwrap();
    assert_eq!(scale, 1000.0);
    assert_eq!(km, m);
    assert_eq!(km.coefficient(), 1.0);
}

#[test]
fn smoke_test_compound_expression() {
    let (scale, dim) = parse_unit("N*m**2/kg**2").unwrap();
    assert_relative_eq!(scale, 1e-3, max_relative = 1e-12);
    assert_eq!(dim, DimensionVector::from_integers([3, -1, -2, 0, 0, 0, 0], 1.0));
}

#[test]
fn smoke_test_parse_errors() {
    assert!(matches!(parse_unit("smoot"), Err(UnitError::UnknownUnit(_))));
    assert!(matches!(
        parse_unit("m/(s"),
        Err(UnitError::InvalidUnitExpression { .. })
    ));
    assert!(matches!(
        parse_unit("Celsius*s"),
        Err(UnitError::IncompatibleAffineUnit(_))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Quantities
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn smoke_test_length() {
    let d = q("1 mi");
    assert_abs_diff_eq!(d.value_as("km").unwrap(), 1.609344, epsilon = 1e-12);
}

#[test]
fn smoke_test_time() {
    let w = Quantity::unit("week").unwrap();
    assert_abs_diff_eq!(w.value_as("hour").unwrap(), 168.0, epsilon = 1e-9);
}

#[test]
fn smoke_test_mass() {
    let m = q("1000 kg");
    assert_abs_diff_eq!(m.value_as("tonne").unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!(m.value(), 1_000_000.0);
}

#[test]
fn smoke_test_pressure() {
    let p = q("760 mmHg");
    assert_relative_eq!(p.value_as("atm").unwrap(), 1.0, max_relative = 1e-6);
}

#[test]
fn smoke_test_energy() {
    let e = q("1 cal");
    assert_relative_eq!(e.value_as("J").unwrap(), 4.184, max_relative = 1e-12);
}

#[test]
fn smoke_test_temperature() {
    let freezing = Quantity::new(0.0, "Celsius").unwrap();
    let boiling = Quantity::new(100.0, "Celsius").unwrap();
    assert_abs_diff_eq!(freezing.value_as("Fahrenheit").unwrap(), 32.0, epsilon = 1e-4);
    assert_abs_diff_eq!(boiling.value_as("Fahrenheit").unwrap(), 212.0, epsilon = 1e-4);
}

#[test]
fn mass_per_length_then_affine_division_fails() {
    let per_length = (Quantity::new(16600.0, "mm**2").unwrap()
        * Quantity::new(2500.0, "kg/m**3").unwrap())
    .unwrap();
    assert_eq!(
        *per_length.dimension(),
        DimensionVector::from_integers([-1, 1, 0, 0, 0, 0, 0], 1.0)
    );
    let zero_c = Quantity::new(0.0, "Celsius").unwrap();
    assert!(matches!(
        per_length / zero_c,
        Err(UnitError::IncompatibleAffineUnit(_))
    ));
}

#[test]
fn equality_needs_matching_dimensions() {
    assert!(q("5 m").try_eq(&q("5 m")).unwrap());
    assert!(matches!(
        q("5 m").try_eq(&q("5 s")),
        Err(UnitError::IncompatibleUnits { .. })
    ));
}

#[test]
fn similar_units_of_newton() {
    assert_eq!(
        Quantity::similar_units("N").unwrap(),
        vec!["kgf", "lbf", "dyn", "pdl"]
    );
}

#[test]
fn physics_with_constants() {
    // Photon energy of 500 nm light: E = h*c/lambda
    let h = constant("h").unwrap();
    let c = constant("c").unwrap();
    let lambda = q("500 nm");
    let energy = ((h * c).unwrap() / lambda).unwrap();
    assert_relative_eq!(energy.value_as("eV").unwrap(), 2.4797, max_relative = 1e-3);

    // Free-fall distance after 2 s: d = g*t**2/2
    let t = q("2 s");
    let d = (constant("gravity").unwrap() * t.powi(2).unwrap()).unwrap() / 2.0;
    assert_relative_eq!(d.value_as("m").unwrap(), 19.6133, max_relative = 1e-12);
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting, records and configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn display_round_trips_through_parse() {
    for text in ["3.5 N", "9.8 m/s**2", "12 kOhm", "0.25 mol/litre", "7 V/m"] {
        let original = q(text);
        let reparsed = q(&original.to_string());
        assert!(original.try_eq(&reparsed).is_ok());
        assert_relative_eq!(original.value(), reparsed.value(), max_relative = 1e-12);
    }
}

#[test]
fn json_record_shape() {
    let json = serde_json::to_value(q("2 m/s")).unwrap();
    assert_eq!(json["value"], 2.0);
    assert_eq!(
        json["unit"],
        serde_json::json!([1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0])
    );

    let warm = serde_json::to_value(Quantity::new(25.0, "Celsius").unwrap()).unwrap();
    assert_eq!(warm["unit"].as_array().unwrap().len(), 9);
}

#[test]
fn json_round_trip_preserves_bits() {
    let originals = [
        q("1.2566370614e-6 N/A**2"),
        q("-0.1 mm**(3/2)"),
        Quantity::new(-40.0, "Fahrenheit").unwrap(),
    ];
    for original in originals {
        let json = serde_json::to_string(&original).unwrap();
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(original.value().to_bits(), back.value().to_bits());
        assert!(original.dimension().is_identical(back.dimension()));
    }
}

#[test]
fn format_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[format]\nprecision = 2\nnamed_units = true").unwrap();
    let config = FormatConfig::from_file(file.path()).unwrap();
    assert_eq!(q("1.5 kN").format_with(&config), "1500.00 N");
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_symbol_round_trips() {
    for symbol in table::symbols() {
        let x = -17.25;
        let back = Quantity::new(x, symbol).unwrap().value_as(symbol).unwrap();
        assert_relative_eq!(back, x, max_relative = 1e-9);
    }
}

#[test]
fn every_prefixed_base_unit_round_trips() {
    for prefix in table::prefixes() {
        for base in ["m", "g", "s", "A", "mol"] {
            let symbol = format!("{}{}", prefix, base);
            let back = Quantity::new(3.0, &symbol).unwrap().value_as(&symbol).unwrap();
            assert_relative_eq!(back, 3.0, max_relative = 1e-9);
        }
    }
}

fn unit_symbol() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["m", "km", "ft", "s", "hour", "kg", "lb", "N", "J", "W", "Pa", "V"])
}

proptest! {
    #[test]
    fn product_dimension_is_exponent_sum(a in unit_symbol(), b in unit_symbol(), x in 0.5f64..50.0) {
        let qa = Quantity::new(x, a).unwrap();
        let qb = Quantity::new(x, b).unwrap();
        let product = (qa * qb).unwrap();
        let quotient = (qa / qb).unwrap();
        for dim in BaseDimension::ALL {
            let ea = qa.dimension().exponent(dim);
            let eb = qb.dimension().exponent(dim);
            prop_assert_eq!(product.dimension().exponent(dim), ea.checked_add(eb).unwrap());
            prop_assert_eq!(quotient.dimension().exponent(dim), ea.checked_sub(eb).unwrap());
        }
    }

    #[test]
    fn self_division_is_one(a in unit_symbol(), x in 0.001f64..1e6) {
        let qa = Quantity::new(x, a).unwrap();
        let ratio = (qa / qa).unwrap();
        prop_assert!(ratio.is_dimensionless());
        prop_assert_eq!(ratio.value(), 1.0);
    }

    #[test]
    fn conversion_round_trip(a in unit_symbol(), x in -1e6f64..1e6) {
        let back = Quantity::new(x, a).unwrap().value_as(a).unwrap();
        prop_assert!((back - x).abs() <= 1e-9 * x.abs().max(1.0));
    }
}
