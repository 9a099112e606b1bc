//! Integration tests for dimq-ffi.
//!
//! These tests verify the FFI functions work correctly from a consumer's perspective.

use approx::assert_relative_eq;
use dimq_ffi::{
    dimq_constant, dimq_ffi_version, dimq_quantity_add, dimq_quantity_div, dimq_quantity_make,
    dimq_quantity_mul, dimq_quantity_parse, dimq_quantity_sub, dimq_quantity_value_as,
    dimq_unit_is_valid, dimq_units_compatible, DimqQuantity, DIMQ_ERR_AFFINE_UNIT,
    DIMQ_ERR_INCOMPATIBLE_DIM, DIMQ_ERR_INVALID_EXPRESSION, DIMQ_ERR_INVALID_VALUE,
    DIMQ_ERR_NULL_OUT, DIMQ_ERR_UNKNOWN_UNIT, DIMQ_OK,
};
use std::ffi::{CStr, CString};

fn make(value: f64, unit: &CStr) -> DimqQuantity {
    let mut out = DimqQuantity::default();
    let status = unsafe { dimq_quantity_make(value, unit.as_ptr(), &mut out) };
    assert_eq!(status, DIMQ_OK, "making {} {:?}", value, unit);
    out
}

fn value_as(q: DimqQuantity, unit: &CStr) -> Result<f64, i32> {
    let mut out = 0.0;
    match unsafe { dimq_quantity_value_as(q, unit.as_ptr(), &mut out) } {
        DIMQ_OK => Ok(out),
        status => Err(status),
    }
}

// =============================================================================
// Unit Validation Tests
// =============================================================================

#[test]
fn test_table_units_are_valid() {
    for symbol in dimq::table::symbols() {
        let c = CString::new(symbol).unwrap();
        assert!(
            unsafe { dimq_unit_is_valid(c.as_ptr()) },
            "Unit {} should be valid",
            symbol
        );
    }
}

#[test]
fn test_invalid_units() {
    for text in [c"", c"furlong", c"m**", c"(m", c"Celsius/s"] {
        assert!(!unsafe { dimq_unit_is_valid(text.as_ptr()) }, "{:?}", text);
    }
}

#[test]
fn test_deeply_nested_unit_is_rejected() {
    let deep = CString::new(format!("{}m{}", "(".repeat(2000), ")".repeat(2000))).unwrap();
    assert!(!unsafe { dimq_unit_is_valid(deep.as_ptr()) });

    let mut q = DimqQuantity::default();
    let status = unsafe { dimq_quantity_make(1.0, deep.as_ptr(), &mut q) };
    assert_eq!(status, DIMQ_ERR_INVALID_EXPRESSION);
}

#[test]
fn test_compatible_units() {
    let pairs = [
        (c"m", c"ft", true),
        (c"N", c"kg*m/s**2", true),
        (c"J", c"eV", true),
        (c"Celsius", c"K", true),
        (c"m", c"s", false),
        (c"Pa", c"N", false),
    ];
    for (a, b, expected) in pairs {
        let mut out = !expected;
        let status = unsafe { dimq_units_compatible(a.as_ptr(), b.as_ptr(), &mut out) };
        assert_eq!(status, DIMQ_OK);
        assert_eq!(out, expected, "{:?} vs {:?}", a, b);
    }
}

#[test]
fn test_compatible_units_errors() {
    let mut out = false;
    let status = unsafe { dimq_units_compatible(c"m".as_ptr(), c"smoot".as_ptr(), &mut out) };
    assert_eq!(status, DIMQ_ERR_UNKNOWN_UNIT);

    let status = unsafe {
        dimq_units_compatible(c"m".as_ptr(), c"s".as_ptr(), core::ptr::null_mut())
    };
    assert_eq!(status, DIMQ_ERR_NULL_OUT);
}

// =============================================================================
// Construction and Conversion Tests
// =============================================================================

#[test]
fn test_temperature_conversion() {
    let freezing = make(0.0, c"Celsius");
    let boiling = make(100.0, c"Celsius");
    assert!((value_as(freezing, c"Fahrenheit").unwrap() - 32.0).abs() < 1e-4);
    assert!((value_as(boiling, c"Fahrenheit").unwrap() - 212.0).abs() < 1e-4);
    assert_eq!(freezing.offset, 273.15);
}

#[test]
fn test_parse_combined_string() {
    let mut q = DimqQuantity::default();
    let status = unsafe { dimq_quantity_parse(c"9.80665 m/s**2".as_ptr(), &mut q) };
    assert_eq!(status, DIMQ_OK);
    assert_eq!(q.value, 9.80665);
    assert_eq!(q.exponents, [1.0, 0.0, -2.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_parse_errors() {
    let mut q = DimqQuantity::default();
    let status = unsafe { dimq_quantity_parse(c"fast m/s".as_ptr(), &mut q) };
    assert_eq!(status, DIMQ_ERR_INVALID_VALUE);
    let status = unsafe { dimq_quantity_parse(c"12".as_ptr(), &mut q) };
    assert_eq!(status, DIMQ_ERR_INVALID_VALUE);
    let status = unsafe { dimq_quantity_parse(core::ptr::null(), &mut q) };
    assert_eq!(status, DIMQ_ERR_INVALID_VALUE);
    let status = unsafe { dimq_quantity_parse(c"1 m".as_ptr(), core::ptr::null_mut()) };
    assert_eq!(status, DIMQ_ERR_NULL_OUT);
}

#[test]
fn test_value_as_incompatible() {
    let q = make(3.0, c"m");
    assert_eq!(value_as(q, c"s"), Err(DIMQ_ERR_INCOMPATIBLE_DIM));
    assert_eq!(value_as(q, c"parsec"), Err(DIMQ_ERR_UNKNOWN_UNIT));
}

#[test]
fn test_fractional_exponents_cross_the_boundary() {
    let a = make(1.0, c"m**(1/4)");
    let b = make(1.0, c"m**(1/5)");
    let mut product = DimqQuantity::default();
    assert_eq!(unsafe { dimq_quantity_mul(a, b, &mut product) }, DIMQ_OK);
    assert_eq!(product.exponents[0], 0.45);
    assert_relative_eq!(value_as(product, c"m**(9/20)").unwrap(), 1.0);

    let root = make(2.0, c"m**(1/13)");
    assert_relative_eq!(value_as(root, c"m**(1/13)").unwrap(), 2.0);
}

#[test]
fn test_value_as_rejects_corrupt_quantity() {
    let mut q = make(3.0, c"m");
    q.exponents[0] = 0.4142;
    assert_eq!(value_as(q, c"m"), Err(DIMQ_ERR_INVALID_VALUE));
}

// =============================================================================
// Arithmetic Tests
// =============================================================================

#[test]
fn test_add_and_sub() {
    let a = make(1.0, c"km");
    let b = make(250.0, c"m");
    let mut out = DimqQuantity::default();

    assert_eq!(unsafe { dimq_quantity_add(a, b, &mut out) }, DIMQ_OK);
    assert_relative_eq!(out.value, 1250.0);

    assert_eq!(unsafe { dimq_quantity_sub(a, b, &mut out) }, DIMQ_OK);
    assert_relative_eq!(out.value, 750.0);

    let t = make(1.0, c"s");
    assert_eq!(
        unsafe { dimq_quantity_add(a, t, &mut out) },
        DIMQ_ERR_INCOMPATIBLE_DIM
    );
}

#[test]
fn test_mul_and_div() {
    let section = make(16600.0, c"mm**2");
    let density = make(2500.0, c"kg/m**3");
    let mut per_length = DimqQuantity::default();
    assert_eq!(
        unsafe { dimq_quantity_mul(section, density, &mut per_length) },
        DIMQ_OK
    );
    assert_eq!(per_length.exponents, [-1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(
        value_as(per_length, c"kg/m").unwrap(),
        41.5,
        max_relative = 1e-12
    );

    let zero_c = make(0.0, c"Celsius");
    let mut out = DimqQuantity::default();
    assert_eq!(
        unsafe { dimq_quantity_div(per_length, zero_c, &mut out) },
        DIMQ_ERR_AFFINE_UNIT
    );
    assert_eq!(
        unsafe { dimq_quantity_div(per_length, section, core::ptr::null_mut()) },
        DIMQ_ERR_NULL_OUT
    );
}

// =============================================================================
// Constants and Version
// =============================================================================

#[test]
fn test_speed_of_light() {
    let mut c = DimqQuantity::default();
    assert_eq!(unsafe { dimq_constant(c"c".as_ptr(), &mut c) }, DIMQ_OK);
    assert_relative_eq!(value_as(c, c"km/s").unwrap(), 299_792.458, max_relative = 1e-12);
}

#[test]
fn test_unknown_constant() {
    let mut out = DimqQuantity::default();
    assert_eq!(
        unsafe { dimq_constant(c"planck".as_ptr(), &mut out) },
        DIMQ_ERR_UNKNOWN_UNIT
    );
    assert_eq!(
        unsafe { dimq_constant(c"G".as_ptr(), core::ptr::null_mut()) },
        DIMQ_ERR_NULL_OUT
    );
}

#[test]
fn test_ffi_version() {
    assert_eq!(dimq_ffi_version(), 1);
}
