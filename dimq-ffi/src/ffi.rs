//! Extern "C" API for FFI consumers.
//!
//! This module exposes `#[no_mangle] pub extern "C"` functions that form the stable C ABI
//! for `dimq-ffi`. Units, quantities and constant names are passed as NUL-terminated UTF-8
//! strings; quantities come back as [`DimqQuantity`] values.
//!
//! # Safety
//!
//! All functions in this module:
//! - Never panic across FFI boundaries (all panics are caught and converted to error codes)
//! - Validate all input pointers before use
//! - Return status codes to indicate success or failure
//!
//! # Status Codes
//!
//! - `DIMQ_OK` (0): Success
//! - `DIMQ_ERR_UNKNOWN_UNIT` (-1): Unrecognized unit symbol or constant name
//! - `DIMQ_ERR_INCOMPATIBLE_DIM` (-2): Operands have different dimensions
//! - `DIMQ_ERR_NULL_OUT` (-3): Required output pointer was null
//! - `DIMQ_ERR_INVALID_VALUE` (-4): Null/non-UTF-8 string, bad number or bad quantity
//! - `DIMQ_ERR_INVALID_EXPRESSION` (-5): Malformed unit expression
//! - `DIMQ_ERR_AFFINE_UNIT` (-6): Affine unit in a product, quotient or power

use core::ffi::c_char;

use dimq::{constants, parse_unit, Quantity};

use crate::helpers::{report, str_arg, try_from_ffi, write_out};
use crate::types::{DimqQuantity, DIMQ_ERR_INVALID_VALUE, DIMQ_ERR_NULL_OUT, DIMQ_ERR_UNKNOWN_UNIT};

// =============================================================================
// Helper macro to catch panics
// =============================================================================

/// Catches any panic and returns an error code instead of unwinding across FFI.
macro_rules! catch_panic {
    ($default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(result) => result,
            Err(_) => {
                log::warn!("panic caught at the FFI boundary");
                $default
            }
        }
    }};
}

/// Unwraps a `Result<T, i32>` or returns the status code.
macro_rules! status_try {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(status) => return status,
        }
    };
}

/// ABI version of this library.
///
/// Bumped whenever an exported signature or the layout of [`DimqQuantity`] changes.
#[no_mangle]
pub extern "C" fn dimq_ffi_version() -> u32 {
    1
}

// =============================================================================
// Unit Validation Functions
// =============================================================================

/// Checks whether a unit expression parses.
///
/// Returns `false` for a null pointer, non-UTF-8 input or any parse error.
///
/// # Safety
///
/// `unit` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dimq_unit_is_valid(unit: *const c_char) -> bool {
    catch_panic!(false, {
        // SAFETY: forwarded caller contract
        match unsafe { str_arg(unit) } {
            Ok(expr) => parse_unit(expr).is_ok(),
            Err(_) => false,
        }
    })
}

/// Checks whether two unit expressions have the same dimension.
///
/// # Returns
///
/// * `DIMQ_OK` on success, with the answer written to `out`
/// * `DIMQ_ERR_NULL_OUT` if `out` is null
/// * any parse status if either expression is invalid
///
/// # Safety
///
/// `a` and `b` must be null or NUL-terminated strings; `out` must be null or
/// point to writable memory for a `bool`.
#[no_mangle]
pub unsafe extern "C" fn dimq_units_compatible(
    a: *const c_char,
    b: *const c_char,
    out: *mut bool,
) -> i32 {
    catch_panic!(DIMQ_ERR_INVALID_VALUE, {
        if out.is_null() {
            return DIMQ_ERR_NULL_OUT;
        }
        // SAFETY: forwarded caller contract
        let a = status_try!(unsafe { str_arg(a) });
        let b = status_try!(unsafe { str_arg(b) });
        let (_, da) = status_try!(report("dimq_units_compatible", parse_unit(a)));
        let (_, db) = status_try!(report("dimq_units_compatible", parse_unit(b)));
        // SAFETY: checked non-null above
        unsafe { write_out(out, da.dimensionally_equal(&db)) }
    })
}

// =============================================================================
// Quantity Construction and Conversion Functions
// =============================================================================

/// Creates a quantity of `value` in `unit`.
///
/// # Returns
///
/// * `DIMQ_OK` on success
/// * `DIMQ_ERR_NULL_OUT` if `out` is null
/// * `DIMQ_ERR_UNKNOWN_UNIT`, `DIMQ_ERR_INVALID_EXPRESSION` or
///   `DIMQ_ERR_INVALID_VALUE` if `unit` does not parse
///
/// # Safety
///
/// `unit` must be null or a NUL-terminated string; `out` must be null or point
/// to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_make(
    value: f64,
    unit: *const c_char,
    out: *mut DimqQuantity,
) -> i32 {
    catch_panic!(DIMQ_ERR_INVALID_VALUE, {
        if out.is_null() {
            return DIMQ_ERR_NULL_OUT;
        }
        // SAFETY: forwarded caller contract
        let unit = status_try!(unsafe { str_arg(unit) });
        let q = status_try!(report("dimq_quantity_make", Quantity::new(value, unit)));
        // SAFETY: checked non-null above
        unsafe { write_out(out, q.into()) }
    })
}

/// Parses a combined `"<number> <unit>"` string.
///
/// # Safety
///
/// `text` must be null or a NUL-terminated string; `out` must be null or point
/// to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_parse(
    text: *const c_char,
    out: *mut DimqQuantity,
) -> i32 {
    catch_panic!(DIMQ_ERR_INVALID_VALUE, {
        if out.is_null() {
            return DIMQ_ERR_NULL_OUT;
        }
        // SAFETY: forwarded caller contract
        let text = status_try!(unsafe { str_arg(text) });
        let q = status_try!(report("dimq_quantity_parse", Quantity::parse(text)));
        // SAFETY: checked non-null above
        unsafe { write_out(out, q.into()) }
    })
}

/// Reads a quantity's magnitude in `unit`.
///
/// # Returns
///
/// * `DIMQ_OK` on success
/// * `DIMQ_ERR_NULL_OUT` if `out` is null
/// * `DIMQ_ERR_INCOMPATIBLE_DIM` if `unit` has a different dimension
/// * `DIMQ_ERR_INVALID_VALUE` if `src` is not a valid quantity
///
/// # Safety
///
/// `unit` must be null or a NUL-terminated string; `out` must be null or point
/// to writable memory for an `f64`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_value_as(
    src: DimqQuantity,
    unit: *const c_char,
    out: *mut f64,
) -> i32 {
    catch_panic!(DIMQ_ERR_INVALID_VALUE, {
        if out.is_null() {
            return DIMQ_ERR_NULL_OUT;
        }
        let q = status_try!(try_from_ffi(src));
        // SAFETY: forwarded caller contract
        let unit = status_try!(unsafe { str_arg(unit) });
        let value = status_try!(report("dimq_quantity_value_as", q.value_as(unit)));
        // SAFETY: checked non-null above
        unsafe { write_out(out, value) }
    })
}

// =============================================================================
// Arithmetic Functions
// =============================================================================

/// Shared body of the binary arithmetic functions.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `DimqQuantity`.
unsafe fn binary_op(
    name: &str,
    a: DimqQuantity,
    b: DimqQuantity,
    out: *mut DimqQuantity,
    op: fn(&Quantity, &Quantity) -> dimq::UnitResult<Quantity>,
) -> i32 {
    if out.is_null() {
        return DIMQ_ERR_NULL_OUT;
    }
    let a = status_try!(try_from_ffi(a));
    let b = status_try!(try_from_ffi(b));
    let result = status_try!(report(name, op(&a, &b)));
    // SAFETY: checked non-null above
    unsafe { write_out(out, result.into()) }
}

/// Adds two quantities of equal dimension.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_add(
    a: DimqQuantity,
    b: DimqQuantity,
    out: *mut DimqQuantity,
) -> i32 {
    // SAFETY: forwarded caller contract
    catch_panic!(DIMQ_ERR_INVALID_VALUE, unsafe {
        binary_op("dimq_quantity_add", a, b, out, Quantity::try_add)
    })
}

/// Subtracts two quantities of equal dimension.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_sub(
    a: DimqQuantity,
    b: DimqQuantity,
    out: *mut DimqQuantity,
) -> i32 {
    // SAFETY: forwarded caller contract
    catch_panic!(DIMQ_ERR_INVALID_VALUE, unsafe {
        binary_op("dimq_quantity_sub", a, b, out, Quantity::try_sub)
    })
}

/// Multiplies two quantities.
///
/// Fails with `DIMQ_ERR_AFFINE_UNIT` when either operand carries an offset.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_mul(
    a: DimqQuantity,
    b: DimqQuantity,
    out: *mut DimqQuantity,
) -> i32 {
    // SAFETY: forwarded caller contract
    catch_panic!(DIMQ_ERR_INVALID_VALUE, unsafe {
        binary_op("dimq_quantity_mul", a, b, out, Quantity::try_mul)
    })
}

/// Divides two quantities.
///
/// Fails with `DIMQ_ERR_AFFINE_UNIT` when either operand carries an offset.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_quantity_div(
    a: DimqQuantity,
    b: DimqQuantity,
    out: *mut DimqQuantity,
) -> i32 {
    // SAFETY: forwarded caller contract
    catch_panic!(DIMQ_ERR_INVALID_VALUE, unsafe {
        binary_op("dimq_quantity_div", a, b, out, Quantity::try_div)
    })
}

// =============================================================================
// Constants
// =============================================================================

/// Looks up a named physical constant (`"c"`, `"G"`, `"h"`, …).
///
/// # Returns
///
/// * `DIMQ_OK` on success
/// * `DIMQ_ERR_NULL_OUT` if `out` is null
/// * `DIMQ_ERR_UNKNOWN_UNIT` if no constant has that name
///
/// # Safety
///
/// `name` must be null or a NUL-terminated string; `out` must be null or point
/// to writable memory for a `DimqQuantity`.
#[no_mangle]
pub unsafe extern "C" fn dimq_constant(name: *const c_char, out: *mut DimqQuantity) -> i32 {
    catch_panic!(DIMQ_ERR_INVALID_VALUE, {
        if out.is_null() {
            return DIMQ_ERR_NULL_OUT;
        }
        // SAFETY: forwarded caller contract
        let name = status_try!(unsafe { str_arg(name) });
        match constants::constant(name) {
            // SAFETY: checked non-null above
            Some(q) => unsafe { write_out(out, q.into()) },
            None => {
                log::warn!("dimq_constant failed: no constant named {}", name);
                DIMQ_ERR_UNKNOWN_UNIT
            }
        }
    })
}
