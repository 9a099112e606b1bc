//! Conversions between `dimq` results and the C ABI.
//!
//! Downstream Rust crates exposing their own C API can use these to report
//! errors with the same status codes as `dimq-ffi`.
//!
//! ```rust
//! use dimq::Quantity;
//! use dimq_ffi::{helpers, DimqQuantity, DIMQ_ERR_UNKNOWN_UNIT};
//!
//! let ffi: DimqQuantity = Quantity::parse("3 km").unwrap().into();
//! assert_eq!(ffi.value, 3000.0);
//!
//! let err = Quantity::parse("3 furlong").unwrap_err();
//! assert_eq!(helpers::status_of(&err), DIMQ_ERR_UNKNOWN_UNIT);
//! ```

use core::ffi::c_char;
use std::ffi::CStr;

use dimq::{Quantity, UnitError, UnitResult};

use crate::types::{
    DimqQuantity, DIMQ_ERR_AFFINE_UNIT, DIMQ_ERR_INCOMPATIBLE_DIM, DIMQ_ERR_INVALID_EXPRESSION,
    DIMQ_ERR_INVALID_VALUE, DIMQ_ERR_NULL_OUT, DIMQ_ERR_UNKNOWN_UNIT, DIMQ_OK,
};

/// Maps a [`UnitError`] to its status code.
pub fn status_of(err: &UnitError) -> i32 {
    match err {
        UnitError::UnknownUnit(_) => DIMQ_ERR_UNKNOWN_UNIT,
        UnitError::IncompatibleUnits { .. } => DIMQ_ERR_INCOMPATIBLE_DIM,
        UnitError::InvalidUnitExpression { .. } => DIMQ_ERR_INVALID_EXPRESSION,
        UnitError::IncompatibleAffineUnit(_) => DIMQ_ERR_AFFINE_UNIT,
        UnitError::MalformedLiteral(_)
        | UnitError::MissingUnit(_)
        | UnitError::InvalidRecord(_)
        | UnitError::Configuration(_) => DIMQ_ERR_INVALID_VALUE,
    }
}

/// Converts an FFI quantity back into a [`Quantity`].
pub fn try_from_ffi(q: DimqQuantity) -> Result<Quantity, i32> {
    q.try_into()
}

/// Borrows a NUL-terminated UTF-8 string argument.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for `'a`.
pub unsafe fn str_arg<'a>(ptr: *const c_char) -> Result<&'a str, i32> {
    if ptr.is_null() {
        return Err(DIMQ_ERR_INVALID_VALUE);
    }
    // SAFETY: the caller guarantees a valid NUL-terminated string
    let raw = unsafe { CStr::from_ptr(ptr) };
    raw.to_str().map_err(|_| DIMQ_ERR_INVALID_VALUE)
}

/// Writes `value` through `out`, returning the status of the call.
///
/// # Safety
///
/// `out` must be null or point to writable memory for a `T`.
pub unsafe fn write_out<T>(out: *mut T, value: T) -> i32 {
    if out.is_null() {
        return DIMQ_ERR_NULL_OUT;
    }
    // SAFETY: checked non-null above, validity is the caller's contract
    unsafe { *out = value };
    DIMQ_OK
}

/// Folds a `dimq` result into a status code, logging failures.
pub(crate) fn report<T>(op: &str, result: UnitResult<T>) -> Result<T, i32> {
    result.map_err(|e| {
        log::warn!("{} failed: {}", op, e);
        status_of(&e)
    })
}
