//! C-compatible FFI bindings for `dimq` quantities and unit expressions.
//!
//! `dimq-ffi` provides a stable C ABI for `dimq`, enabling interoperability with C/C++ code
//! and other languages with C FFI support. Units are passed as the same strings the Rust API
//! accepts (`"kg*m/s**2"`, `"Celsius"`), and quantities cross the boundary as the plain
//! [`DimqQuantity`] struct.
//!
//! # Features
//!
//! - **ABI-stable types**: `#[repr(C)]` [`DimqQuantity`] and `i32` status codes
//! - **C API**: `extern "C"` functions for parsing, conversion, arithmetic and constants
//! - **Rust helpers**: error-to-status mapping and pointer utilities for downstream crates
//!
//! # Quick Start (C/C++)
//!
//! Include the generated header (`include/dimq_ffi.h`) and link against the library:
//!
//! ```c
//! #include "dimq_ffi.h"
//!
//! DimqQuantity boiling;
//! dimq_quantity_make(100.0, "Celsius", &boiling);
//!
//! double fahrenheit;
//! int32_t status = dimq_quantity_value_as(boiling, "Fahrenheit", &fahrenheit);
//! if (status == DIMQ_OK) {
//!     // fahrenheit ~= 212.0
//! }
//! ```
//!
//! # Quick Start (Rust)
//!
//! ```rust
//! use dimq::Quantity;
//! use dimq_ffi::DimqQuantity;
//!
//! let speed = Quantity::parse("36 km/hour").unwrap();
//! let ffi: DimqQuantity = speed.into();
//! assert!((ffi.value - 10.0).abs() < 1e-12);
//!
//! let back: Quantity = ffi.try_into().unwrap();
//! assert!(back.try_eq(&speed).unwrap());
//! ```
//!
//! # ABI Stability
//!
//! The following are part of the ABI contract:
//!
//! - [`DimqQuantity`] memory layout
//! - Status code values ([`DIMQ_OK`], [`DIMQ_ERR_UNKNOWN_UNIT`], etc.)
//! - Function signatures of exported `extern "C"` functions
//!
//! # Error Handling
//!
//! All fallible FFI functions return status codes:
//!
//! - [`DIMQ_OK`] (0): Success
//! - [`DIMQ_ERR_UNKNOWN_UNIT`] (-1): Unknown unit symbol or constant name
//! - [`DIMQ_ERR_INCOMPATIBLE_DIM`] (-2): Dimension mismatch
//! - [`DIMQ_ERR_NULL_OUT`] (-3): Null output pointer
//! - [`DIMQ_ERR_INVALID_VALUE`] (-4): Invalid input string, number or quantity
//! - [`DIMQ_ERR_INVALID_EXPRESSION`] (-5): Malformed unit expression
//! - [`DIMQ_ERR_AFFINE_UNIT`] (-6): Affine unit used multiplicatively
//!
//! Failures are also reported through the `log` facade at `warn` level.
//!
//! # Thread Safety
//!
//! All functions are thread-safe. The only global state is the lazily built, immutable
//! constant table.

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// Core modules
mod ffi;
pub mod helpers;
mod types;

// Re-export FFI functions
pub use ffi::{
    dimq_constant, dimq_ffi_version, dimq_quantity_add, dimq_quantity_div, dimq_quantity_make,
    dimq_quantity_mul, dimq_quantity_parse, dimq_quantity_sub, dimq_quantity_value_as,
    dimq_unit_is_valid, dimq_units_compatible,
};

// Re-export types
pub use types::{
    DimqQuantity, DIMQ_BASE_COUNT, DIMQ_ERR_AFFINE_UNIT, DIMQ_ERR_INCOMPATIBLE_DIM,
    DIMQ_ERR_INVALID_EXPRESSION, DIMQ_ERR_INVALID_VALUE, DIMQ_ERR_NULL_OUT,
    DIMQ_ERR_UNKNOWN_UNIT, DIMQ_OK,
};
