//! Runtime dimension-checked physical quantities.
//!
//! `dimq` is the user-facing crate in this workspace. It re-exports the full API from `dimq-core`: the
//! [`Quantity`] type, the unit expression [parser], the unit [table], named [constants] and formatting
//! configuration.
//!
//! The core idea is: a value is always a [`Quantity`], an `f64` magnitude in base units plus a [`DimensionVector`]
//! recording the powers of length, mass, time, current, temperature, amount and luminous intensity. Units are
//! written as strings (`"kg*m/s**2"`, `"mmHg"`, `"km/hour"`) and checked at run time.
//!
//! # What this crate solves
//!
//! - Arbitrary unit algebra from text: products, quotients, integer and rational powers, SI prefixes.
//! - Refuses to mix incompatible dimensions (you can't add metres to seconds, or compare them).
//! - Temperature scales with offsets (`Celsius`, `Fahrenheit`) for construction and conversion.
//!
//! # What this crate does not try to solve
//!
//! - Compile-time dimensional analysis: every check happens at run time.
//! - Exact arithmetic: magnitudes are `f64`.
//! - Locale-aware number parsing, or units beyond the built-in table.
//!
//! # Quick start
//!
//! ```rust
//! use dimq::Quantity;
//!
//! let distance = Quantity::parse("1000 km").unwrap();
//! let time = Quantity::parse("100 s").unwrap();
//! let speed = (distance / time).unwrap();
//! assert!((speed.value_as("m/s").unwrap() - 10_000.0).abs() < 1e-9);
//! println!("{}", speed); // 10000 m/s
//! ```
//!
//! # Incorrect usage (run-time error)
//!
//! ```rust
//! use dimq::{Quantity, UnitError};
//!
//! let d = Quantity::parse("1 km").unwrap();
//! let t = Quantity::parse("1 s").unwrap();
//! assert!(matches!(d + t, Err(UnitError::IncompatibleUnits { .. })));
//! ```
//!
//! # Modules
//!
//! - `dimq::table` (unit and prefix tables, symbol lookup)
//! - `dimq::parser` (unit expression grammar)
//! - `dimq::constants` (`c`, `G`, `h`, `mu0`, `gravity`, `e`, `k_B`, `N_A`)
//!
//! # Panics and errors
//!
//! No operation panics on bad input. Everything that can fail returns [`UnitResult`]; scalar multiplication and
//! division by `f64` are the only infallible arithmetic. Floating-point behavior follows IEEE-754.
//!
//! # SemVer and stability
//!
//! This workspace is currently `0.x`. Expect breaking changes between minor versions until `1.0`.
#![forbid(unsafe_code)]

pub use dimq_core::*;

pub use dimq_core::constants::constant;
