//! Core engine for runtime dimension-checked quantities.
//!
//! `dimq-core` models a physical quantity as an `f64` magnitude in base units
//! plus a [`DimensionVector`]: seven rational exponents over the base
//! dimensions (length, mass, time, current, temperature, amount, luminous
//! intensity), a scale coefficient and an additive offset for affine units.
//!
//! - A static [unit table](table) maps symbols (`m`, `N`, `psi`, `Celsius`, …)
//!   to dimension vectors; SI prefixes (`k`, `m`, `da`, …) compose with them.
//! - The [parser] turns expressions such as `kg*m/s**2` into a scale and a
//!   canonical vector.
//! - [`Quantity`] carries the magnitude and checks dimensions on every
//!   operation, returning [`UnitError`] instead of coercing.
//!
//! Most users should depend on `dimq` (the facade crate).
//!
//! # Quick start
//!
//! ```rust
//! use dimq_core::Quantity;
//!
//! let area = Quantity::parse("16600 mm**2").unwrap();
//! let density = Quantity::parse("2500 kg/m**3").unwrap();
//! let per_length = (area * density).unwrap();
//! assert!((per_length.value_as("kg/m").unwrap() - 41.5).abs() < 1e-9);
//! ```
//!
//! Mismatched dimensions are errors, never silent `false`s:
//!
//! ```rust
//! use dimq_core::{Quantity, UnitError};
//!
//! let d = Quantity::parse("5 m").unwrap();
//! let t = Quantity::parse("5 s").unwrap();
//! assert!(matches!(d + t, Err(UnitError::IncompatibleUnits { .. })));
//! assert!(d.try_lt(&t).is_err());
//! ```
//!
//! # Base units
//!
//! Mass is tracked in **grams**, so `N` has coefficient `1000` and `kg` is
//! simply the `k` prefix on `g`. All other dimensions use SI base units.
//!
//! # Affine units
//!
//! `Celsius` and `Fahrenheit` carry an offset. They may be used alone to build
//! or read a quantity, but never inside a product, quotient or power:
//!
//! ```rust
//! use dimq_core::{Quantity, UnitError};
//!
//! let t = Quantity::new(20.0, "Celsius").unwrap();
//! assert!((t.value_as("Fahrenheit").unwrap() - 68.0).abs() < 1e-4);
//! assert!(matches!(
//!     Quantity::parse("1 Celsius/s"),
//!     Err(UnitError::IncompatibleAffineUnit(_))
//! ));
//! ```
//!
//! # Logging
//!
//! Token resolution is logged at `trace`, parsed expressions at `debug`, via
//! the `log` facade. No logger is installed by this crate.

#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod config;
mod dimension;
mod error;
mod exponent;
mod quantity;

pub mod constants;
pub mod parser;
pub mod table;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use config::FormatConfig;
pub use dimension::{BaseDimension, DimensionVector, BASE_COUNT};
pub use error::{UnitError, UnitResult};
pub use exponent::Exponent;
pub use parser::parse as parse_unit;
pub use quantity::{Quantity, QuantityRecord, UnitSpec};
