//! Unit and metric-prefix tables.
//!
//! Both tables are `static` data and are never mutated, so lookups need no
//! synchronisation. Magnitudes are expressed in the base units `m`, `g`, `s`,
//! `A`, `K`, `mol` and `cd`; note that the mass base is the gram, which is why
//! `N` carries a coefficient of 1000.
//!
//! # Lookup order
//!
//! [`lookup_prefixed`] tries the token verbatim first (`mmHg`, `cd`, `Pa`),
//! then two-character prefixes (`dam`), then one-character prefixes (`km`).

use once_cell::sync::Lazy;

use crate::dimension::{DimensionVector, BASE_COUNT};
use crate::error::{UnitError, UnitResult};

/// One row of the unit table.
#[derive(Clone, Copy, Debug)]
pub struct UnitDef {
    /// Symbol as written in unit expressions.
    pub symbol: &'static str,
    /// Exponents over `[L, M, T, I, Θ, N, J]`.
    pub exponents: [i32; BASE_COUNT],
    /// Magnitude of one unit in base units.
    pub coefficient: f64,
    /// Additive offset, zero except for affine temperature scales.
    pub offset: f64,
}

impl UnitDef {
    const fn new(symbol: &'static str, exponents: [i32; BASE_COUNT], coefficient: f64) -> Self {
        Self {
            symbol,
            exponents,
            coefficient,
            offset: 0.0,
        }
    }

    const fn affine(
        symbol: &'static str,
        exponents: [i32; BASE_COUNT],
        coefficient: f64,
        offset: f64,
    ) -> Self {
        Self {
            symbol,
            exponents,
            coefficient,
            offset,
        }
    }

    /// Dimension vector described by this row.
    pub const fn dimension(&self) -> DimensionVector {
        DimensionVector::from_integers(self.exponents, self.coefficient).with_offset(self.offset)
    }
}

/// A metric prefix and its multiplier.
#[derive(Clone, Copy, Debug)]
pub struct Prefix {
    pub symbol: &'static str,
    pub factor: f64,
}

const fn prefix(symbol: &'static str, factor: f64) -> Prefix {
    Prefix { symbol, factor }
}

/// Metric prefixes, smallest to largest.
pub static PREFIXES: &[Prefix] = &[
    prefix("a", 1e-18),
    prefix("f", 1e-15),
    prefix("p", 1e-12),
    prefix("n", 1e-9),
    prefix("u", 1e-6),
    prefix("m", 1e-3),
    prefix("c", 1e-2),
    prefix("d", 1e-1),
    prefix("da", 1e1),
    prefix("h", 1e2),
    prefix("k", 1e3),
    prefix("M", 1e6),
    prefix("G", 1e9),
    prefix("T", 1e12),
    prefix("P", 1e15),
    prefix("E", 1e18),
];

/// [`PREFIXES`] with longer symbols first, so `da` is never read as `d` + `a…`.
static PREFIX_SEARCH_ORDER: Lazy<Vec<&'static Prefix>> = Lazy::new(|| {
    let mut order: Vec<&'static Prefix> = PREFIXES.iter().collect();
    order.sort_by_key(|p| core::cmp::Reverse(p.symbol.len()));
    order
});

const DAY: f64 = 24.0 * 3600.0;

/// The unit table.
///
/// The seven base units come first and in exponent order; formatting relies on
/// the first row matching a dimension being the preferred display symbol.
pub static UNITS: &[UnitDef] = &[
    UnitDef::new("m", [1, 0, 0, 0, 0, 0, 0], 1.0),
    UnitDef::new("g", [0, 1, 0, 0, 0, 0, 0], 1.0),
    UnitDef::new("s", [0, 0, 1, 0, 0, 0, 0], 1.0),
    UnitDef::new("A", [0, 0, 0, 1, 0, 0, 0], 1.0),
    UnitDef::new("K", [0, 0, 0, 0, 1, 0, 0], 1.0),
    UnitDef::new("mol", [0, 0, 0, 0, 0, 1, 0], 1.0),
    UnitDef::new("cd", [0, 0, 0, 0, 0, 0, 1], 1.0),
    // length, area, volume
    UnitDef::new("hectare", [2, 0, 0, 0, 0, 0, 0], 10000.0),
    UnitDef::new("litre", [3, 0, 0, 0, 0, 0, 0], 0.001),
    UnitDef::new("in", [1, 0, 0, 0, 0, 0, 0], 0.0254),
    UnitDef::new("ft", [1, 0, 0, 0, 0, 0, 0], 0.3048),
    UnitDef::new("yd", [1, 0, 0, 0, 0, 0, 0], 0.9144),
    UnitDef::new("mi", [1, 0, 0, 0, 0, 0, 0], 1609.344),
    // time
    UnitDef::new("Hz", [0, 0, -1, 0, 0, 0, 0], 1.0),
    UnitDef::new("year", [0, 0, 1, 0, 0, 0, 0], 365.0 * DAY),
    UnitDef::new("week", [0, 0, 1, 0, 0, 0, 0], 7.0 * DAY),
    UnitDef::new("day", [0, 0, 1, 0, 0, 0, 0], DAY),
    UnitDef::new("minute", [0, 0, 1, 0, 0, 0, 0], 60.0),
    UnitDef::new("hour", [0, 0, 1, 0, 0, 0, 0], 3600.0),
    // mass
    UnitDef::new("tonne", [0, 1, 0, 0, 0, 0, 0], 1_000_000.0),
    UnitDef::new("oz", [0, 1, 0, 0, 0, 0, 0], 28.349523125),
    UnitDef::new("lb", [0, 1, 0, 0, 0, 0, 0], 453.59237),
    // force
    UnitDef::new("N", [1, 1, -2, 0, 0, 0, 0], 1000.0),
    UnitDef::new("kgf", [1, 1, -2, 0, 0, 0, 0], 9806.65),
    UnitDef::new("lbf", [1, 1, -2, 0, 0, 0, 0], 4448.222),
    UnitDef::new("dyn", [1, 1, -2, 0, 0, 0, 0], 0.01),
    UnitDef::new("pdl", [1, 1, -2, 0, 0, 0, 0], 138.255),
    // temperature
    UnitDef::affine("Celsius", [0, 0, 0, 0, 1, 0, 0], 1.0, 273.15),
    UnitDef::affine("Fahrenheit", [0, 0, 0, 0, 1, 0, 0], 5.0 / 9.0, 255.37222),
    // pressure
    UnitDef::new("Pa", [-1, 1, -2, 0, 0, 0, 0], 1000.0),
    UnitDef::new("bar", [-1, 1, -2, 0, 0, 0, 0], 100_000_000.0),
    UnitDef::new("psi", [-1, 1, -2, 0, 0, 0, 0], 6_894_760.0),
    UnitDef::new("ksi", [-1, 1, -2, 0, 0, 0, 0], 6_894_760_000.0),
    UnitDef::new("mmHg", [-1, 1, -2, 0, 0, 0, 0], 133_322.3684),
    UnitDef::new("atm", [-1, 1, -2, 0, 0, 0, 0], 101_325_000.0),
    // energy
    UnitDef::new("J", [2, 1, -2, 0, 0, 0, 0], 1000.0),
    UnitDef::new("eV", [2, 1, -2, 0, 0, 0, 0], 1.60217553e-11),
    UnitDef::new("cal", [2, 1, -2, 0, 0, 0, 0], 4184.0),
    UnitDef::new("BTU", [2, 1, -2, 0, 0, 0, 0], 1_055_056.0),
    // power
    UnitDef::new("W", [2, 1, -3, 0, 0, 0, 0], 1000.0),
    // electromagnetism
    UnitDef::new("C", [0, 0, 1, 1, 0, 0, 0], 1.0),
    UnitDef::new("V", [2, 1, -3, -1, 0, 0, 0], 1000.0),
    UnitDef::new("F", [-2, -1, 4, 2, 0, 0, 0], 0.001),
    UnitDef::new("Ohm", [2, 1, -3, -2, 0, 0, 0], 1000.0),
    UnitDef::new("Siemens", [-2, -1, 3, 2, 0, 0, 0], 0.001),
    UnitDef::new("Wb", [2, 1, -2, -1, 0, 0, 0], 1000.0),
    UnitDef::new("T", [0, 1, -2, -1, 0, 0, 0], 1000.0),
    UnitDef::new("H", [2, 1, -2, -2, 0, 0, 0], 1000.0),
    // photometry, catalysis
    UnitDef::new("lx", [-2, 0, 0, 0, 0, 0, 1], 1.0),
    UnitDef::new("kat", [0, 0, -1, 0, 0, 1, 0], 1.0),
];

/// Returns the table row for an exact, unprefixed symbol.
pub fn find(symbol: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|def| def.symbol == symbol)
}

/// Dimension vector of an exact, unprefixed symbol.
///
/// ```rust
/// use dimq_core::table;
/// let newton = table::lookup("N").unwrap();
/// assert_eq!(newton.coefficient(), 1000.0);
/// assert!(table::lookup("kN").is_none());
/// ```
pub fn lookup(symbol: &str) -> Option<DimensionVector> {
    find(symbol).map(UnitDef::dimension)
}

/// Returns the multiplier of a prefix symbol.
pub fn prefix_factor(symbol: &str) -> Option<f64> {
    PREFIXES.iter().find(|p| p.symbol == symbol).map(|p| p.factor)
}

/// Resolves a possibly prefixed unit token to `(prefix scale, dimension)`.
///
/// ```rust
/// use dimq_core::table;
/// let (scale, dim) = table::lookup_prefixed("km").unwrap();
/// assert_eq!(scale, 1000.0);
/// assert_eq!(dim, table::lookup("m").unwrap());
/// ```
///
/// # Errors
///
/// [`UnitError::UnknownUnit`] when neither the token nor any prefix/suffix
/// split of it is in the table.
pub fn lookup_prefixed(token: &str) -> UnitResult<(f64, DimensionVector)> {
    if let Some(dim) = lookup(token) {
        log::trace!("resolved unit '{}' verbatim", token);
        return Ok((1.0, dim));
    }

    for p in PREFIX_SEARCH_ORDER.iter() {
        let Some(rest) = token.strip_prefix(p.symbol) else {
            continue;
        };
        if let Some(dim) = lookup(rest) {
            log::trace!(
                "resolved unit '{}' as prefix '{}' on '{}'",
                token,
                p.symbol,
                rest
            );
            return Ok((p.factor, dim));
        }
    }

    Err(UnitError::UnknownUnit(token.to_string()))
}

/// All table symbols, in table order.
pub fn symbols() -> impl Iterator<Item = &'static str> {
    UNITS.iter().map(|def| def.symbol)
}

/// All prefix symbols, in table order.
pub fn prefixes() -> impl Iterator<Item = &'static str> {
    PREFIXES.iter().map(|p| p.symbol)
}

/// First table row whose exponents equal those of `dimension`.
pub fn named_unit(dimension: &DimensionVector) -> Option<&'static UnitDef> {
    UNITS
        .iter()
        .find(|def| def.dimension().dimensionally_equal(dimension))
}

/// Symbol of the first table row dimensionally equal to `dimension`.
pub fn named_symbol(dimension: &DimensionVector) -> Option<&'static str> {
    named_unit(dimension).map(|def| def.symbol)
}

/// Every table symbol dimensionally equal to `dimension`, except `exclude`.
pub fn similar_units(dimension: &DimensionVector, exclude: &str) -> Vec<&'static str> {
    UNITS
        .iter()
        .filter(|def| def.symbol != exclude && def.dimension().dimensionally_equal(dimension))
        .map(|def| def.symbol)
        .collect()
}
