//! Quantity type and its implementations.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FormatConfig;
use crate::dimension::{DimensionVector, BASE_COUNT};
use crate::error::{UnitError, UnitResult};
use crate::exponent::Exponent;
use crate::{parser, table};

/// The unit argument of [`Quantity::new`] and [`Quantity::value_as`].
///
/// Anything that names a unit converts into this: a unit expression, another
/// quantity (whose dimension vector is used) or an explicit dimension vector.
#[derive(Clone, Copy, Debug)]
pub enum UnitSpec<'a> {
    /// A unit expression such as `"kg*m/s**2"`.
    Expression(&'a str),
    /// The dimension vector of an existing quantity.
    Quantity(&'a Quantity),
    /// An explicit dimension vector; its coefficient acts as the scale.
    Dimension(DimensionVector),
}

impl UnitSpec<'_> {
    /// Resolves to `(scale, canonical dimension vector)`.
    fn resolve(&self) -> UnitResult<(f64, DimensionVector)> {
        match self {
            UnitSpec::Expression(expr) => parser::parse(expr),
            UnitSpec::Quantity(q) => Ok((1.0, q.dimension)),
            UnitSpec::Dimension(dim) => Ok((dim.coefficient(), dim.normalized())),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, UnitSpec::Expression(expr) if expr.trim().is_empty())
    }
}

impl<'a> From<&'a str> for UnitSpec<'a> {
    fn from(expr: &'a str) -> Self {
        UnitSpec::Expression(expr)
    }
}

impl<'a> From<&'a String> for UnitSpec<'a> {
    fn from(expr: &'a String) -> Self {
        UnitSpec::Expression(expr.as_str())
    }
}

impl<'a> From<&'a Quantity> for UnitSpec<'a> {
    fn from(q: &'a Quantity) -> Self {
        UnitSpec::Quantity(q)
    }
}

impl From<DimensionVector> for UnitSpec<'_> {
    fn from(dim: DimensionVector) -> Self {
        UnitSpec::Dimension(dim)
    }
}

impl From<&DimensionVector> for UnitSpec<'_> {
    fn from(dim: &DimensionVector) -> Self {
        UnitSpec::Dimension(*dim)
    }
}

/// A physical quantity: a magnitude in base units plus its dimension vector.
///
/// Mass is stored in grams, everything else in SI base units. The stored
/// vector always has coefficient `1`; a quantity built through an affine unit
/// (`Celsius`) remembers the offset so it can no longer be multiplied,
/// divided or exponentiated.
///
/// # Examples
///
/// ```rust
/// use dimq_core::Quantity;
///
/// let g: Quantity = "9.8 m/s**2".parse().unwrap();
/// let t = Quantity::new(3.0, "s").unwrap();
/// let v = (g * t).unwrap();
/// assert!((v.value_as("km/hour").unwrap() - 105.84).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(into = "QuantityRecord", try_from = "QuantityRecord")]
pub struct Quantity {
    value: f64,
    dimension: DimensionVector,
}

impl Quantity {
    /// Creates a quantity of `value` expressed in `unit`.
    ///
    /// ```rust
    /// use dimq_core::Quantity;
    /// let d = Quantity::new(1.5, "km").unwrap();
    /// assert_eq!(d.value(), 1500.0);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`UnitError::MissingUnit`] when `unit` is an empty expression.
    /// - Any error of [`parser::parse`] for an invalid unit expression.
    pub fn new<'a>(value: f64, unit: impl Into<UnitSpec<'a>>) -> UnitResult<Self> {
        let unit = unit.into();
        if unit.is_blank() {
            return Err(UnitError::MissingUnit(value.to_string()));
        }
        let (scale, dimension) = unit.resolve()?;
        Ok(Self {
            value: value * scale + dimension.offset(),
            dimension,
        })
    }

    /// Parses a combined `"<number> <unit expression>"` string.
    ///
    /// ```rust
    /// use dimq_core::{Quantity, UnitError};
    /// let g = Quantity::parse("9.80665 m/s**2").unwrap();
    /// assert_eq!(g.value(), 9.80665);
    /// assert!(matches!(Quantity::parse("9.8"), Err(UnitError::MissingUnit(_))));
    /// ```
    ///
    /// # Errors
    ///
    /// - [`UnitError::MalformedLiteral`] when the leading word is not a number.
    /// - [`UnitError::MissingUnit`] when nothing follows the number.
    pub fn parse(text: &str) -> UnitResult<Self> {
        let text = text.trim();
        let (number, unit) = match text.split_once(char::is_whitespace) {
            Some((number, unit)) => (number, unit.trim()),
            None => (text, ""),
        };
        let value: f64 = number
            .parse()
            .map_err(|_| UnitError::MalformedLiteral(number.to_string()))?;
        if unit.is_empty() {
            return Err(UnitError::MissingUnit(number.to_string()));
        }
        Self::new(value, unit)
    }

    /// One of the named unit: `Quantity::unit("km")` is `1 km`.
    ///
    /// ```rust
    /// use dimq_core::Quantity;
    /// let mile = Quantity::unit("mi").unwrap();
    /// let five_miles = mile * 5.0;
    /// assert!((five_miles.value_as("km").unwrap() - 8.04672).abs() < 1e-12);
    /// ```
    pub fn unit(symbol: &str) -> UnitResult<Self> {
        Self::new(1.0, symbol)
    }

    /// Builds a quantity directly from a base-unit magnitude.
    ///
    /// The vector is canonicalized to coefficient `1`; its coefficient is not
    /// applied to `value`.
    pub fn from_base(value: f64, dimension: DimensionVector) -> Self {
        Self {
            value,
            dimension: dimension.normalized(),
        }
    }

    /// Magnitude in base units.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Canonical dimension vector.
    #[inline]
    pub const fn dimension(&self) -> &DimensionVector {
        &self.dimension
    }

    /// `true` when every exponent is zero.
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Python-style truthiness: the magnitude is nonzero.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        self.value != 0.0
    }

    /// The magnitude expressed in `target`.
    ///
    /// ```rust
    /// use dimq_core::Quantity;
    /// let boiling = Quantity::new(100.0, "Celsius").unwrap();
    /// assert!((boiling.value_as("Fahrenheit").unwrap() - 212.0).abs() < 1e-4);
    /// ```
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnits`] when `target` has different exponents.
    pub fn value_as<'a>(&self, target: impl Into<UnitSpec<'a>>) -> UnitResult<f64> {
        let target = target.into();
        if target.is_blank() {
            return Err(UnitError::MissingUnit(self.value.to_string()));
        }
        let (scale, dimension) = target.resolve()?;
        if !self.dimension.dimensionally_equal(&dimension) {
            return Err(UnitError::incompatible(self.unit_label(), label(&dimension)));
        }
        Ok((self.value - dimension.offset()) * dimension.coefficient() / scale)
    }

    /// Sum of two quantities with equal dimensions.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnits`] when the exponents differ.
    pub fn try_add(&self, rhs: &Self) -> UnitResult<Self> {
        self.check_compatible(rhs)?;
        Ok(Self {
            value: self.value + rhs.value,
            dimension: self.dimension,
        })
    }

    /// Difference of two quantities with equal dimensions.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnits`] when the exponents differ.
    pub fn try_sub(&self, rhs: &Self) -> UnitResult<Self> {
        self.check_compatible(rhs)?;
        Ok(Self {
            value: self.value - rhs.value,
            dimension: self.dimension,
        })
    }

    /// Product of two quantities.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] when either side was built
    /// through an affine unit.
    pub fn try_mul(&self, rhs: &Self) -> UnitResult<Self> {
        let dimension = self.dimension.multiply(&rhs.dimension)?;
        Ok(Self::from_base(self.value * rhs.value, dimension))
    }

    /// Quotient of two quantities.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] when either side was built
    /// through an affine unit.
    pub fn try_div(&self, rhs: &Self) -> UnitResult<Self> {
        let dimension = self.dimension.divide(&rhs.dimension)?;
        Ok(Self::from_base(self.value / rhs.value, dimension))
    }

    /// Raises the quantity to a (possibly rational) power.
    ///
    /// ```rust
    /// use dimq_core::{Exponent, Quantity};
    /// let area = Quantity::new(16.0, "m**2").unwrap();
    /// let side = area.pow(Exponent::new(1, 2).unwrap()).unwrap();
    /// assert_eq!(side.value_as("m").unwrap(), 4.0);
    /// ```
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] for affine quantities.
    pub fn pow(&self, n: Exponent) -> UnitResult<Self> {
        let dimension = self.dimension.power(n)?;
        let value = if n.is_integer() {
            self.value.powi(n.numer())
        } else {
            self.value.powf(n.to_f64())
        };
        Ok(Self::from_base(value, dimension))
    }

    /// Integer power.
    pub fn powi(&self, n: i32) -> UnitResult<Self> {
        let n = Exponent::new(n, 1).ok_or_else(|| {
            UnitError::invalid_expression(&self.dimension.to_string(), "exponent overflow")
        })?;
        self.pow(n)
    }

    /// Square root.
    pub fn sqrt(&self) -> UnitResult<Self> {
        self.pow(Exponent::HALF)
    }

    /// Reciprocal, `1 / self`.
    pub fn recip(&self) -> UnitResult<Self> {
        let dimension = self.dimension.reciprocal()?;
        Ok(Self::from_base(1.0 / self.value, dimension))
    }

    /// Absolute value, same dimension.
    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            value: self.value.abs(),
            dimension: self.dimension,
        }
    }

    /// Orders two quantities of equal dimension by base magnitude.
    ///
    /// Returns `Ok(None)` only when a magnitude is NaN.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnits`] when the exponents differ.
    pub fn try_cmp(&self, rhs: &Self) -> UnitResult<Option<Ordering>> {
        self.check_compatible(rhs)?;
        Ok(self.value.partial_cmp(&rhs.value))
    }

    /// `self == rhs`, failing on mismatched dimensions.
    ///
    /// ```rust
    /// use dimq_core::Quantity;
    /// let a = Quantity::new(5.0, "m").unwrap();
    /// assert!(a.try_eq(&Quantity::new(500.0, "cm").unwrap()).unwrap());
    /// assert!(a.try_eq(&Quantity::new(5.0, "s").unwrap()).is_err());
    /// ```
    pub fn try_eq(&self, rhs: &Self) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? == Some(Ordering::Equal))
    }

    pub fn try_ne(&self, rhs: &Self) -> UnitResult<bool> {
        self.try_eq(rhs).map(|eq| !eq)
    }

    pub fn try_lt(&self, rhs: &Self) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? == Some(Ordering::Less))
    }

    pub fn try_le(&self, rhs: &Self) -> UnitResult<bool> {
        Ok(matches!(
            self.try_cmp(rhs)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    pub fn try_gt(&self, rhs: &Self) -> UnitResult<bool> {
        Ok(self.try_cmp(rhs)? == Some(Ordering::Greater))
    }

    pub fn try_ge(&self, rhs: &Self) -> UnitResult<bool> {
        Ok(matches!(
            self.try_cmp(rhs)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    /// Other table symbols with the same dimension as `symbol`, in table order.
    ///
    /// ```rust
    /// use dimq_core::Quantity;
    /// assert_eq!(
    ///     Quantity::similar_units("N").unwrap(),
    ///     vec!["kgf", "lbf", "dyn", "pdl"]
    /// );
    /// ```
    pub fn similar_units(symbol: &str) -> UnitResult<Vec<&'static str>> {
        let (_, dimension) = parser::parse(symbol)?;
        Ok(table::similar_units(&dimension, symbol))
    }

    /// The quantity written in base symbols, e.g. `"3 m*g/(s**2*A)"`.
    pub fn basic_repr(&self) -> String {
        self.render(&FormatConfig {
            named_units: false,
            ..FormatConfig::default()
        })
    }

    /// Renders the quantity with explicit formatting options.
    ///
    /// ```rust
    /// use dimq_core::{FormatConfig, Quantity};
    /// let f = Quantity::new(2.0, "kN").unwrap();
    /// let config = FormatConfig { precision: Some(1), named_units: true };
    /// assert_eq!(f.format_with(&config), "2000.0 N");
    /// ```
    pub fn format_with(&self, config: &FormatConfig) -> String {
        self.render(config)
    }

    fn render(&self, config: &FormatConfig) -> String {
        if self.is_dimensionless() {
            return config.format_number(self.value);
        }
        if config.named_units {
            if let Some(def) = table::named_unit(&self.dimension) {
                let value = self.value / def.coefficient;
                return format!("{} {}", config.format_number(value), def.symbol);
            }
        }
        format!(
            "{} {}",
            config.format_number(self.value),
            self.dimension.normalized()
        )
    }

    /// Encodes the quantity as a [`QuantityRecord`].
    pub fn to_record(&self) -> QuantityRecord {
        let mut unit: Vec<f64> = self.dimension.exponents().iter().map(|e| e.to_f64()).collect();
        unit.push(self.dimension.coefficient());
        if self.dimension.is_affine() {
            unit.push(self.dimension.offset());
        }
        QuantityRecord {
            value: self.value,
            unit,
        }
    }

    /// Decodes a [`QuantityRecord`].
    ///
    /// The stored value is taken as the base magnitude; the record's offset
    /// is restored on the vector but not added to the value again.
    ///
    /// # Errors
    ///
    /// [`UnitError::InvalidRecord`] for a unit list that is not 8 or 9 long
    /// or holds an exponent that is not a small rational.
    pub fn from_record(record: &QuantityRecord) -> UnitResult<Self> {
        let unit = &record.unit;
        if unit.len() != BASE_COUNT + 1 && unit.len() != BASE_COUNT + 2 {
            return Err(UnitError::InvalidRecord(format!(
                "expected {} or {} unit entries, found {}",
                BASE_COUNT + 1,
                BASE_COUNT + 2,
                unit.len()
            )));
        }
        let mut exponents = [Exponent::ZERO; BASE_COUNT];
        for (slot, raw) in exponents.iter_mut().zip(unit) {
            *slot = Exponent::from_f64(*raw)
                .ok_or_else(|| UnitError::InvalidRecord(format!("bad exponent {}", raw)))?;
        }
        let coefficient = unit[BASE_COUNT];
        if !coefficient.is_finite() || coefficient == 0.0 {
            return Err(UnitError::InvalidRecord(format!(
                "bad coefficient {}",
                coefficient
            )));
        }
        let offset = unit.get(BASE_COUNT + 1).copied().unwrap_or(0.0);
        Ok(Self {
            value: record.value * coefficient,
            dimension: DimensionVector::new(exponents, 1.0, offset),
        })
    }

    fn check_compatible(&self, rhs: &Self) -> UnitResult<()> {
        if self.dimension.dimensionally_equal(&rhs.dimension) {
            Ok(())
        } else {
            Err(UnitError::incompatible(self.unit_label(), rhs.unit_label()))
        }
    }

    fn unit_label(&self) -> String {
        label(&self.dimension)
    }
}

fn label(dimension: &DimensionVector) -> String {
    match table::named_symbol(dimension) {
        Some(symbol) if !dimension.is_dimensionless() => symbol.to_string(),
        _ => dimension.normalized().to_string(),
    }
}

/// Serialized form of a [`Quantity`].
///
/// `unit` holds the seven exponents, then the coefficient, then the offset
/// when the quantity was built through an affine unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantityRecord {
    pub value: f64,
    pub unit: Vec<f64>,
}

impl From<Quantity> for QuantityRecord {
    fn from(q: Quantity) -> Self {
        q.to_record()
    }
}

impl TryFrom<QuantityRecord> for Quantity {
    type Error = UnitError;

    fn try_from(record: QuantityRecord) -> UnitResult<Self> {
        Quantity::from_record(&record)
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> UnitResult<Self> {
        Quantity::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatConfig::default()))
    }
}

// Operator implementations

impl Add for Quantity {
    type Output = UnitResult<Quantity>;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub for Quantity {
    type Output = UnitResult<Quantity>;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl Mul for Quantity {
    type Output = UnitResult<Quantity>;
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.try_mul(&rhs)
    }
}

impl Div for Quantity {
    type Output = UnitResult<Quantity>;
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.try_div(&rhs)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            value: self.value * rhs,
            dimension: self.dimension,
        }
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: Quantity) -> Self::Output {
        rhs * self
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self {
            value: self.value / rhs,
            dimension: self.dimension,
        }
    }
}

impl Div<Quantity> for f64 {
    type Output = UnitResult<Quantity>;
    #[inline]
    fn div(self, rhs: Quantity) -> Self::Output {
        let dimension = rhs.dimension.reciprocal()?;
        Ok(Quantity::from_base(self / rhs.value, dimension))
    }
}

impl Neg for Quantity {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            dimension: self.dimension,
        }
    }
}
