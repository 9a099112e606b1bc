//! Dimension vectors and their algebra.
//!
//! A [`DimensionVector`] is the runtime description of a unit: seven exponents
//! over the base dimensions, a coefficient converting one of the unit into base
//! units, and an additive offset for affine scales such as `Celsius`.
//!
//! ```rust
//! use dimq_core::{BaseDimension, DimensionVector};
//!
//! let length = DimensionVector::base(BaseDimension::Length);
//! let time = DimensionVector::base(BaseDimension::Time);
//! let velocity = length.divide(&time).unwrap();
//! assert_eq!(velocity.to_string(), "m/s");
//! ```

use crate::error::{UnitError, UnitResult};
use crate::exponent::Exponent;
use core::fmt;

/// Number of base dimensions.
pub const BASE_COUNT: usize = 7;

/// The seven base dimensions, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    Luminosity,
}

impl BaseDimension {
    /// All base dimensions in exponent-array order.
    pub const ALL: [BaseDimension; BASE_COUNT] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::Luminosity,
    ];

    /// Position of this dimension in an exponent array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol of the base unit magnitudes are stored in.
    pub const fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "g",
            BaseDimension::Time => "s",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::Luminosity => "cd",
        }
    }
}

/// Exponents, coefficient and offset of a unit.
///
/// # Equality
///
/// `PartialEq` compares exponents only: `km` and `m` are equal dimension
/// vectors. Use [`DimensionVector::is_identical`] to compare all three fields.
///
/// # Affine units
///
/// A vector with a nonzero offset cannot take part in [`multiply`](Self::multiply),
/// [`divide`](Self::divide) or [`power`](Self::power); offsets do not
/// distribute over products.
#[derive(Clone, Copy, Debug)]
pub struct DimensionVector {
    exponents: [Exponent; BASE_COUNT],
    coefficient: f64,
    offset: f64,
}

impl DimensionVector {
    /// The dimensionless vector with coefficient 1.
    pub const DIMENSIONLESS: Self = Self::from_integers([0; BASE_COUNT], 1.0);

    /// Builds a vector from integer exponents.
    pub const fn from_integers(exponents: [i32; BASE_COUNT], coefficient: f64) -> Self {
        let mut out = [Exponent::ZERO; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            out[i] = Exponent::integer(exponents[i]);
            i += 1;
        }
        Self {
            exponents: out,
            coefficient,
            offset: 0.0,
        }
    }

    #[inline]
    pub const fn new(exponents: [Exponent; BASE_COUNT], coefficient: f64, offset: f64) -> Self {
        Self {
            exponents,
            coefficient,
            offset,
        }
    }

    /// The vector of a single base dimension with coefficient 1.
    pub const fn base(dimension: BaseDimension) -> Self {
        let mut exponents = [0; BASE_COUNT];
        exponents[dimension.index()] = 1;
        Self::from_integers(exponents, 1.0)
    }

    /// Returns a copy carrying the given additive offset.
    #[inline]
    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// Returns a copy carrying the given coefficient.
    #[inline]
    pub const fn with_coefficient(self, coefficient: f64) -> Self {
        Self {
            coefficient,
            ..self
        }
    }

    /// Returns a copy whose coefficient is reset to 1.
    ///
    /// The offset is kept.
    #[inline]
    pub const fn normalized(self) -> Self {
        self.with_coefficient(1.0)
    }

    #[inline]
    pub const fn exponents(&self) -> &[Exponent; BASE_COUNT] {
        &self.exponents
    }

    #[inline]
    pub const fn exponent(&self, dimension: BaseDimension) -> Exponent {
        self.exponents[dimension.index()]
    }

    #[inline]
    pub const fn coefficient(&self) -> f64 {
        self.coefficient
    }

    #[inline]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// `true` when the vector carries an additive offset.
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.offset != 0.0
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Exponent-array equality, ignoring coefficient and offset.
    #[inline]
    pub fn dimensionally_equal(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }

    /// Equality of exponents, coefficient and offset.
    pub fn is_identical(&self, other: &Self) -> bool {
        self.exponents == other.exponents
            && self.coefficient.to_bits() == other.coefficient.to_bits()
            && self.offset.to_bits() == other.offset.to_bits()
    }

    /// Product of two units: exponents add, coefficients multiply.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] when either operand is affine.
    pub fn multiply(&self, rhs: &Self) -> UnitResult<Self> {
        self.reject_affine(rhs, "*")?;
        let exponents = self.zip_exponents(rhs, Exponent::checked_add)?;
        Ok(Self::new(exponents, self.coefficient * rhs.coefficient, 0.0))
    }

    /// Quotient of two units: exponents subtract, coefficients divide.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] when either operand is affine.
    pub fn divide(&self, rhs: &Self) -> UnitResult<Self> {
        self.reject_affine(rhs, "/")?;
        let exponents = self.zip_exponents(rhs, Exponent::checked_sub)?;
        Ok(Self::new(exponents, self.coefficient / rhs.coefficient, 0.0))
    }

    /// Raises the unit to a (possibly rational) power.
    ///
    /// ```rust
    /// use dimq_core::{BaseDimension, DimensionVector, Exponent};
    ///
    /// let area = DimensionVector::base(BaseDimension::Length)
    ///     .power(Exponent::integer(2))
    ///     .unwrap();
    /// let side = area.power(Exponent::new(1, 2).unwrap()).unwrap();
    /// assert_eq!(side, DimensionVector::base(BaseDimension::Length));
    /// ```
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleAffineUnit`] when the vector is affine.
    pub fn power(&self, n: Exponent) -> UnitResult<Self> {
        if self.is_affine() {
            return Err(UnitError::IncompatibleAffineUnit(format!(
                "({})**{}",
                self, n
            )));
        }
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_mul(n).ok_or_else(|| self.overflow())?;
        }
        let coefficient = if n.is_integer() {
            self.coefficient.powi(n.numer())
        } else {
            self.coefficient.powf(n.to_f64())
        };
        Ok(Self::new(exponents, coefficient, 0.0))
    }

    /// Reciprocal unit.
    pub fn reciprocal(&self) -> UnitResult<Self> {
        Self::DIMENSIONLESS.divide(self)
    }

    fn reject_affine(&self, rhs: &Self, op: &str) -> UnitResult<()> {
        if self.is_affine() || rhs.is_affine() {
            return Err(UnitError::IncompatibleAffineUnit(format!(
                "{} {} {}",
                self, op, rhs
            )));
        }
        Ok(())
    }

    fn zip_exponents(
        &self,
        rhs: &Self,
        op: fn(Exponent, Exponent) -> Option<Exponent>,
    ) -> UnitResult<[Exponent; BASE_COUNT]> {
        let mut out = [Exponent::ZERO; BASE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(self.exponents[i], rhs.exponents[i]).ok_or_else(|| self.overflow())?;
        }
        Ok(out)
    }

    fn overflow(&self) -> UnitError {
        UnitError::invalid_expression(&self.to_string(), "exponent overflow")
    }
}

impl Default for DimensionVector {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

impl PartialEq for DimensionVector {
    fn eq(&self, other: &Self) -> bool {
        self.dimensionally_equal(other)
    }
}

fn write_factor(out: &mut String, symbol: &str, exponent: Exponent) {
    if !out.is_empty() {
        out.push('*');
    }
    out.push_str(symbol);
    let exponent = exponent.abs();
    if exponent == Exponent::ONE {
        return;
    }
    if exponent.is_integer() {
        out.push_str(&format!("**{}", exponent));
    } else {
        out.push_str(&format!("**({})", exponent));
    }
}

/// Base-symbol rendering, e.g. `m*g/(s**2*A)`; `1` for dimensionless vectors.
///
/// Coefficient and offset are not shown.
impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut upper = String::new();
        let mut lower = String::new();
        for dim in BaseDimension::ALL {
            let e = self.exponent(dim);
            if e.is_zero() {
                continue;
            }
            let target = if e.is_positive() { &mut upper } else { &mut lower };
            write_factor(target, dim.symbol(), e);
        }
        match (upper.is_empty(), lower.is_empty()) {
            (true, true) => write!(f, "1"),
            (false, true) => write!(f, "{}", upper),
            (upper_empty, false) => {
                let upper = if upper_empty { "1" } else { upper.as_str() };
                if lower.contains('*') {
                    write!(f, "{}/({})", upper, lower)
                } else {
                    write!(f, "{}/{}", upper, lower)
                }
            }
        }
    }
}
