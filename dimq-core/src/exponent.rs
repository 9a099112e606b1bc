//! Exact rational exponents for dimension vectors.

use core::fmt;
use core::ops::Neg;

/// Largest denominator of a fractional exponent.
pub const MAX_DENOMINATOR: i32 = 1 << 16;

/// Fractional exponents stay below this magnitude. Together with
/// [`MAX_DENOMINATOR`] it keeps every exponent recoverable from its `f64`.
const MAX_FRACTION_MAGNITUDE: i64 = 1 << 20;

/// A reduced rational power of a base dimension.
///
/// Integer exponents cover the whole unit table; rational ones appear when a
/// quantity or unit expression is raised to a fractional power (`m**(1/2)`).
/// The fraction is always stored reduced with a positive denominator, so the
/// derived `PartialEq` is value equality. The numerator lies in
/// `-i32::MAX..=i32::MAX`; a fractional exponent has a denominator of at most
/// [`MAX_DENOMINATOR`] and a magnitude below 2^20.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Exponent {
    num: i32,
    den: i32,
}

impl Exponent {
    /// The zero exponent.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// The unit exponent.
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// One half, the square-root exponent.
    pub const HALF: Self = Self { num: 1, den: 2 };

    /// An integer exponent.
    ///
    /// # Panics
    ///
    /// If `value` is `i32::MIN`, which has no negation.
    #[inline]
    pub const fn integer(value: i32) -> Self {
        assert!(value != i32::MIN, "exponent out of range");
        Self { num: value, den: 1 }
    }

    /// Builds `num / den` in reduced form. Returns `None` when `den` is zero or
    /// the reduced fraction is out of range.
    ///
    /// ```rust
    /// use dimq_core::Exponent;
    /// let half = Exponent::new(2, 4).unwrap();
    /// assert_eq!(half, Exponent::new(1, 2).unwrap());
    /// assert!(Exponent::new(1, 0).is_none());
    /// ```
    pub fn new(num: i32, den: i32) -> Option<Self> {
        Self::reduce(i64::from(num), i64::from(den))
    }

    fn reduce(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        if num == 0 {
            return Some(Self::ZERO);
        }
        let (mut num, mut den) = (num, den);
        if den < 0 {
            num = -num;
            den = -den;
        }
        let gcd = gcd_i64(num.abs(), den);
        let (num, den) = (num / gcd, den / gcd);
        if num.abs() > i64::from(i32::MAX) {
            return None;
        }
        let fraction_in_range =
            den <= i64::from(MAX_DENOMINATOR) && num.abs() < den * MAX_FRACTION_MAGNITUDE;
        if den > 1 && !fraction_in_range {
            return None;
        }
        Some(Self {
            num: i32::try_from(num).ok()?,
            den: i32::try_from(den).ok()?,
        })
    }

    /// Recovers an exponent from its floating-point form.
    ///
    /// Walks the continued fraction of `value` and returns the first convergent
    /// whose [`to_f64`](Self::to_f64) is exactly `value`, so every exponent
    /// round-trips through `f64`. Yields `None` when no in-range fraction
    /// matches.
    ///
    /// ```rust
    /// use dimq_core::Exponent;
    /// let e = Exponent::new(9, 20).unwrap();
    /// assert_eq!(Exponent::from_f64(e.to_f64()), Some(e));
    /// assert_eq!(Exponent::from_f64(1e-12), None);
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::ZERO);
        }
        let magnitude = value.abs();
        if magnitude > f64::from(i32::MAX) || magnitude < 1.0 / f64::from(2 * MAX_DENOMINATOR) {
            return None;
        }
        let sign: i128 = if value < 0.0 { -1 } else { 1 };

        // `magnitude` is exactly `mantissa * 2^shift`.
        let bits = magnitude.to_bits();
        let mantissa = i128::from(bits & ((1u64 << 52) - 1)) | (1i128 << 52);
        let shift = ((bits >> 52) & 0x7ff) as i32 - 1075;
        let (mut p, mut q) = if shift >= 0 {
            (mantissa << shift, 1i128)
        } else {
            (mantissa, 1i128 << -shift)
        };

        let (mut h_prev, mut h) = (0i128, 1i128);
        let (mut k_prev, mut k) = (1i128, 0i128);
        while q != 0 {
            let a = p / q;
            (h_prev, h) = (h, a * h + h_prev);
            (k_prev, k) = (k, a * k + k_prev);
            if k > i128::from(MAX_DENOMINATOR) || h > i128::from(i32::MAX) {
                return None;
            }
            if let Some(candidate) = Self::reduce((sign * h) as i64, k as i64) {
                if candidate.to_f64() == value {
                    return Some(candidate);
                }
            }
            (p, q) = (q, p - a * q);
        }
        None
    }

    /// Numerator of the reduced fraction.
    #[inline]
    pub const fn numer(self) -> i32 {
        self.num
    }

    /// Denominator of the reduced fraction (always positive).
    #[inline]
    pub const fn denom(self) -> i32 {
        self.den
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        self.den == 1
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.num > 0
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Sum of two exponents, `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let num = i64::from(self.num) * i64::from(rhs.den) + i64::from(rhs.num) * i64::from(self.den);
        Self::reduce(num, i64::from(self.den) * i64::from(rhs.den))
    }

    /// Difference of two exponents, `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_add(-rhs)
    }

    /// Product of two exponents, `None` on overflow.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::reduce(
            i64::from(self.num) * i64::from(rhs.num),
            i64::from(self.den) * i64::from(rhs.den),
        )
    }
}

impl Default for Exponent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Exponent {
    #[inline]
    fn from(value: i32) -> Self {
        Self::integer(value)
    }
}

impl Neg for Exponent {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.abs().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reduces_and_normalises_sign() {
        let e = Exponent::new(6, -4).unwrap();
        assert_eq!(e.numer(), -3);
        assert_eq!(e.denom(), 2);
        assert_eq!(Exponent::new(0, -7).unwrap(), Exponent::ZERO);
    }

    #[test]
    fn arithmetic_stays_exact() {
        let half = Exponent::new(1, 2).unwrap();
        let third = Exponent::new(1, 3).unwrap();
        assert_eq!(half.checked_add(third), Exponent::new(5, 6));
        assert_eq!(half.checked_sub(half), Some(Exponent::ZERO));
        assert_eq!(half.checked_mul(Exponent::integer(2)), Some(Exponent::ONE));
    }

    #[test]
    fn overflow_is_reported() {
        let big = Exponent::integer(i32::MAX);
        assert!(big.checked_mul(big).is_none());
    }

    #[test]
    fn out_of_range_fractions_are_rejected() {
        assert!(Exponent::new(i32::MIN, 1).is_none());
        assert_eq!(Exponent::new(-i32::MAX, 1).unwrap().numer(), -i32::MAX);
        assert!(Exponent::new(1, MAX_DENOMINATOR + 1).is_none());
        assert!(Exponent::new(1, MAX_DENOMINATOR).is_some());
        assert!(Exponent::new((3 << 20) + 1, 2).is_none());
        let low = Exponent::integer(-1_073_741_824);
        assert!(low.checked_add(low).is_none());
    }

    #[test]
    #[should_panic(expected = "exponent out of range")]
    fn integer_rejects_unnegatable_value() {
        let _ = Exponent::integer(i32::MIN);
    }

    #[test]
    fn from_f64_recovers_fractions() {
        assert_eq!(Exponent::from_f64(2.0), Some(Exponent::integer(2)));
        assert_eq!(Exponent::from_f64(-0.5), Exponent::new(-1, 2));
        assert_eq!(Exponent::from_f64(1.0 / 3.0), Exponent::new(1, 3));
        assert_eq!(Exponent::from_f64(0.45), Exponent::new(9, 20));
        assert_eq!(Exponent::from_f64(1.0 / 13.0), Exponent::new(1, 13));
        assert_eq!(Exponent::from_f64(0.123456), Exponent::new(1929, 15625));
        assert_eq!(Exponent::from_f64(-i32::MAX as f64), Some(Exponent::integer(-i32::MAX)));
        assert_eq!(Exponent::from_f64(1e-12), None);
        assert_eq!(Exponent::from_f64(3e9), None);
        assert_eq!(Exponent::from_f64(f64::NAN), None);
    }

    #[test]
    fn every_exponent_survives_f64() {
        let samples = [
            (1, 13),
            (9, 20),
            (-7, 12),
            (355, 113),
            (1, MAX_DENOMINATOR),
            (-65_535, MAX_DENOMINATOR),
            (999_999, 65_521),
            (i32::MAX, 1),
        ];
        for (num, den) in samples {
            let e = Exponent::new(num, den).unwrap();
            assert_eq!(Exponent::from_f64(e.to_f64()), Some(e), "{}", e);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Exponent::integer(-2).to_string(), "-2");
        assert_eq!(Exponent::new(3, 2).unwrap().to_string(), "3/2");
    }
}
