//! ABI-stable types and status codes.

use dimq::{Quantity, QuantityRecord, BASE_COUNT};

/// Number of base-dimension exponents in [`DimqQuantity`].
pub const DIMQ_BASE_COUNT: usize = 7;

const _: () = assert!(DIMQ_BASE_COUNT == BASE_COUNT);

// =============================================================================
// Status codes
// =============================================================================

/// Success.
pub const DIMQ_OK: i32 = 0;
/// A unit symbol or constant name is not recognized.
pub const DIMQ_ERR_UNKNOWN_UNIT: i32 = -1;
/// The operands have different dimensions.
pub const DIMQ_ERR_INCOMPATIBLE_DIM: i32 = -2;
/// A required output pointer was null.
pub const DIMQ_ERR_NULL_OUT: i32 = -3;
/// An input was null, not UTF-8, not a number, or not a valid quantity.
pub const DIMQ_ERR_INVALID_VALUE: i32 = -4;
/// A unit expression is grammatically malformed.
pub const DIMQ_ERR_INVALID_EXPRESSION: i32 = -5;
/// An affine unit (`Celsius`, `Fahrenheit`) was combined multiplicatively.
pub const DIMQ_ERR_AFFINE_UNIT: i32 = -6;

/// A quantity in C layout.
///
/// `value` is the magnitude in base units (mass in grams), `exponents` are
/// the powers of length, mass, time, current, temperature, amount and
/// luminous intensity, and `offset` is non-zero only for quantities built
/// through an affine unit.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimqQuantity {
    /// Magnitude in base units.
    pub value: f64,
    /// Base-dimension exponents.
    pub exponents: [f64; DIMQ_BASE_COUNT],
    /// Affine offset, `0.0` for ordinary units.
    pub offset: f64,
}

impl From<Quantity> for DimqQuantity {
    fn from(q: Quantity) -> Self {
        let mut exponents = [0.0; DIMQ_BASE_COUNT];
        for (slot, e) in exponents.iter_mut().zip(q.dimension().exponents()) {
            *slot = e.to_f64();
        }
        Self {
            value: q.value(),
            exponents,
            offset: q.dimension().offset(),
        }
    }
}

impl TryFrom<DimqQuantity> for Quantity {
    type Error = i32;

    fn try_from(q: DimqQuantity) -> Result<Self, Self::Error> {
        let mut unit = q.exponents.to_vec();
        unit.push(1.0);
        if q.offset != 0.0 {
            unit.push(q.offset);
        }
        Quantity::from_record(&QuantityRecord {
            value: q.value,
            unit,
        })
        .map_err(|_| DIMQ_ERR_INVALID_VALUE)
    }
}
