//! Error types for unit parsing, conversion and quantity arithmetic.

/// Result type for every fallible operation in this crate.
pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for unit expressions and quantity operations.
///
/// Every error is reported at the point of failure; nothing is coerced into a
/// default value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid unit expression '{expression}': {reason}")]
    InvalidUnitExpression { expression: String, reason: String },

    #[error("Malformed numeric literal: {0}")]
    MalformedLiteral(String),

    #[error("Missing unit for value {0}")]
    MissingUnit(String),

    #[error("Incompatible units: {left} and {right}")]
    IncompatibleUnits { left: String, right: String },

    #[error("Affine unit cannot be combined: {0}")]
    IncompatibleAffineUnit(String),

    #[error("Invalid quantity record: {0}")]
    InvalidRecord(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl UnitError {
    pub(crate) fn invalid_expression(expression: &str, reason: impl Into<String>) -> Self {
        UnitError::InvalidUnitExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        UnitError::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
