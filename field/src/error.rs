//! Errors raised when foreign integers are turned into field elements.

use thiserror::Error;

/// Rejected conversions into [`crate::Fr`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The integer is not smaller than the modulus.
    #[error("value {0} is not a canonical field element")]
    NonCanonical(String),

    /// The string is not a base-10 unsigned integer.
    #[error("invalid decimal field element: {0:?}")]
    InvalidDecimal(String),
}
