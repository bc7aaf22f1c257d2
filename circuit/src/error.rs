//! Error types for circuit declaration and witness checking.

use core::fmt;

use field::{FieldError, Fr};
use mimc::MimcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using CircuitError
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Errors raised while declaring a circuit or checking a witness against it.
///
/// An unsatisfied constraint is the expected outcome for an invalid witness;
/// it only becomes an error through [`crate::Evaluation::into_result`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// A declared input slot has no value in the assignment.
    #[error("no assignment for input slot {0:?}")]
    MissingInput(String),

    /// The same input slot was declared twice.
    #[error("input slot {0:?} declared twice")]
    DuplicateInput(String),

    /// At least one assertion does not hold for the witness.
    #[error("{count} constraint(s) unsatisfied, first: {first}")]
    Unsatisfied { count: usize, first: Violation },

    /// Rejection sampling found no integer point inside the annulus.
    #[error("no integer point found in the annulus of radius {radius}")]
    EmptyAnnulus { radius: u64 },

    /// Coordinates for this radius would leave the signed 32-bit range.
    #[error("radius {0} exceeds the signed 32-bit coordinate range")]
    RadiusOutOfRange(u64),

    #[error(transparent)]
    Mimc(#[from] MimcError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<postcard::Error> for CircuitError {
    fn from(err: postcard::Error) -> Self {
        CircuitError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CircuitError {
    fn from(err: serde_json::Error) -> Self {
        CircuitError::Serialization(err.to_string())
    }
}

/// Kind of a recorded assertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionKind {
    /// `lhs == rhs`
    Equal,
    /// `lhs <= rhs` on canonical representatives
    LessOrEqual,
}

impl AssertionKind {
    pub(crate) fn holds(self, lhs: Fr, rhs: Fr) -> bool {
        match self {
            AssertionKind::Equal => lhs == rhs,
            AssertionKind::LessOrEqual => lhs <= rhs,
        }
    }
}

/// An assertion that failed for a concrete witness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Position of the assertion in declaration order.
    pub index: usize,
    /// Section the circuit was in when declaring it.
    pub section: Option<String>,
    pub kind: AssertionKind,
    pub lhs: Fr,
    pub rhs: Fr,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            AssertionKind::Equal => "==",
            AssertionKind::LessOrEqual => "<=",
        };
        write!(f, "assertion #{}", self.index)?;
        if let Some(section) = &self.section {
            write!(f, " ({section})")?;
        }
        write!(f, ": {} {op} {}", self.lhs, self.rhs)
    }
}
