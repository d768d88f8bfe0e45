//! models::errors — validation failures for integration boxes and boundaries.
//!
//! Every failure carries the payload that triggered it (offending bound,
//! dimension, boundary value) so callers higher up (sweep driver, Python
//! bindings) can report it without re-deriving context.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for domain construction and model boundary checks.
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    // ---- Box construction ----
    /// A box needs at least one dimension.
    EmptyBox,

    /// Interval bounds must be finite with `lower < upper`.
    InvalidInterval { index: usize, lower: f64, upper: f64, reason: &'static str },

    // ---- Model boundary ----
    /// Free boundary (`amax`, `rhomax`) outside the admissible open interval.
    BoundaryOutOfRange { name: &'static str, value: f64, lower: f64, upper: f64 },

    // ---- Points ----
    /// Point dimension does not match the model or box dimension.
    PointDimMismatch { expected: usize, found: usize },
}

impl std::error::Error for DomainError {}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::EmptyBox => write!(f, "Integration box must have at least one dimension"),
            DomainError::InvalidInterval { index, lower, upper, reason } => {
                write!(f, "Invalid interval [{lower}, {upper}] in dimension {index}: {reason}")
            }
            DomainError::BoundaryOutOfRange { name, value, lower, upper } => {
                write!(f, "Boundary {name} = {value} outside admissible range ({lower}, {upper})")
            }
            DomainError::PointDimMismatch { expected, found } => {
                write!(f, "Point dimension mismatch: expected {expected}, found {found}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DomainError> for PyErr {
    fn from(err: DomainError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
