//! sweep::errors — failures of a parameter sweep, tagged with the grid point.
//!
//! Lower-layer errors are wrapped, never flattened: a failed grid point
//! reports its index, the boundary value, which quantity was being
//! estimated, and the original [`DomainError`], [`IntegrationError`], or
//! [`OptError`].
use crate::{
    integration::errors::IntegrationError, models::errors::DomainError,
    optimization::errors::OptError,
};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for sweep operations.
pub type SweepRunResult<T> = Result<T, SweepError>;

/// Quantity being estimated when a grid point failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Descriptive,
    Communication,
    Information,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Quantity::Descriptive => "descriptive loss",
            Quantity::Communication => "communication loss",
            Quantity::Information => "information",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    // ---- Grid & options ----
    /// Grid bounds or step are not usable.
    InvalidGrid { lower: f64, upper: f64, step: f64, reason: &'static str },
    /// Grid produced no interior point.
    EmptyGrid,
    /// Explicit grid points must be finite and strictly increasing.
    InvalidGridPoint { index: usize, value: f64, reason: &'static str },
    /// Estimator options rejected at construction.
    InvalidOptions(IntegrationError),
    /// Worker count needs to be positive.
    InvalidThreads { threads: usize },

    // ---- Grid point failures ----
    Domain { index: usize, parameter: f64, source: DomainError },
    Integration { index: usize, parameter: f64, quantity: Quantity, source: IntegrationError },
    Optimization { index: usize, parameter: f64, source: OptError },
}

impl SweepError {
    /// Grid index of the failing point, if the error belongs to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            SweepError::Domain { index, .. }
            | SweepError::Integration { index, .. }
            | SweepError::Optimization { index, .. }
            | SweepError::InvalidGridPoint { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::InvalidOptions(source) => Some(source),
            SweepError::Domain { source, .. } => Some(source),
            SweepError::Integration { source, .. } => Some(source),
            SweepError::Optimization { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for SweepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Grid & options ----
            SweepError::InvalidGrid { lower, upper, step, reason } => {
                write!(f, "Invalid grid ({lower}, {upper}) with step {step}: {reason}")
            }
            SweepError::EmptyGrid => write!(f, "Grid contains no interior point"),
            SweepError::InvalidGridPoint { index, value, reason } => {
                write!(f, "Invalid grid point {value} at index {index}: {reason}")
            }
            SweepError::InvalidOptions(source) => write!(f, "Invalid sweep options: {source}"),
            SweepError::InvalidThreads { threads } => {
                write!(f, "Invalid worker count {threads}: at least one thread is required")
            }

            // ---- Grid point failures ----
            SweepError::Domain { index, parameter, source } => {
                write!(f, "Grid point {index} ({parameter}): {source}")
            }
            SweepError::Integration { index, parameter, quantity, source } => {
                write!(f, "Grid point {index} ({parameter}), {quantity}: {source}")
            }
            SweepError::Optimization { index, parameter, source } => {
                write!(f, "Grid point {index} ({parameter}), theta search: {source}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SweepError> for PyErr {
    fn from(err: SweepError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
