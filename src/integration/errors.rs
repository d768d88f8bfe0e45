//! integration::errors — failures of the quadrature and VEGAS backends.
//!
//! Option validation, integrand evaluation, and accuracy failures share a
//! single enum so the estimator can propagate any of them with `?`. The
//! optimizer and sweep layers wrap [`IntegrationError`] rather than
//! flattening it, so the original payload always survives.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for integration routines.
pub type IntegrationResult<T> = Result<T, IntegrationError>;

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    // ---- Options ----
    /// Tolerances need to be finite and non-negative, and not both zero.
    InvalidTolerance { name: &'static str, tol: f64, reason: &'static str },

    /// Subinterval limit needs to be positive.
    InvalidLimit { limit: usize, reason: &'static str },

    /// Evaluation budget per iteration is too small.
    InvalidBudget { evals: usize, reason: &'static str },

    /// Iteration counts need to be positive.
    InvalidIterations { iterations: usize, reason: &'static str },

    /// Adaptive map needs at least one bin per dimension.
    InvalidBins { bins: usize, reason: &'static str },

    /// Map damping exponent needs to be finite and non-negative.
    InvalidAlpha { alpha: f64, reason: &'static str },

    /// Backend cannot handle a box of this dimension.
    UnsupportedDimension { dim: usize, reason: &'static str },

    // ---- Numerical ----
    /// The integrand returned NaN or an infinity.
    NonFiniteIntegrand { point: Vec<f64>, value: f64 },

    /// Adaptive quadrature hit its subdivision limit above the tolerance.
    ToleranceNotMet { value: f64, abs_err: f64, tolerance: f64, intervals: usize },

    /// Combined estimate is not finite.
    NonFiniteEstimate { mean: f64, std_err: f64 },

    // ---- Protocol ----
    /// `measure` was called on an integrator that was never trained.
    UntrainedIntegrator,
}

impl std::error::Error for IntegrationError {}

impl std::fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Options ----
            IntegrationError::InvalidTolerance { name, tol, reason } => {
                write!(f, "Invalid {name} tolerance {tol}: {reason}")
            }
            IntegrationError::InvalidLimit { limit, reason } => {
                write!(f, "Invalid subinterval limit {limit}: {reason}")
            }
            IntegrationError::InvalidBudget { evals, reason } => {
                write!(f, "Invalid evaluation budget {evals}: {reason}")
            }
            IntegrationError::InvalidIterations { iterations, reason } => {
                write!(f, "Invalid iteration count {iterations}: {reason}")
            }
            IntegrationError::InvalidBins { bins, reason } => {
                write!(f, "Invalid number of map bins {bins}: {reason}")
            }
            IntegrationError::InvalidAlpha { alpha, reason } => {
                write!(f, "Invalid map damping exponent {alpha}: {reason}")
            }
            IntegrationError::UnsupportedDimension { dim, reason } => {
                write!(f, "Unsupported integration dimension {dim}: {reason}")
            }

            // ---- Numerical ----
            IntegrationError::NonFiniteIntegrand { point, value } => {
                write!(f, "Non-finite integrand value {value} at point {point:?}")
            }
            IntegrationError::ToleranceNotMet { value, abs_err, tolerance, intervals } => {
                write!(
                    f,
                    "Quadrature tolerance not met after {intervals} subintervals: \
                     value {value}, error estimate {abs_err} > tolerance {tolerance}"
                )
            }
            IntegrationError::NonFiniteEstimate { mean, std_err } => {
                write!(f, "Non-finite estimate: mean {mean}, standard error {std_err}")
            }

            // ---- Protocol ----
            IntegrationError::UntrainedIntegrator => {
                write!(f, "Integrator must be trained before measuring")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<IntegrationError> for PyErr {
    fn from(err: IntegrationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
