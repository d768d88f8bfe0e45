//! optimization::errors — failures of the θ search.
//!
//! Objective failures raised inside argmin's executor come back as
//! `argmin::core::Error`; [`From<Error> for OptError`] recovers the typed
//! payload (an [`OptError`] or an [`IntegrationError`]) before falling back
//! to argmin's own error kinds.
use argmin::core::{ArgminError, Error};

use crate::integration::errors::IntegrationError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for the θ search.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- ThetaOptions ----
    /// Brent tolerance on θ needs to be positive and finite.
    InvalidTolTheta { tol: f64, reason: &'static str },
    /// Brent iteration budget needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// Initial bracket must be finite and strictly increasing.
    InvalidBracket { lower: f64, middle: f64, upper: f64, reason: &'static str },
    /// Bracket expansion budget needs to be positive.
    InvalidMaxExpansions { max_expansions: usize, reason: &'static str },

    // ---- Objective ----
    /// Objective returned a non-finite value at θ.
    NonFiniteObjective { theta: f64, value: f64 },
    /// Integration failed while evaluating the objective.
    Integration(IntegrationError),

    // ---- Outcome ----
    /// Optimal θ must be finite.
    InvalidThetaHat { value: f64, reason: &'static str },
    /// Solver finished without a best parameter.
    MissingThetaHat,
    /// Search stopped without converging and convergence was required.
    NotConverged { theta: f64, status: String },

    // ---- Backend ----
    /// argmin reported one of its own error kinds.
    Solver { kind: &'static str, text: String },
    /// Any other error that travelled through the executor.
    Backend { text: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- ThetaOptions ----
            OptError::InvalidTolTheta { tol, reason } => {
                write!(f, "Invalid theta tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid Brent iteration budget {max_iter}: {reason}")
            }
            OptError::InvalidBracket { lower, middle, upper, reason } => {
                write!(f, "Invalid bracket ({lower}, {middle}, {upper}): {reason}")
            }
            OptError::InvalidMaxExpansions { max_expansions, reason } => {
                write!(f, "Invalid bracket expansion budget {max_expansions}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteObjective { theta, value } => {
                write!(f, "Non-finite objective value {value} at theta = {theta}")
            }
            OptError::Integration(err) => {
                write!(f, "Integration failed during theta search: {err}")
            }

            // ---- Outcome ----
            OptError::InvalidThetaHat { value, reason } => {
                write!(f, "Invalid optimal theta {value}: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Brent solver returned no optimal theta"),
            OptError::NotConverged { theta, status } => {
                write!(f, "Theta search did not converge (best theta = {theta}): {status}")
            }

            // ---- Backend ----
            OptError::Solver { kind, text } => write!(f, "Brent solver error ({kind}): {text}"),
            OptError::Backend { text } => write!(f, "Optimization backend error: {text}"),
        }
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        let err = match err.downcast::<IntegrationError>() {
            Ok(int_err) => return OptError::Integration(int_err),
            Err(err) => err,
        };
        let err = match err.downcast::<ArgminError>() {
            Ok(argmin_err) => argmin_err,
            Err(err) => return OptError::Backend { text: err.to_string() },
        };
        let kind = match &err {
            ArgminError::InvalidParameter { .. } => "invalid parameter",
            ArgminError::NotImplemented { .. } => "not implemented",
            ArgminError::NotInitialized { .. } => "not initialized",
            ArgminError::ConditionViolated { .. } => "condition violated",
            ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
            ArgminError::PotentialBug { .. } => "potential bug",
            ArgminError::ImpossibleError { .. } => "impossible error",
            _ => "unclassified",
        };
        OptError::Solver { kind, text: err.to_string() }
    }
}

impl From<IntegrationError> for OptError {
    fn from(err: IntegrationError) -> Self {
        OptError::Integration(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_error_survives_argmin_round_trip() {
        let original = OptError::NonFiniteObjective { theta: 2.0, value: f64::INFINITY };
        let wrapped: Error = original.clone().into();

        assert_eq!(OptError::from(wrapped), original);
    }

    #[test]
    fn integration_error_is_recovered_from_argmin_error() {
        let wrapped: Error = IntegrationError::UntrainedIntegrator.into();

        assert_eq!(
            OptError::from(wrapped),
            OptError::Integration(IntegrationError::UntrainedIntegrator)
        );
    }

    #[test]
    fn argmin_errors_keep_their_kind() {
        let wrapped: Error = ArgminError::InvalidParameter { text: "bad".to_string() }.into();
        match OptError::from(wrapped) {
            OptError::Solver { kind, text } => {
                assert_eq!(kind, "invalid parameter");
                assert!(text.contains("bad"));
            }
            other => panic!("expected solver error, got {other:?}"),
        }

        let other: Error = std::io::Error::other("disk full").into();
        assert!(matches!(OptError::from(other), OptError::Backend { .. }));
    }
}
