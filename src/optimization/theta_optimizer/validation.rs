//! Validation helpers for the θ search.
//!
//! - **Options**: [`verify_tol_theta`], [`verify_max_iter`],
//!   [`verify_max_expansions`], [`verify_bracket`].
//! - **Objective values**: [`validate_value`] rejects non-finite costs.
//! - **Outcome**: [`validate_theta_hat`] ensures an optimum exists and is
//!   finite.
use crate::optimization::{
    errors::{OptError, OptResult},
    theta_optimizer::types::Theta,
};

/// Validate the Brent tolerance on θ.
///
/// # Errors
/// Returns [`OptError::InvalidTolTheta`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_theta(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolTheta { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolTheta { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

pub fn verify_max_expansions(max_expansions: usize) -> OptResult<()> {
    if max_expansions == 0 {
        return Err(OptError::InvalidMaxExpansions {
            max_expansions,
            reason: "Bracket search needs at least one expansion step.",
        });
    }
    Ok(())
}

/// Validate an initial bracket triple.
///
/// # Errors
/// [`OptError::InvalidBracket`] if any point is non-finite or the triple
/// is not strictly increasing.
pub fn verify_bracket(lower: f64, middle: f64, upper: f64) -> OptResult<()> {
    if !(lower.is_finite() && middle.is_finite() && upper.is_finite()) {
        return Err(OptError::InvalidBracket {
            lower,
            middle,
            upper,
            reason: "Bracket points must be finite.",
        });
    }
    if !(lower < middle && middle < upper) {
        return Err(OptError::InvalidBracket {
            lower,
            middle,
            upper,
            reason: "Bracket points must be strictly increasing.",
        });
    }
    Ok(())
}

/// Validate and unwrap the optimal θ.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no value was provided.
/// - [`OptError::InvalidThetaHat`] if the value is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(value) if value.is_finite() => Ok(value),
        Some(value) => {
            Err(OptError::InvalidThetaHat { value, reason: "Optimal theta must be finite." })
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that an objective value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteObjective`] if the value is `NaN` or infinite.
pub fn validate_value(theta: Theta, value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteObjective { theta, value });
    }
    Ok(())
}
