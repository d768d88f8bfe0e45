//! Validation helpers for integration options and estimates.
//!
//! - **Tolerances**: [`verify_tolerance`] and [`verify_tolerance_pair`]
//!   reject negative or non-finite values and a pair that is both zero.
//! - **Counts**: [`verify_limit`], [`verify_budget`], [`verify_iterations`],
//!   [`verify_bins`] reject zero (or too small) counts.
//! - **Map damping**: [`verify_alpha`].
//! - **Estimates**: [`validate_estimate`] checks combined results.
use crate::integration::errors::{IntegrationError, IntegrationResult};

/// Validate a single absolute or relative tolerance.
///
/// # Errors
/// [`IntegrationError::InvalidTolerance`] if the value is non-finite or < 0.
pub fn verify_tolerance(name: &'static str, tol: f64) -> IntegrationResult<()> {
    if !tol.is_finite() {
        return Err(IntegrationError::InvalidTolerance {
            name,
            tol,
            reason: "Tolerance must be finite.",
        });
    }
    if tol < 0.0 {
        return Err(IntegrationError::InvalidTolerance {
            name,
            tol,
            reason: "Tolerance must be non-negative.",
        });
    }
    Ok(())
}

/// Validate an `(absolute, relative)` tolerance pair.
///
/// Both must pass [`verify_tolerance`] and at least one must be positive,
/// otherwise no subdivision could ever terminate.
pub fn verify_tolerance_pair(abs_tol: f64, rel_tol: f64) -> IntegrationResult<()> {
    verify_tolerance("absolute", abs_tol)?;
    verify_tolerance("relative", rel_tol)?;
    if abs_tol == 0.0 && rel_tol == 0.0 {
        return Err(IntegrationError::InvalidTolerance {
            name: "absolute",
            tol: abs_tol,
            reason: "Absolute and relative tolerances cannot both be zero.",
        });
    }
    Ok(())
}

pub fn verify_limit(limit: usize) -> IntegrationResult<()> {
    if limit == 0 {
        return Err(IntegrationError::InvalidLimit {
            limit,
            reason: "Subinterval limit must be greater than zero.",
        });
    }
    Ok(())
}

/// Per-iteration budget must afford two evaluations in at least one cube.
pub fn verify_budget(evals: usize) -> IntegrationResult<()> {
    if evals < 2 {
        return Err(IntegrationError::InvalidBudget {
            evals,
            reason: "At least two evaluations per iteration are required.",
        });
    }
    Ok(())
}

pub fn verify_iterations(iterations: usize) -> IntegrationResult<()> {
    if iterations == 0 {
        return Err(IntegrationError::InvalidIterations {
            iterations,
            reason: "Iteration count must be greater than zero.",
        });
    }
    Ok(())
}

pub fn verify_bins(bins: usize) -> IntegrationResult<()> {
    if bins == 0 {
        return Err(IntegrationError::InvalidBins {
            bins,
            reason: "Adaptive map needs at least one bin per dimension.",
        });
    }
    Ok(())
}

pub fn verify_alpha(alpha: f64) -> IntegrationResult<()> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(IntegrationError::InvalidAlpha {
            alpha,
            reason: "Damping exponent must be finite and non-negative.",
        });
    }
    Ok(())
}

/// Validate a combined `(mean, std_err)` pair.
///
/// # Errors
/// [`IntegrationError::NonFiniteEstimate`] if either value is non-finite
/// or the standard error is negative.
pub fn validate_estimate(mean: f64, std_err: f64) -> IntegrationResult<()> {
    if !mean.is_finite() || !std_err.is_finite() || std_err < 0.0 {
        return Err(IntegrationError::NonFiniteEstimate { mean, std_err });
    }
    Ok(())
}
