//! Public API surface for the θ search.
//!
//! - [`ThetaObjective`]: anything that can estimate the communication loss
//!   at a trial θ.
//! - [`ThetaOptions`]: bracket, Brent tolerance, and budgets.
//! - [`ThetaOutcome`]: normalized result returned by
//!   [`optimal_theta`](super::api::optimal_theta) and
//!   [`minimize_theta`](super::api::minimize_theta).
//!
//! Convention: the search *minimizes* the mean of the estimate at θ. The
//! estimate's standard error is carried along but never enters the
//! comparison.
use crate::{
    integration::estimate::Estimate,
    optimization::{
        errors::{OptError, OptResult},
        theta_optimizer::{
            FnEvalMap, Theta,
            validation::{
                validate_theta_hat, verify_bracket, verify_max_expansions, verify_max_iter,
                verify_tol_theta,
            },
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// Estimate of the loss as a function of the NI likelihood exponent θ.
///
/// Implementations run a full, independent integration on every call; the
/// search relies on nothing being cached across trial values.
pub trait ThetaObjective {
    fn evaluate(&self, theta: Theta) -> OptResult<Estimate>;
}

/// Configuration of the θ search.
///
/// Fields:
/// - `bracket`: initial `(lower, middle, upper)` triple; default
///   `(0.5, 1.0, 1.5)`.
/// - `max_expansions`: bracket widenings before giving up; default `32`.
/// - `tol_theta`: relative Brent tolerance on θ; default `1e-4`.
/// - `abs_tol_theta`: absolute Brent tolerance floor; default `1e-11`.
/// - `max_iter`: Brent iteration budget; default `500`.
/// - `require_convergence`: report non-convergence as
///   [`OptError::NotConverged`] instead of a flagged outcome.
/// - `verbose`: attach a terminal observer (behind the `obs_slog` feature).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaOptions {
    pub bracket: (Theta, Theta, Theta),
    pub max_expansions: usize,
    pub tol_theta: f64,
    pub abs_tol_theta: f64,
    pub max_iter: usize,
    pub require_convergence: bool,
    pub verbose: bool,
}

impl ThetaOptions {
    /// # Errors
    /// Propagates the checks in [`super::validation`] for the bracket,
    /// tolerances, and budgets.
    pub fn new(
        bracket: (Theta, Theta, Theta), max_expansions: usize, tol_theta: f64, max_iter: usize,
        require_convergence: bool,
    ) -> OptResult<Self> {
        verify_bracket(bracket.0, bracket.1, bracket.2)?;
        verify_max_expansions(max_expansions)?;
        verify_tol_theta(tol_theta)?;
        verify_max_iter(max_iter)?;
        Ok(Self {
            bracket,
            max_expansions,
            tol_theta,
            max_iter,
            require_convergence,
            ..Self::default()
        })
    }
}

impl Default for ThetaOptions {
    fn default() -> Self {
        Self {
            bracket: (0.5, 1.0, 1.5),
            max_expansions: 32,
            tol_theta: 1e-4,
            abs_tol_theta: 1e-11,
            max_iter: 500,
            require_convergence: false,
            verbose: false,
        }
    }
}

/// Canonical result of a θ search.
///
/// - `theta`: optimal θ.
/// - `estimate`: a fresh estimate of the loss at `theta`.
/// - `converged`: `true` only when a bracket was found and Brent reported
///   convergence.
/// - `status`: human-readable termination status.
/// - `iterations`: Brent iterations performed.
/// - `fn_evals`: objective evaluations; `"cost_count"` from argmin plus
///   `"bracket_count"` for the bracketing phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ThetaOutcome {
    pub theta: Theta,
    pub estimate: Estimate,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl ThetaOutcome {
    /// Build a validated outcome.
    ///
    /// # Errors
    /// - Propagates [`validate_theta_hat`] failures.
    /// - [`OptError::NotConverged`] when `require_convergence` is set and
    ///   the search did not converge.
    pub fn new(
        theta_hat: Option<Theta>, estimate: Estimate, converged: bool, status: String,
        iterations: u64, fn_evals: FnEvalMap, require_convergence: bool,
    ) -> OptResult<Self> {
        let theta = validate_theta_hat(theta_hat)?;
        if require_convergence && !converged {
            return Err(OptError::NotConverged { theta, status });
        }
        Ok(Self { theta, estimate, converged, status, iterations: iterations as usize, fn_evals })
    }

    /// Total objective evaluations across both phases.
    pub fn total_evaluations(&self) -> u64 {
        self.fn_evals.values().sum()
    }
}

/// `(converged, status)` from an argmin termination status.
pub fn classify_termination(status: &TerminationStatus) -> (bool, String) {
    match status {
        TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
            (true, format!("{status:?}"))
        }
        TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        other => (false, format!("{other:?}")),
    }
}
