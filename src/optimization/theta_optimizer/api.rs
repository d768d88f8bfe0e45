//! High-level entry points for the θ search.
//!
//! [`minimize_theta`] brackets the minimum downhill from the configured
//! triple, refines it with Brent's method, and re-estimates the objective
//! at the optimum. [`optimal_theta`] applies it to the communication loss
//! of a model over a box.
use crate::{
    integration::options::EstimatorOptions,
    models::{domain::DomainBox, traits::LossModel},
    optimization::{
        errors::OptResult,
        theta_optimizer::{
            adapter::ArgMinAdapter,
            bracket::find_bracket,
            builders::build_brent,
            objective::CommunicationLoss,
            run::run_brent,
            traits::{ThetaObjective, ThetaOptions, ThetaOutcome},
            types::FnEvalMap,
        },
    },
};
use log::debug;

/// Minimize the mean of `objective(θ)`.
///
/// # Behavior
/// - Brackets the minimum with [`find_bracket`]. If no bracket is found
///   within `opts.max_expansions`, the best trial seen is returned with
///   `converged = false` and Brent is skipped.
/// - Otherwise runs Brent over the outer bracket points. If the bracket
///   middle scored strictly lower than the Brent optimum, the middle wins.
/// - The returned estimate is a fresh evaluation at the chosen θ.
///
/// # Errors
/// - Propagates objective failures from any phase.
/// - [`OptError::NotConverged`](crate::optimization::errors::OptError::NotConverged)
///   when `opts.require_convergence` is set and the search did not converge.
pub fn minimize_theta<O: ThetaObjective>(
    objective: &O, opts: &ThetaOptions,
) -> OptResult<ThetaOutcome> {
    let problem = ArgMinAdapter::new(objective);
    let bracket = find_bracket(&problem, opts)?;

    let (theta, converged, status, iterations, mut fn_evals) = if bracket.found {
        let solver = build_brent(&bracket, opts)?;
        let run = run_brent(ArgMinAdapter::new(objective), solver, opts)?;
        let theta = if bracket.middle.cost < run.cost { bracket.middle.theta } else { run.theta };
        (theta, run.converged, run.status, run.iterations, run.fn_evals)
    } else {
        let best = bracket.best();
        let status = format!(
            "No bracket found after {} expansions (last triple {:.4}, {:.4}, {:.4})",
            bracket.expansions, bracket.lower.theta, bracket.middle.theta, bracket.upper.theta
        );
        (best.theta, false, status, 0, FnEvalMap::new())
    };
    fn_evals.insert("bracket_count".to_string(), bracket.evaluations() as u64);

    let estimate = objective.evaluate(theta)?;
    debug!(
        "theta* = {theta:.6} (converged: {converged}, {iterations} iterations): {:.6e} ± {:.2e}",
        estimate.mean, estimate.std_err
    );
    ThetaOutcome::new(
        Some(theta),
        estimate,
        converged,
        status,
        iterations,
        fn_evals,
        opts.require_convergence,
    )
}

/// Find the θ minimizing the communication loss of `model` over `domain`.
///
/// Each trial θ runs a complete, independent estimate with `estimator`.
///
/// # Errors
/// As [`minimize_theta`].
pub fn optimal_theta<M: LossModel>(
    model: &M, domain: &DomainBox, estimator: &EstimatorOptions, opts: &ThetaOptions,
) -> OptResult<ThetaOutcome> {
    let objective = CommunicationLoss::new(model, domain, estimator);
    minimize_theta(&objective, opts)
}
