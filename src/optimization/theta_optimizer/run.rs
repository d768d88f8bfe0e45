//! Execution helper that runs Brent's method on a θ objective.
use crate::optimization::{
    errors::OptResult,
    theta_optimizer::{
        adapter::ArgMinAdapter,
        traits::{ThetaObjective, ThetaOptions, classify_termination},
        types::{Cost, FnEvalMap, Theta, ThetaBrent},
        validation::validate_theta_hat,
    },
};
use argmin::core::{Executor, State};

/// Raw result of a Brent run before the bracket middle is considered.
#[derive(Debug, Clone, PartialEq)]
pub struct BrentRun {
    pub theta: Theta,
    pub cost: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: u64,
    pub fn_evals: FnEvalMap,
}

/// Run `solver` on `problem` with the iteration budget from `opts`.
///
/// # Feature flags
/// With `obs_slog` enabled and `opts.verbose == true`, a terminal slog
/// observer is attached with `ObserverMode::Always`.
///
/// # Errors
/// - Propagates objective failures raised inside the executor, recovered
///   through `From<argmin::core::Error> for OptError`.
/// - [`OptError::MissingThetaHat`](crate::optimization::errors::OptError::MissingThetaHat)
///   if the solver produced no best parameter.
pub fn run_brent<'a, O>(
    problem: ArgMinAdapter<'a, O>, solver: ThetaBrent, opts: &ThetaOptions,
) -> OptResult<BrentRun>
where
    O: ThetaObjective,
{
    let optimizer =
        Executor::new(problem, solver).configure(|state| state.max_iters(opts.max_iter as u64));
    #[cfg(feature = "obs_slog")]
    let optimizer = if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always)
    } else {
        optimizer
    };

    let result = optimizer.run()?;
    let state = result.state();
    let theta = validate_theta_hat(state.get_best_param().copied())?;
    let (converged, status) = classify_termination(state.get_termination_status());
    Ok(BrentRun {
        theta,
        cost: state.get_best_cost(),
        converged,
        status,
        iterations: state.get_iter(),
        fn_evals: state.get_func_counts().clone(),
    })
}
