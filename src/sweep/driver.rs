//! Sweep driver: descriptive loss, communication loss, and information at
//! every grid point of a model boundary.
//!
//! Per grid point:
//! 1. the descriptive loss (θ = 1) over the truncated loss box;
//! 2. the communication loss at the optimal θ;
//! 3. the transmitted information, except for models whose information
//!    domain ignores the boundary (model A), where it is estimated once up
//!    front and reused at every point;
//! 4. normalization of both losses by the probability mass of the box and
//!    of the information by the mass of its own box.
//!
//! Seeds: with a base seed, grid point `i` uses the `i`-th output of a
//! SplitMix64 stream seeded with it, so sequential and parallel runs agree
//! exactly. Without a base seed every integrator seeds itself from entropy.
use crate::{
    integration::{
        errors::IntegrationError,
        estimate::{Estimate, estimate},
        options::EstimatorOptions,
    },
    models::{
        bernoulli::BernoulliModel,
        errors::DomainError,
        gaussian::{AsymmetricGaussianModel, SymmetricGaussianModel},
        traits::LossModel,
    },
    optimization::theta_optimizer::api::optimal_theta,
    sweep::{
        errors::{Quantity, SweepError, SweepRunResult},
        grid::ParameterGrid,
        options::SweepOptions,
        result::{SweepResult, SweepRow, ThetaSummary},
    },
};
use log::debug;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::SplitMix64;

/// Sweep model A (`amax`) with quadrature everywhere.
///
/// # Errors
/// As [`sweep`].
pub fn sweep_model_a(grid: &ParameterGrid) -> SweepRunResult<SweepResult> {
    sweep(&BernoulliModel::new(), grid, &SweepOptions::default())
}

/// Sweep model B (`rhomax`) with `mc_budget` evaluations per VEGAS
/// iteration.
///
/// # Errors
/// [`SweepError::InvalidOptions`] for an unusable budget, otherwise as
/// [`sweep`].
pub fn sweep_model_b(grid: &ParameterGrid, mc_budget: usize) -> SweepRunResult<SweepResult> {
    sweep(&SymmetricGaussianModel::new(), grid, &SweepOptions::with_mc_budget(mc_budget)?)
}

/// Sweep model C (`rhomax`) with `mc_budget` evaluations per VEGAS
/// iteration.
///
/// # Errors
/// [`SweepError::InvalidOptions`] for an unusable budget, otherwise as
/// [`sweep`].
pub fn sweep_model_c(grid: &ParameterGrid, mc_budget: usize) -> SweepRunResult<SweepResult> {
    sweep(&AsymmetricGaussianModel::new(), grid, &SweepOptions::with_mc_budget(mc_budget)?)
}

/// Sweep `model` over `grid`, one grid point after the other.
///
/// # Errors
/// The first failing grid point aborts the sweep with its index, boundary
/// value, and the wrapped cause.
pub fn sweep<M: LossModel>(
    model: &M, grid: &ParameterGrid, opts: &SweepOptions,
) -> SweepRunResult<SweepResult> {
    let seeds = point_seeds(opts.seed(), grid.len());
    let shared = shared_information(model, grid, opts, &seeds)?;

    let rows = grid
        .points()
        .iter()
        .enumerate()
        .map(|(index, &parameter)| {
            evaluate_point(model, index, parameter, &point_options(opts, seeds[index]), shared)
        })
        .collect::<SweepRunResult<Vec<_>>>()?;
    Ok(SweepResult::new(model.boundary_name(), rows))
}

/// Same contract as [`sweep`], with grid points spread over `threads`
/// scoped workers. Grid point `i` goes to worker `i % threads`; results are
/// reassembled in grid order.
///
/// # Errors
/// - [`SweepError::InvalidThreads`] if `threads == 0`.
/// - Otherwise the failure with the lowest grid index.
pub fn sweep_parallel<M: LossModel>(
    model: &M, grid: &ParameterGrid, opts: &SweepOptions, threads: usize,
) -> SweepRunResult<SweepResult> {
    if threads == 0 {
        return Err(SweepError::InvalidThreads { threads });
    }
    let seeds = point_seeds(opts.seed(), grid.len());
    let shared = shared_information(model, grid, opts, &seeds)?;
    let points = grid.points();
    let workers = threads.min(points.len());

    let mut slots: Vec<Option<SweepRunResult<SweepRow>>> = vec![None; points.len()];
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let seeds = &seeds;
                scope.spawn(move || {
                    (worker..points.len())
                        .step_by(workers)
                        .map(|index| {
                            let point_opts = point_options(opts, seeds[index]);
                            let row =
                                evaluate_point(model, index, points[index], &point_opts, shared);
                            (index, row)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(outcomes) => {
                    for (index, outcome) in outcomes {
                        slots[index] = Some(outcome);
                    }
                }
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });

    let rows = slots.into_iter().flatten().collect::<SweepRunResult<Vec<_>>>()?;
    Ok(SweepResult::new(model.boundary_name(), rows))
}

/// Estimates at a single boundary value.
///
/// # Errors
/// As [`sweep`], with grid index `0`.
pub fn sweep_point<M: LossModel>(
    model: &M, parameter: f64, opts: &SweepOptions,
) -> SweepRunResult<SweepRow> {
    evaluate_point(model, 0, parameter, opts, None)
}

fn evaluate_point<M: LossModel>(
    model: &M, index: usize, parameter: f64, opts: &SweepOptions, shared: Option<Estimate>,
) -> SweepRunResult<SweepRow> {
    let domain_err = |source: DomainError| SweepError::Domain { index, parameter, source };
    let integration_err = |quantity: Quantity| {
        move |source: IntegrationError| SweepError::Integration {
            index,
            parameter,
            quantity,
            source,
        }
    };

    let domain = model.loss_domain(parameter).map_err(domain_err)?;
    let mass = model.probability_mass(parameter).map_err(domain_err)?;

    let descriptive = estimate(&|p: &[f64]| model.descriptive(p), &domain, &opts.estimator)
        .and_then(|e| e.normalized_by(mass))
        .map_err(integration_err(Quantity::Descriptive))?;

    let search = optimal_theta(model, &domain, &opts.estimator, &opts.theta)
        .map_err(|source| SweepError::Optimization { index, parameter, source })?;
    let communication =
        search.estimate.normalized_by(mass).map_err(integration_err(Quantity::Communication))?;

    let information = match shared {
        Some(information) => information,
        None => information_estimate(model, index, parameter, &opts.estimator)?,
    };

    debug!(
        "{} = {parameter:.4}: descriptive {:.6e}, communication {:.6e} \
         (theta {:.4}, converged: {}), information {:.6e}",
        model.boundary_name(),
        descriptive.mean,
        communication.mean,
        search.theta,
        search.converged,
        information.mean
    );
    Ok(SweepRow {
        parameter,
        descriptive,
        communication,
        information,
        search: Some(ThetaSummary {
            theta: search.theta,
            converged: search.converged,
            iterations: search.iterations,
        }),
    })
}

/// Information divided by the parameter-box mass of its domain.
///
/// For models B and C this makes `infomv` a rate per unit of parameter
/// mass, on the same scale as the normalized losses; the figure scripts
/// stored it as the raw integral.
fn information_estimate<M: LossModel>(
    model: &M, index: usize, parameter: f64, estimator: &EstimatorOptions,
) -> SweepRunResult<Estimate> {
    let domain_err = |source: DomainError| SweepError::Domain { index, parameter, source };
    let domain = model.information_domain(parameter).map_err(domain_err)?;
    let mass = model.information_mass(parameter).map_err(domain_err)?;
    estimate(&|p: &[f64]| model.information(p), &domain, estimator)
        .and_then(|e| e.normalized_by(mass))
        .map_err(|source| SweepError::Integration {
            index,
            parameter,
            quantity: Quantity::Information,
            source,
        })
}

/// Information estimated once, at the first grid point, for models whose
/// information domain does not move with the boundary.
fn shared_information<M: LossModel>(
    model: &M, grid: &ParameterGrid, opts: &SweepOptions, seeds: &[Option<u64>],
) -> SweepRunResult<Option<Estimate>> {
    if model.information_depends_on_boundary() {
        return Ok(None);
    }
    let Some(&parameter) = grid.points().first() else {
        return Err(SweepError::EmptyGrid);
    };
    let estimator = opts.estimator.with_seed(seeds[0]);
    information_estimate(model, 0, parameter, &estimator).map(Some)
}

fn point_options(opts: &SweepOptions, seed: Option<u64>) -> SweepOptions {
    opts.with_seed(seed)
}

/// Per-point seeds derived from the base seed.
fn point_seeds(base: Option<u64>, len: usize) -> Vec<Option<u64>> {
    match base {
        Some(base) => {
            let mut stream = SplitMix64::seed_from_u64(base);
            (0..len).map(|_| Some(stream.next_u64())).collect()
        }
        None => vec![None; len],
    }
}
