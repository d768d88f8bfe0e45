//! Integration tests for the information-loss sweep pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path from model integrands, through the
//!   estimator and the θ search, to normalized sweep rows and JSON files.
//! - Exercise the reference configurations (model A by quadrature, models
//!   B and C by seeded VEGAS at small budgets) rather than toy integrands.
//!
//! Coverage
//! --------
//! - `sweep::driver`: `sweep_model_a`, `sweep`, `sweep_parallel`,
//!   `sweep_point`.
//! - `models`: the Bernoulli closed-form information and the symmetric /
//!   asymmetric Gaussian reduction.
//! - `persistence::json`: file round trip of a computed sweep.
//!
//! Exclusions
//! ----------
//! - Full reference grids at the reference Monte Carlo budget; those are
//!   production runs, not tests.
//! - Python bindings.
use approx::assert_relative_eq;
use infoloss::{
    integration::options::{EstimatorOptions, VegasOptions},
    models::{
        bernoulli::BernoulliModel,
        gaussian::{AsymmetricGaussianModel, SymmetricGaussianModel},
        traits::LossModel,
    },
    optimization::theta_optimizer::traits::ThetaOptions,
    persistence::json::{load_json, save_json},
    sweep::{
        driver::{sweep, sweep_model_a, sweep_parallel, sweep_point},
        grid::ParameterGrid,
        options::SweepOptions,
        result::SweepRow,
    },
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Purpose
/// -------
/// Seeded, low-budget sweep options for the Monte Carlo models.
fn monte_carlo_options(seed: u64) -> SweepOptions {
    let vegas = VegasOptions::new(4_000, 4, 25, 0.5, None).unwrap();
    let estimator = EstimatorOptions { vegas, ..EstimatorOptions::default() };
    SweepOptions::new(estimator, ThetaOptions::default()).with_seed(Some(seed))
}

/// Purpose
/// -------
/// Communication mean does not exceed the descriptive mean by more than
/// their combined standard error.
fn assert_loss_ordering(row: &SweepRow) {
    let combined = row.descriptive.std_err.hypot(row.communication.std_err);
    assert!(
        row.communication.mean <= row.descriptive.mean + combined,
        "at {}: communication {:e} above descriptive {:e} ± {combined:e}",
        row.parameter,
        row.communication.mean,
        row.descriptive.mean
    );
}

/// `2·[F(0.95) − F(0.05)]` with `F(p) = p²/4 − (p²/2)·ln p`.
fn bernoulli_information_nats() -> f64 {
    let f = |p: f64| p * p / 4.0 - p * p / 2.0 * p.ln();
    2.0 * (f(0.95) - f(0.05))
}

#[test]
// Purpose
// -------
// Model A at `amax = 0.1`, the reference end-to-end check.
//
// Given
// -----
// - A single-point grid at `amax = 0.1`, default quadrature options.
//
// Expect
// ------
// - Descriptive loss within `[0, ln 2]`.
// - Communication loss not above the descriptive loss.
// - Information equal to the closed form divided by the range `0.9`.
fn model_a_small_boundary_end_to_end() {
    init_logging();
    // Arrange
    let grid = ParameterGrid::from_points(vec![0.1]).unwrap();

    // Act
    let result = sweep_model_a(&grid).unwrap();

    // Assert
    let row = result.rows[0];
    assert!(row.descriptive.mean >= 0.0 && row.descriptive.mean <= std::f64::consts::LN_2);
    assert_loss_ordering(&row);
    assert_relative_eq!(row.information.mean, bernoulli_information_nats() / 0.9, epsilon = 1e-6);
    assert_relative_eq!(bernoulli_information_nats(), 0.48880, epsilon = 1e-4);
}

#[test]
// Purpose
// -------
// Model A information does not move with `amax` and the normalized
// descriptive loss stays positive along a short grid.
fn model_a_information_is_constant_along_grid() {
    init_logging();
    let grid = ParameterGrid::open(0.05, 0.2, 0.05).unwrap();
    assert_eq!(grid.points().len(), 2);

    let result = sweep_model_a(&grid).unwrap();
    let info = result.infomv();

    assert!(info.iter().all(|&v| v == info[0]));
    assert!(result.dipmv().iter().all(|&v| v > 0.0));
    assert!(result.parameters().iter().all(|&p| p > 0.05 && p < 0.2));
}

#[test]
// Purpose
// -------
// Models B and C agree in distribution when model C's correlations are
// tied: on the diagonal of model C's box the integrands coincide exactly.
fn symmetric_model_is_asymmetric_model_on_diagonal() {
    let b = SymmetricGaussianModel::new();
    let c = AsymmetricGaussianModel::new();

    for &(x, y, q, rho) in &[(0.3, -1.2, 0.4, 0.5), (-2.0, 1.5, 0.9, -0.8), (4.0, 4.0, 0.1, 0.0)] {
        for theta in [-2.0, 0.5, 1.0, 3.0] {
            assert_eq!(
                b.communication(&[x, y, q, rho], theta),
                c.communication(&[x, y, q, rho, rho], theta)
            );
        }
        assert_eq!(b.information(&[x, y, q, rho]), c.information(&[x, y, q, rho, rho]));
    }
}

#[test]
// Purpose
// -------
// A seeded Monte Carlo grid point of model B produces finite, ordered
// estimates and is reproducible.
//
// Expect
// ------
// - Non-negative descriptive and communication losses with finite errors.
// - Communication loss within combined standard error of the descriptive
//   loss or below it.
// - Positive information.
// - Bitwise identical rows for two runs with the same seed.
fn model_b_seeded_point_is_reproducible() {
    init_logging();
    let model = SymmetricGaussianModel::new();
    let opts = monte_carlo_options(17);

    let first = sweep_point(&model, 0.5, &opts).unwrap();
    let second = sweep_point(&model, 0.5, &opts).unwrap();

    assert_eq!(first, second);
    assert!(first.descriptive.mean >= 0.0);
    assert!(first.communication.mean >= 0.0);
    assert_loss_ordering(&first);
    assert!(first.information.mean > 0.0);
    assert!(first.descriptive.std_err.is_finite() && first.communication.std_err.is_finite());
}

#[test]
// Purpose
// -------
// Threaded sweeps of model C match the sequential sweep for the same seed,
// every row keeps the loss ordering, and the computed result survives a
// file round trip unchanged.
fn model_c_parallel_sweep_round_trips_through_json() {
    init_logging();
    let model = AsymmetricGaussianModel::new();
    let grid = ParameterGrid::from_points(vec![-0.5, 0.25, 0.75]).unwrap();
    let opts = monte_carlo_options(99);

    let sequential = sweep(&model, &grid, &opts).unwrap();
    let parallel = sweep_parallel(&model, &grid, &opts, 3).unwrap();
    assert_eq!(sequential, parallel);
    for row in &sequential.rows {
        assert!(row.communication.mean >= 0.0);
        assert_loss_ordering(row);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fig7c.json");
    save_json(&path, &sequential).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(loaded.parameter_name, "rhomax");
    assert_eq!(loaded.columns(), sequential.columns());
}

#[test]
// Purpose
// -------
// The loss masses used for normalization follow the box volumes of the
// non-response coordinates.
fn probability_masses_match_parameter_boxes() {
    let a = BernoulliModel::new();
    let b = SymmetricGaussianModel::new();
    let c = AsymmetricGaussianModel::new();

    assert_relative_eq!(a.probability_mass(0.3).unwrap(), 0.9 * 0.25, epsilon = 1e-12);
    assert_relative_eq!(a.information_mass(0.3).unwrap(), 0.9, epsilon = 1e-12);
    assert_relative_eq!(b.probability_mass(0.05).unwrap(), 0.9 * 1.0, epsilon = 1e-12);
    assert_relative_eq!(c.probability_mass(0.05).unwrap(), 0.9 * 1.0 * 1.0, epsilon = 1e-12);
    assert_relative_eq!(c.probability_mass(-0.45).unwrap(), 0.9 * 0.25, epsilon = 1e-12);
}
