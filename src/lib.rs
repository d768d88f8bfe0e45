//! infoloss — information lost by decoders that ignore noise correlations.
//!
//! Purpose
//! -------
//! Estimate, along a sweep of a model boundary, the descriptive information
//! loss of the noise-independent (NI) decoder, the communication loss of the
//! best reweighted NI decoder, and the transmitted information, each with a
//! standard error. With the `python-bindings` feature the crate also builds
//! the `_infoloss` extension module.
//!
//! Key behaviors
//! -------------
//! - [`models`]: the integrands of models A, B, and C and their boxes.
//! - [`integration`]: deterministic adaptive quadrature for one- and
//!   two-dimensional boxes, VEGAS Monte Carlo above.
//! - [`optimization`]: bracketed Brent search for the optimal θ.
//! - [`sweep`]: the per-grid-point pipeline, sequential or threaded.
//! - [`persistence`]: JSON column files of sweep results.
//!
//! Invariants & assumptions
//! ------------------------
//! - Data flows one way (models → integration → optimization → sweep →
//!   persistence); no layer mutates another's state.
//! - Every failure is a typed error; no estimate is ever reported as NaN.
//!
//! Conventions
//! -----------
//! - Information is measured in nats.
//! - The crate logs through `log` and never installs a logger.
//! - Python callers receive `dict[str, numpy.ndarray]` keyed like the JSON
//!   files: the boundary name plus `dipmv`, `dipsd`, `dilmv`, `dilsd`,
//!   `infomv`, `infosd`.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the end-to-end sweep tests under `tests/`.

pub mod integration;
pub mod models;
pub mod optimization;
pub mod persistence;
pub mod sweep;

#[cfg(feature = "python-bindings")]
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::{
    models::{
        bernoulli::BernoulliModel,
        gaussian::{AsymmetricGaussianModel, SymmetricGaussianModel},
        traits::ModelKind,
    },
    persistence::json::{load_json, save_json},
    sweep::options::{DEFAULT_MC_BUDGET, SweepOptions},
    utils::{build_grid, dict_to_result, result_to_dict, run_sweep},
};

/// Sweep model A over `amax`.
///
/// Parameters
/// ----------
/// - `points`: optional ascending `amax` values in `(0.05, 1)`; defaults to
///   `0.075, …, 0.95` with step `0.025`.
/// - `threads`: worker threads; `1` runs sequentially.
///
/// Returns
/// -------
/// `dict[str, numpy.ndarray]` with keys `amax`, `dipmv`, `dipsd`, `dilmv`,
/// `dilsd`, `infomv`, `infosd`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (points = None, threads = 1))]
fn sweep_model_a<'py>(
    py: Python<'py>, points: Option<Vec<f64>>, threads: usize,
) -> PyResult<Bound<'py, PyDict>> {
    let grid = build_grid(ModelKind::Bernoulli, points)?;
    let result = run_sweep(py, &BernoulliModel::new(), &grid, &SweepOptions::default(), threads)?;
    result_to_dict(py, &result)
}

/// Sweep model B over `rhomax` with `mc_budget` evaluations per VEGAS
/// iteration. A `seed` makes the run reproducible.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (points = None, mc_budget = DEFAULT_MC_BUDGET, seed = None, threads = 1))]
fn sweep_model_b<'py>(
    py: Python<'py>, points: Option<Vec<f64>>, mc_budget: usize, seed: Option<u64>,
    threads: usize,
) -> PyResult<Bound<'py, PyDict>> {
    let grid = build_grid(ModelKind::SymmetricGaussian, points)?;
    let opts = SweepOptions::with_mc_budget(mc_budget)?.with_seed(seed);
    let result = run_sweep(py, &SymmetricGaussianModel::new(), &grid, &opts, threads)?;
    result_to_dict(py, &result)
}

/// Sweep model C over `rhomax`; arguments as for `sweep_model_b`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (points = None, mc_budget = DEFAULT_MC_BUDGET, seed = None, threads = 1))]
fn sweep_model_c<'py>(
    py: Python<'py>, points: Option<Vec<f64>>, mc_budget: usize, seed: Option<u64>,
    threads: usize,
) -> PyResult<Bound<'py, PyDict>> {
    let grid = build_grid(ModelKind::AsymmetricGaussian, points)?;
    let opts = SweepOptions::with_mc_budget(mc_budget)?.with_seed(seed);
    let result = run_sweep(py, &AsymmetricGaussianModel::new(), &grid, &opts, threads)?;
    result_to_dict(py, &result)
}

/// Write a result dictionary to a JSON file.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "save_json")]
fn py_save_json<'py>(py: Python<'py>, path: &str, result: &Bound<'py, PyDict>) -> PyResult<()> {
    let result = dict_to_result(py, result)?;
    save_json(path, &result)?;
    Ok(())
}

/// Read a JSON result file into a dictionary of arrays.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "load_json")]
fn py_load_json<'py>(py: Python<'py>, path: &str) -> PyResult<Bound<'py, PyDict>> {
    let result = load_json(path)?;
    result_to_dict(py, &result)
}

/// _infoloss — PyO3 module initializer.
///
/// Registers the `sweeps` and `io` submodules and adds them to
/// `sys.modules` so `infoloss.sweeps` and `infoloss.io` import with dot
/// notation.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _infoloss<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let sweeps_mod = PyModule::new(py, "sweeps")?;
    sweeps_mod.add_function(wrap_pyfunction!(sweep_model_a, &sweeps_mod)?)?;
    sweeps_mod.add_function(wrap_pyfunction!(sweep_model_b, &sweeps_mod)?)?;
    sweeps_mod.add_function(wrap_pyfunction!(sweep_model_c, &sweeps_mod)?)?;
    m.add_submodule(&sweeps_mod)?;

    let io_mod = PyModule::new(py, "io")?;
    io_mod.add_function(wrap_pyfunction!(py_save_json, &io_mod)?)?;
    io_mod.add_function(wrap_pyfunction!(py_load_json, &io_mod)?)?;
    m.add_submodule(&io_mod)?;

    let modules = py.import("sys")?.getattr("modules")?;
    modules.set_item("infoloss.sweeps", sweeps_mod)?;
    modules.set_item("infoloss.io", io_mod)?;
    Ok(())
}
