//! Conversion helpers shared by the Python bindings.
//!
//! Python callers exchange sweep results as `dict[str, numpy.ndarray]`
//! keyed exactly like the JSON files of [`crate::persistence`].
use ndarray::Array1;
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyDict},
};

use crate::{
    models::traits::{LossModel, ModelKind},
    persistence::json::{Columns, from_columns},
    sweep::{
        driver::{sweep, sweep_parallel},
        grid::ParameterGrid,
        options::SweepOptions,
        result::SweepResult,
    },
};

/// Contiguous `f64` view of a 1-D array-like (`numpy.ndarray`,
/// `pandas.Series`, or a float sequence).
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(array) = raw.extract::<PyReadonlyArray1<f64>>() {
        if array.as_slice().is_ok() {
            return Ok(array);
        }
    }
    if let Ok(series) = raw.call_method1("to_numpy", (false,)) {
        if let Ok(array) = series.extract::<PyReadonlyArray1<f64>>() {
            if array.as_slice().is_ok() {
                return Ok(array);
            }
        }
    }
    let values: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(Array1::from(values).into_pyarray(py).readonly())
}

/// Explicit grid points, or the reference grid of `kind`.
pub fn build_grid(kind: ModelKind, points: Option<Vec<f64>>) -> PyResult<ParameterGrid> {
    let grid = match points {
        Some(points) => ParameterGrid::from_points(points)?,
        None => ParameterGrid::default_for(kind)?,
    };
    Ok(grid)
}

/// Run a sweep without holding the GIL, in parallel when `threads > 1`.
pub fn run_sweep<M: LossModel>(
    py: Python<'_>, model: &M, grid: &ParameterGrid, opts: &SweepOptions, threads: usize,
) -> PyResult<SweepResult> {
    let result = py.allow_threads(|| {
        if threads > 1 {
            sweep_parallel(model, grid, opts, threads)
        } else {
            sweep(model, grid, opts)
        }
    })?;
    Ok(result)
}

/// `{key: numpy.ndarray}` with the boundary column and the six value columns.
pub fn result_to_dict<'py>(py: Python<'py>, result: &SweepResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (key, column) in result.columns() {
        dict.set_item(key, column.into_pyarray(py))?;
    }
    Ok(dict)
}

/// Inverse of [`result_to_dict`]; validates the layout like a file load.
pub fn dict_to_result<'py>(py: Python<'py>, dict: &Bound<'py, PyDict>) -> PyResult<SweepResult> {
    let mut columns = Columns::new();
    for (key, value) in dict.iter() {
        let key: String = key.extract()?;
        let array = extract_f64_array(py, &value)?;
        columns.insert(key, array.as_array().to_vec());
    }
    Ok(from_columns(columns)?)
}
