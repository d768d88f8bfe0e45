//! Sweep output: one row per grid point, readable as persisted columns.
//!
//! Column names follow the persisted layout:
//!
//! | column   | meaning                                   |
//! |----------|-------------------------------------------|
//! | `dipmv`  | descriptive loss, mean                    |
//! | `dipsd`  | descriptive loss, standard error          |
//! | `dilmv`  | communication loss, mean                  |
//! | `dilsd`  | communication loss, standard error        |
//! | `infomv` | transmitted information, mean             |
//! | `infosd` | transmitted information, standard error   |
//!
//! plus the boundary column named after the model parameter (`amax` or
//! `rhomax`).
use crate::integration::estimate::Estimate;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Persisted value columns, in output order.
pub const COLUMN_KEYS: [&str; 6] = ["dipmv", "dipsd", "dilmv", "dilsd", "infomv", "infosd"];

/// Diagnostics of the θ search at one grid point. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThetaSummary {
    pub theta: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Normalized estimates at one boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub parameter: f64,
    pub descriptive: Estimate,
    pub communication: Estimate,
    pub information: Estimate,
    /// `None` for rows read back from storage.
    pub search: Option<ThetaSummary>,
}

impl SweepRow {
    /// Values in [`COLUMN_KEYS`] order.
    pub fn values(&self) -> [f64; 6] {
        [
            self.descriptive.mean,
            self.descriptive.std_err,
            self.communication.mean,
            self.communication.std_err,
            self.information.mean,
            self.information.std_err,
        ]
    }
}

/// Completed sweep, rows in grid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub parameter_name: String,
    pub rows: Vec<SweepRow>,
}

impl SweepResult {
    pub fn new(parameter_name: impl Into<String>, rows: Vec<SweepRow>) -> Self {
        Self { parameter_name: parameter_name.into(), rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, f: impl Fn(&SweepRow) -> f64) -> Array1<f64> {
        self.rows.iter().map(f).collect()
    }

    pub fn parameters(&self) -> Array1<f64> {
        self.column(|r| r.parameter)
    }

    pub fn dipmv(&self) -> Array1<f64> {
        self.column(|r| r.descriptive.mean)
    }

    pub fn dipsd(&self) -> Array1<f64> {
        self.column(|r| r.descriptive.std_err)
    }

    pub fn dilmv(&self) -> Array1<f64> {
        self.column(|r| r.communication.mean)
    }

    pub fn dilsd(&self) -> Array1<f64> {
        self.column(|r| r.communication.std_err)
    }

    pub fn infomv(&self) -> Array1<f64> {
        self.column(|r| r.information.mean)
    }

    pub fn infosd(&self) -> Array1<f64> {
        self.column(|r| r.information.std_err)
    }

    /// `(key, column)` pairs: the boundary column first, then [`COLUMN_KEYS`].
    pub fn columns(&self) -> Vec<(String, Array1<f64>)> {
        let mut columns = Vec::with_capacity(COLUMN_KEYS.len() + 1);
        columns.push((self.parameter_name.clone(), self.parameters()));
        for (k, key) in COLUMN_KEYS.iter().enumerate() {
            columns.push((key.to_string(), self.column(|r| r.values()[k])));
        }
        columns
    }
}
