//! sweep — information losses along a grid of model boundaries.
//!
//! Purpose
//! -------
//! Drive the estimator and the θ search over an ascending grid of boundary
//! values (`amax` for model A, `rhomax` for models B and C) and collect
//! normalized descriptive loss, communication loss, and information, each
//! with its standard error.
//!
//! Key behaviors
//! -------------
//! - [`grid::ParameterGrid`] builds open grids that never emit endpoints.
//! - [`driver::sweep`] evaluates grid points in order; [`driver::sweep_parallel`]
//!   spreads them over scoped threads with identical results for a given
//!   seed.
//! - [`driver::sweep_model_a`], [`driver::sweep_model_b`], and
//!   [`driver::sweep_model_c`] run the reference configurations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Grid points are independent; no state is shared between them except
//!   the boundary-independent information of model A, estimated once.
//! - A failing grid point aborts the sweep; no placeholder values are
//!   written.

pub mod driver;
pub mod errors;
pub mod grid;
pub mod options;
pub mod result;

pub use self::driver::{
    sweep, sweep_model_a, sweep_model_b, sweep_model_c, sweep_parallel, sweep_point,
};
pub use self::errors::{Quantity, SweepError, SweepRunResult};
pub use self::grid::ParameterGrid;
pub use self::options::SweepOptions;
pub use self::result::{COLUMN_KEYS, SweepResult, SweepRow, ThetaSummary};
