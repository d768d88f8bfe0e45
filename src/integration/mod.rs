//! integration — integral estimates over axis-aligned boxes.
//!
//! Purpose
//! -------
//! Turn a pointwise integrand and a [`DomainBox`](crate::models::DomainBox)
//! into an [`Estimate`] `(mean, std_err)`, choosing a deterministic or a
//! Monte Carlo backend from the box dimension.
//!
//! Key behaviors
//! -------------
//! - [`quadrature`]: iterated adaptive Gauss–Kronrod (21-point) for one- and
//!   two-dimensional boxes, with absolute/relative tolerances and a
//!   subdivision limit.
//! - [`vegas`]: adaptive importance sampling with stratification, an
//!   explicit train / measure protocol, and inverse-variance combination of
//!   iterations.
//! - [`estimate()`]: the dispatching entry point used by every caller.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every integrand evaluation is checked; the first NaN or infinity
//!   aborts the estimate with
//!   [`IntegrationError::NonFiniteIntegrand`](errors::IntegrationError::NonFiniteIntegrand).
//! - Estimates are finite with a non-negative error by construction.
//!
//! Conventions
//! -----------
//! - Integrands are `Fn(&[f64]) -> f64` with coordinates in box order.
//! - Monte Carlo runs are reproducible when
//!   [`VegasOptions::seed`](options::VegasOptions::seed) is set.

pub mod errors;
pub mod estimate;
pub mod options;
pub mod quadrature;
pub mod validation;
pub mod vegas;

pub use self::errors::{IntegrationError, IntegrationResult};
pub use self::estimate::{Backend, Estimate, estimate};
pub use self::options::{EstimatorOptions, QuadratureOptions, VegasOptions};

pub mod prelude {
    pub use super::errors::{IntegrationError, IntegrationResult};
    pub use super::estimate::{Backend, Estimate, estimate};
    pub use super::options::{EstimatorOptions, QuadratureOptions, VegasOptions};
}
