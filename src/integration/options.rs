//! Configuration for the two integration backends and the estimator.
//!
//! - [`QuadratureOptions`]: adaptive Gauss–Kronrod tolerances and
//!   subdivision limit (defaults `1e-6`, `1e-3`, `50`).
//! - [`VegasOptions`]: evaluations per iteration, iteration count for each
//!   of the train and measure phases, map resolution, damping exponent,
//!   and an optional RNG seed (defaults `100_000`, `10`, `50`, `0.5`,
//!   unseeded).
//! - [`EstimatorOptions`]: both of the above plus the largest dimension
//!   handled by quadrature (default `2`).
//!
//! All constructors validate their inputs; `Default` values are valid by
//! construction.
use crate::integration::{
    errors::{IntegrationError, IntegrationResult},
    validation::{
        verify_alpha, verify_bins, verify_budget, verify_iterations, verify_limit,
        verify_tolerance_pair,
    },
};

/// Largest dimension the nested quadrature backend supports.
pub const MAX_QUADRATURE_DIM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub limit: usize,
}

impl QuadratureOptions {
    /// # Errors
    /// - [`IntegrationError::InvalidTolerance`] for negative, non-finite, or
    ///   all-zero tolerances.
    /// - [`IntegrationError::InvalidLimit`] if `limit == 0`.
    pub fn new(abs_tol: f64, rel_tol: f64, limit: usize) -> IntegrationResult<Self> {
        verify_tolerance_pair(abs_tol, rel_tol)?;
        verify_limit(limit)?;
        Ok(Self { abs_tol, rel_tol, limit })
    }

    /// Acceptance threshold `max(abs_tol, rel_tol · |value|)`.
    pub fn tolerance_for(&self, value: f64) -> f64 {
        self.abs_tol.max(self.rel_tol * value.abs())
    }
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self { abs_tol: 1e-6, rel_tol: 1e-3, limit: 50 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VegasOptions {
    pub evals_per_iteration: usize,
    pub iterations: usize,
    pub bins: usize,
    pub alpha: f64,
    pub seed: Option<u64>,
}

impl VegasOptions {
    /// # Errors
    /// Propagates the count and damping checks from
    /// [`crate::integration::validation`].
    pub fn new(
        evals_per_iteration: usize, iterations: usize, bins: usize, alpha: f64, seed: Option<u64>,
    ) -> IntegrationResult<Self> {
        verify_budget(evals_per_iteration)?;
        verify_iterations(iterations)?;
        verify_bins(bins)?;
        verify_alpha(alpha)?;
        Ok(Self { evals_per_iteration, iterations, bins, alpha, seed })
    }

    /// Default options with a different per-iteration budget.
    pub fn with_budget(evals_per_iteration: usize) -> IntegrationResult<Self> {
        let d = Self::default();
        Self::new(evals_per_iteration, d.iterations, d.bins, d.alpha, d.seed)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for VegasOptions {
    fn default() -> Self {
        Self { evals_per_iteration: 100_000, iterations: 10, bins: 50, alpha: 0.5, seed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatorOptions {
    pub quadrature: QuadratureOptions,
    pub vegas: VegasOptions,
    pub max_quadrature_dim: Option<usize>,
}

impl EstimatorOptions {
    /// # Errors
    /// [`IntegrationError::UnsupportedDimension`] if `max_quadrature_dim`
    /// is zero or above [`MAX_QUADRATURE_DIM`].
    pub fn new(
        quadrature: QuadratureOptions, vegas: VegasOptions, max_quadrature_dim: Option<usize>,
    ) -> IntegrationResult<Self> {
        if let Some(dim) = max_quadrature_dim {
            if dim == 0 || dim > MAX_QUADRATURE_DIM {
                return Err(IntegrationError::UnsupportedDimension {
                    dim,
                    reason: "Quadrature handles one- and two-dimensional boxes only.",
                });
            }
        }
        Ok(Self { quadrature, vegas, max_quadrature_dim })
    }

    /// Largest dimension routed to quadrature.
    pub fn quadrature_dim(&self) -> usize {
        self.max_quadrature_dim.unwrap_or(MAX_QUADRATURE_DIM)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.vegas = self.vegas.with_seed(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_accepted_by_constructors() {
        let q = QuadratureOptions::default();
        assert_eq!(QuadratureOptions::new(q.abs_tol, q.rel_tol, q.limit), Ok(q));

        let v = VegasOptions::default();
        assert_eq!(
            VegasOptions::new(v.evals_per_iteration, v.iterations, v.bins, v.alpha, v.seed),
            Ok(v)
        );

        assert_eq!(EstimatorOptions::default().quadrature_dim(), 2);
    }

    #[test]
    fn tolerance_for_uses_larger_of_absolute_and_relative() {
        let q = QuadratureOptions::default();
        assert_eq!(q.tolerance_for(1e-4), 1e-6);
        assert_eq!(q.tolerance_for(-2.0), 2e-3);
    }

    #[test]
    fn estimator_rejects_quadrature_dim_out_of_range() {
        for dim in [0, 3] {
            let result = EstimatorOptions::new(
                QuadratureOptions::default(),
                VegasOptions::default(),
                Some(dim),
            );
            assert!(matches!(result, Err(IntegrationError::UnsupportedDimension { .. })));
        }
    }

    #[test]
    fn with_seed_overrides_vegas_seed_only() {
        let opts = EstimatorOptions::default().with_seed(Some(7));
        assert_eq!(opts.vegas.seed, Some(7));
        assert_eq!(opts.vegas.evals_per_iteration, 100_000);
        assert_eq!(opts.quadrature, QuadratureOptions::default());
    }
}
