//! Backend-agnostic integral estimates.
//!
//! [`estimate`] is the single entry point the optimizer and sweep layers
//! use. It picks a [`Backend`] from the box dimension (adaptive quadrature
//! up to two dimensions, VEGAS above) and returns an [`Estimate`] whose
//! `std_err` is the backend's own uncertainty: the quadrature error
//! estimate, or the VEGAS standard error of the measuring phase.
use crate::{
    integration::{
        errors::IntegrationResult,
        options::{EstimatorOptions, QuadratureOptions, VegasOptions},
        quadrature::integrate_box,
        validation::validate_estimate,
        vegas::VegasIntegrator,
    },
    models::domain::DomainBox,
};
use serde::{Deserialize, Serialize};

/// Integral estimate with its uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mean: f64,
    pub std_err: f64,
}

impl Estimate {
    /// # Errors
    /// `IntegrationError::NonFiniteEstimate` for non-finite values or a
    /// negative error.
    pub fn new(mean: f64, std_err: f64) -> IntegrationResult<Self> {
        validate_estimate(mean, std_err)?;
        Ok(Self { mean, std_err })
    }

    /// Divide mean and error by a positive probability mass.
    pub fn normalized_by(self, mass: f64) -> IntegrationResult<Self> {
        Self::new(self.mean / mass, self.std_err / mass)
    }
}

/// Integration backend with its options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backend {
    DeterministicQuadrature(QuadratureOptions),
    ImportanceSamplingMonteCarlo(VegasOptions),
}

impl Backend {
    /// Quadrature for `dim <= opts.quadrature_dim()`, VEGAS otherwise.
    pub fn select(dim: usize, opts: &EstimatorOptions) -> Self {
        if dim <= opts.quadrature_dim() {
            Backend::DeterministicQuadrature(opts.quadrature)
        } else {
            Backend::ImportanceSamplingMonteCarlo(opts.vegas)
        }
    }

    /// Integrate `f` over `domain` with this backend.
    ///
    /// The Monte Carlo backend trains a fresh integrator for
    /// `iterations` iterations and then measures for as many more; only
    /// the measuring phase enters the estimate.
    pub fn integrate<F>(&self, f: &F, domain: &DomainBox) -> IntegrationResult<Estimate>
    where
        F: Fn(&[f64]) -> f64,
    {
        match self {
            Backend::DeterministicQuadrature(opts) => {
                let result = integrate_box(f, domain, opts)?;
                Estimate::new(result.value, result.abs_err)
            }
            Backend::ImportanceSamplingMonteCarlo(opts) => {
                let mut integrator = VegasIntegrator::new(domain, opts);
                integrator.train(f, opts.iterations)?;
                let result = integrator.measure(f, opts.iterations)?;
                Estimate::new(result.mean, result.std_err)
            }
        }
    }
}

/// Estimate `∫_domain f` with the backend chosen for `domain.dim()`.
///
/// # Errors
/// Propagates every backend failure; no failure is ever reported as a
/// NaN estimate.
pub fn estimate<F>(
    f: &F, domain: &DomainBox, opts: &EstimatorOptions,
) -> IntegrationResult<Estimate>
where
    F: Fn(&[f64]) -> f64,
{
    Backend::select(domain.dim(), opts).integrate(f, domain)
}
