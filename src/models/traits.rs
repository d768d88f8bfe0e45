//! Model interface shared by the three stimulus-response models.
//!
//! - [`LossModel`]: pointwise integrands plus the boxes they are integrated
//!   over, parameterized by the model's single free boundary.
//! - [`ModelKind`]: tag selecting default grids and the boundary label of
//!   persisted sweeps.
//!
//! Convention: a model point lists response coordinates first, then the
//! parameter coordinates (prior, correlations). The probability mass used
//! for normalization is the volume of the trailing parameter block, which
//! starts at [`LossModel::parameter_offset`].
use crate::models::{
    domain::DomainBox,
    errors::{DomainError, DomainResult},
};
use serde::{Deserialize, Serialize};

/// Stimulus-response model with a closed-form pointwise loss integrand.
///
/// Required:
/// - `communication(point, θ)`: contribution to ΔI*(θ) at a point of
///   [`LossModel::loss_domain`].
/// - `information(point)`: contribution to the mutual information at a
///   point of [`LossModel::information_domain`].
///
/// Provided:
/// - `descriptive(point)`: ΔI_D, the communication integrand at `θ = 1`.
/// - `probability_mass` / `information_mass`: normalizers derived from the
///   boxes, so they always agree with the actual integration region.
///
/// Integrands are pure functions of their inputs and may be evaluated
/// concurrently; implementors are `Sync`.
pub trait LossModel: Sync {
    fn kind(&self) -> ModelKind;

    /// Dimension of the loss integral.
    fn dim(&self) -> usize;


    /// Open interval the boundary must lie in.
    fn admissible_boundary(&self) -> (f64, f64);

    /// Number of leading response coordinates in a loss point.
    fn parameter_offset(&self) -> usize;

    /// Box of the loss integrals (ΔI_D and ΔI*) at `boundary`.
    fn loss_domain(&self, boundary: f64) -> DomainResult<DomainBox>;

    /// Box of the information integral at `boundary`.
    fn information_domain(&self, boundary: f64) -> DomainResult<DomainBox>;

    /// `true` when the information integral changes with the boundary.
    fn information_depends_on_boundary(&self) -> bool;

    fn communication(&self, point: &[f64], theta: f64) -> f64;

    fn information(&self, point: &[f64]) -> f64;

    /// Name of the free boundary this model is swept over.
    fn boundary_name(&self) -> &'static str {
        self.kind().boundary_name()
    }

    fn descriptive(&self, point: &[f64]) -> f64 {
        self.communication(point, 1.0)
    }

    /// Reject boundaries outside the admissible open interval.
    fn check_boundary(&self, boundary: f64) -> DomainResult<()> {
        let (lower, upper) = self.admissible_boundary();
        if !boundary.is_finite() || boundary <= lower || boundary >= upper {
            return Err(DomainError::BoundaryOutOfRange {
                name: self.boundary_name(),
                value: boundary,
                lower,
                upper,
            });
        }
        Ok(())
    }

    /// Volume of the parameter sub-box of the loss domain.
    fn probability_mass(&self, boundary: f64) -> DomainResult<f64> {
        Ok(self.loss_domain(boundary)?.sub_volume(self.parameter_offset()))
    }

    /// Volume of the parameter sub-box of the information domain.
    fn information_mass(&self, boundary: f64) -> DomainResult<f64> {
        Ok(self.information_domain(boundary)?.sub_volume(self.parameter_offset()))
    }
}

/// The three models of the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Model A: Bernoulli neurons, swept over `amax`.
    Bernoulli,
    /// Model B: Gaussian mixture with equal correlations, swept over `rhomax`.
    SymmetricGaussian,
    /// Model C: Gaussian mixture with independent correlations, swept over `rhomax`.
    AsymmetricGaussian,
}

impl ModelKind {
    /// Default boundary label used as the persisted parameter key.
    pub fn boundary_name(&self) -> &'static str {
        match self {
            ModelKind::Bernoulli => "amax",
            ModelKind::SymmetricGaussian | ModelKind::AsymmetricGaussian => "rhomax",
        }
    }
}
