//! Models B and C — a pair of correlated Gaussian neurons.
//!
//! Purpose
//! -------
//! Responses `(x, y)` are drawn from a two-component mixture: stimulus 1
//! (prior `q`) centers the pair at `(−1, −1)` with correlation `ρ1`,
//! stimulus 2 (prior `1 − q`) centers it at `(1, 1)` with correlation `ρ2`,
//! both with unit variances. The noise-independent (NI) decoder replaces
//! each component by its uncorrelated counterpart and tempers the
//! likelihood by `θ`.
//!
//! Key behaviors
//! -------------
//! - [`AsymmetricGaussianModel`] (model C) integrates over
//!   `(x, y, q, ρ1, ρ2)` with `ρ1, ρ2 ∈ [−0.95, rhomax]`.
//! - [`SymmetricGaussianModel`] (model B) integrates over `(x, y, q, ρ)`
//!   and evaluates model C at `ρ1 = ρ2 = ρ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A component contributes only where its joint density is strictly
//!   positive; underflowed densities in the far tails are skipped, so the
//!   integrand is finite on the whole box.
//! - The NI posterior is computed in log space, which keeps it finite for
//!   any finite `θ`, including negative trial values visited by the
//!   bracketing search.
//!
//! Conventions
//! -----------
//! - Loss integrand: `Σ_i p_i · ln(P(s_i|r) / P_NI(s_i|r; θ))`.
//! - Information integrand: `Σ_i p_i · ln(P(s_i|r) / P(s_i))`.
use crate::models::{
    domain::DomainBox,
    errors::DomainResult,
    traits::{LossModel, ModelKind},
};
use std::f64::consts::PI;

const COMPONENT_CENTERS: [(f64, f64); 2] = [(-1.0, -1.0), (1.0, 1.0)];

/// Joint densities and priors of both mixture components at one point.
#[derive(Debug, Clone, Copy)]
struct MixturePoint {
    density: [f64; 2],
    weight: [f64; 2],
    sq_dist: [f64; 2],
}

impl MixturePoint {
    fn new(x: f64, y: f64, q: f64, rho: [f64; 2]) -> Self {
        let weight = [q, 1.0 - q];
        let mut density = [0.0; 2];
        let mut sq_dist = [0.0; 2];
        for i in 0..2 {
            let (cx, cy) = COMPONENT_CENTERS[i];
            let (ux, uy) = (x - cx, y - cy);
            let det = 1.0 - rho[i] * rho[i];
            sq_dist[i] = ux * ux + uy * uy;
            let quad = (sq_dist[i] - 2.0 * rho[i] * ux * uy) / (2.0 * det);
            density[i] = weight[i] / (2.0 * PI * det.sqrt()) * (-quad).exp();
        }
        Self { density, weight, sq_dist }
    }

    /// `ln P_NI(s_i | r; θ)` for both components, normalized by log-sum-exp.
    fn log_independent_posterior(&self, theta: f64) -> [f64; 2] {
        let l0 = self.weight[0].ln() - 0.5 * theta * self.sq_dist[0];
        let l1 = self.weight[1].ln() - 0.5 * theta * self.sq_dist[1];
        let max = l0.max(l1);
        let lse = max + ((l0 - max).exp() + (l1 - max).exp()).ln();
        [l0 - lse, l1 - lse]
    }

    /// `Σ_{p_i > 0} p_i · (ln P(s_i|r) − reference_i)`.
    fn weighted_log_ratio(&self, reference: [f64; 2]) -> f64 {
        let total = self.density[0] + self.density[1];
        (0..2)
            .filter(|&i| self.density[i] > 0.0)
            .map(|i| self.density[i] * ((self.density[i] / total).ln() - reference[i]))
            .sum()
    }

    fn communication(&self, theta: f64) -> f64 {
        self.weighted_log_ratio(self.log_independent_posterior(theta))
    }

    fn information(&self) -> f64 {
        self.weighted_log_ratio([self.weight[0].ln(), self.weight[1].ln()])
    }
}

/// Fixed (non-swept) bounds shared by the Gaussian models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBounds {
    pub response: (f64, f64),
    pub prior: (f64, f64),
    pub rho_lower: f64,
}

impl Default for GaussianBounds {
    fn default() -> Self {
        Self { response: (-5.0, 5.0), prior: (0.05, 0.95), rho_lower: -0.95 }
    }
}

/// Model C: independent correlation coefficients `ρ1`, `ρ2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AsymmetricGaussianModel {
    pub bounds: GaussianBounds,
}

impl AsymmetricGaussianModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LossModel for AsymmetricGaussianModel {
    fn kind(&self) -> ModelKind {
        ModelKind::AsymmetricGaussian
    }

    fn dim(&self) -> usize {
        5
    }

    fn admissible_boundary(&self) -> (f64, f64) {
        (self.bounds.rho_lower, 1.0)
    }

    fn parameter_offset(&self) -> usize {
        2
    }

    fn loss_domain(&self, rhomax: f64) -> DomainResult<DomainBox> {
        self.check_boundary(rhomax)?;
        let b = &self.bounds;
        let rho = (b.rho_lower, rhomax);
        DomainBox::new(&[b.response, b.response, b.prior, rho, rho])
    }

    fn information_domain(&self, rhomax: f64) -> DomainResult<DomainBox> {
        self.loss_domain(rhomax)
    }

    fn information_depends_on_boundary(&self) -> bool {
        true
    }

    fn communication(&self, point: &[f64], theta: f64) -> f64 {
        MixturePoint::new(point[0], point[1], point[2], [point[3], point[4]]).communication(theta)
    }

    fn information(&self, point: &[f64]) -> f64 {
        MixturePoint::new(point[0], point[1], point[2], [point[3], point[4]]).information()
    }
}

/// Model B: one correlation coefficient shared by both stimuli.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SymmetricGaussianModel {
    inner: AsymmetricGaussianModel,
}

impl SymmetricGaussianModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: GaussianBounds) -> Self {
        Self { inner: AsymmetricGaussianModel { bounds } }
    }

    /// Model C point `(x, y, q, ρ, ρ)` for a model B point `(x, y, q, ρ)`.
    fn promote(point: &[f64]) -> [f64; 5] {
        [point[0], point[1], point[2], point[3], point[3]]
    }
}

impl LossModel for SymmetricGaussianModel {
    fn kind(&self) -> ModelKind {
        ModelKind::SymmetricGaussian
    }

    fn dim(&self) -> usize {
        4
    }

    fn admissible_boundary(&self) -> (f64, f64) {
        self.inner.admissible_boundary()
    }

    fn parameter_offset(&self) -> usize {
        2
    }

    fn loss_domain(&self, rhomax: f64) -> DomainResult<DomainBox> {
        self.check_boundary(rhomax)?;
        let b = &self.inner.bounds;
        DomainBox::new(&[b.response, b.response, b.prior, (b.rho_lower, rhomax)])
    }

    fn information_domain(&self, rhomax: f64) -> DomainResult<DomainBox> {
        self.loss_domain(rhomax)
    }

    fn information_depends_on_boundary(&self) -> bool {
        true
    }

    fn communication(&self, point: &[f64], theta: f64) -> f64 {
        self.inner.communication(&Self::promote(point), theta)
    }

    fn information(&self, point: &[f64]) -> f64 {
        self.inner.information(&Self::promote(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::DomainError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Pointwise properties of the Gaussian integrands: exactness of the NI
    // decoder without correlations, non-negativity, finiteness in the far
    // tails, and the model B ↔ model C reduction. Box and mass wiring is
    // covered at the end.
    // -------------------------------------------------------------------------

    fn sample_points() -> Vec<[f64; 5]> {
        vec![
            [0.0, 0.0, 0.5, 0.3, -0.4],
            [-1.2, 0.7, 0.2, 0.9, 0.1],
            [2.5, -3.0, 0.8, -0.9, 0.95],
            [0.3, 0.3, 0.05, 0.0, 0.6],
        ]
    }

    #[test]
    // Purpose
    // -------
    // Without noise correlations the NI decoder is exact at θ = 1, so the
    // descriptive integrand vanishes everywhere.
    fn uncorrelated_responses_have_zero_descriptive_loss() {
        let model = AsymmetricGaussianModel::new();
        for point in [[0.0, 0.0, 0.5, 0.0, 0.0], [1.5, -2.0, 0.3, 0.0, 0.0]] {
            assert_relative_eq!(model.descriptive(&point), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Both integrands are a density-weighted KL divergence, hence
    // non-negative at every point and for any θ.
    fn integrands_are_non_negative() {
        let model = AsymmetricGaussianModel::new();
        for point in sample_points() {
            for theta in [0.2, 1.0, 1.7, 4.0] {
                let value = model.communication(&point, theta);
                assert!(value >= -1e-15, "communication {value} < 0 at {point:?}, θ = {theta}");
            }
            assert!(model.information(&point) >= -1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Far-tail points where a component density underflows must still
    // produce finite values, including for extreme or negative θ.
    fn integrands_are_finite_in_far_tails() {
        let model = AsymmetricGaussianModel::new();
        let corners = [
            [5.0, 5.0, 0.05, -0.95, -0.95],
            [-5.0, 5.0, 0.95, 0.95, -0.95],
            [5.0, -5.0, 0.5, -0.95, 0.95],
        ];
        for point in corners {
            for theta in [-3.0, 0.0, 1.0, 50.0] {
                assert!(model.communication(&point, theta).is_finite());
            }
            assert!(model.information(&point).is_finite());
        }
    }

    #[test]
    // Purpose
    // -------
    // Component densities that underflow to exactly zero are skipped.
    //
    // Given
    // -----
    // - (27, 27, 0.5, 0, 0): the exponent of component 0 is −784, of
    //   component 1 is −676, so only the first density is zero.
    // - (30, 30, 0.5, 0, 0): both densities are zero.
    //
    // Expect
    // ------
    // - Finite communication and information values for every θ; zero where
    //   both components vanish.
    fn underflowed_component_densities_are_skipped() {
        let one_zero = MixturePoint::new(27.0, 27.0, 0.5, [0.0, 0.0]);
        assert_eq!(one_zero.density[0], 0.0);
        assert!(one_zero.density[1] > 0.0);

        let both_zero = MixturePoint::new(30.0, 30.0, 0.5, [0.0, 0.0]);
        assert_eq!(both_zero.density, [0.0, 0.0]);

        let model = AsymmetricGaussianModel::new();
        for theta in [-3.0, 0.0, 1.0, 50.0] {
            let value = model.communication(&[27.0, 27.0, 0.5, 0.0, 0.0], theta);
            assert!(value.is_finite() && value >= 0.0, "θ = {theta}: {value}");
            assert_eq!(model.communication(&[30.0, 30.0, 0.5, 0.0, 0.0], theta), 0.0);
        }
        assert!(model.information(&[27.0, 27.0, 0.5, 0.0, 0.0]).is_finite());
        assert_eq!(model.information(&[30.0, 30.0, 0.5, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn symmetric_model_matches_asymmetric_on_diagonal() {
        let symmetric = SymmetricGaussianModel::new();
        let asymmetric = AsymmetricGaussianModel::new();
        for [x, y, q, rho, _] in sample_points() {
            let point = [x, y, q, rho];
            let diagonal = [x, y, q, rho, rho];
            assert_eq!(
                symmetric.communication(&point, 1.3),
                asymmetric.communication(&diagonal, 1.3)
            );
            assert_eq!(symmetric.information(&point), asymmetric.information(&diagonal));
        }
    }

    #[test]
    fn log_independent_posterior_is_normalized() {
        let mix = MixturePoint::new(0.4, -0.2, 0.3, [0.5, -0.5]);
        for theta in [-2.0, 0.0, 1.0, 30.0] {
            let [l0, l1] = mix.log_independent_posterior(theta);
            assert_relative_eq!(l0.exp() + l1.exp(), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn gaussian_domains_and_masses() {
        let b = SymmetricGaussianModel::new();
        let c = AsymmetricGaussianModel::new();

        assert_eq!(b.loss_domain(0.5).unwrap().dim(), 4);
        assert_eq!(c.loss_domain(0.5).unwrap().dim(), 5);
        assert_relative_eq!(b.probability_mass(0.5).unwrap(), 0.9 * 1.45, epsilon = 1e-12);
        assert_relative_eq!(c.probability_mass(0.5).unwrap(), 0.9 * 1.45 * 1.45, epsilon = 1e-12);
        assert_relative_eq!(
            c.information_mass(0.5).unwrap(),
            c.probability_mass(0.5).unwrap(),
            epsilon = 1e-15
        );
        assert!(b.information_depends_on_boundary());
    }

    #[test]
    fn gaussian_rejects_boundaries_outside_open_interval() {
        let c = AsymmetricGaussianModel::new();
        for rhomax in [-0.95, -1.0, 1.0, f64::INFINITY] {
            match c.loss_domain(rhomax) {
                Err(DomainError::BoundaryOutOfRange { name, .. }) => assert_eq!(name, "rhomax"),
                other => panic!("expected BoundaryOutOfRange for {rhomax}, got {other:?}"),
            }
        }
    }
}
