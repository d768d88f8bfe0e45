//! Model A — a single Bernoulli neuron per stimulus.
//!
//! Points of the loss domain are `(q, a)`: `q` is the prior of stimulus 1
//! and `a` the firing probability. The loss integrand is
//!
//! ```text
//! q·a·ln(1 + (1−q)/q · ((1−a)/a)^θ)
//! ```
//!
//! over `q ∈ [0.05, 0.95]`, `a ∈ [0.05, amax]`. The information integrand
//! is the binary entropy `H(q)` over `q ∈ [0.05, 0.95]` alone, so the
//! information term does not move with `amax`.
use crate::models::{
    domain::DomainBox,
    errors::DomainResult,
    traits::{LossModel, ModelKind},
};

/// Bernoulli model with fixed prior and lower firing-probability bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliModel {
    pub prior_bounds: (f64, f64),
    pub firing_lower: f64,
}

impl BernoulliModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for BernoulliModel {
    fn default() -> Self {
        Self { prior_bounds: (0.05, 0.95), firing_lower: 0.05 }
    }
}

impl LossModel for BernoulliModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Bernoulli
    }

    fn dim(&self) -> usize {
        2
    }

    fn admissible_boundary(&self) -> (f64, f64) {
        (self.firing_lower, 1.0)
    }

    fn parameter_offset(&self) -> usize {
        0
    }

    fn loss_domain(&self, amax: f64) -> DomainResult<DomainBox> {
        self.check_boundary(amax)?;
        DomainBox::new(&[self.prior_bounds, (self.firing_lower, amax)])
    }

    fn information_domain(&self, _amax: f64) -> DomainResult<DomainBox> {
        DomainBox::new(&[self.prior_bounds])
    }

    fn information_depends_on_boundary(&self) -> bool {
        false
    }

    fn communication(&self, point: &[f64], theta: f64) -> f64 {
        let (q, a) = (point[0], point[1]);
        let odds = (1.0 - q) / q * ((1.0 - a) / a).powf(theta);
        q * a * odds.ln_1p()
    }

    fn information(&self, point: &[f64]) -> f64 {
        let q = point[0];
        -q * q.ln() - (1.0 - q) * (1.0 - q).ln()
    }
}
