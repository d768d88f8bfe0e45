//! models — stimulus-response models and their loss integrands.
//!
//! Purpose
//! -------
//! Provide the three models whose information losses are swept: a
//! Bernoulli model (A) and two correlated-Gaussian mixtures (B, C). Each
//! model exposes pointwise integrands and the boxes they are integrated
//! over as functions of a single free boundary (`amax` or `rhomax`).
//!
//! Key behaviors
//! -------------
//! - [`traits::LossModel`] is the seam between models and the estimator:
//!   integration, optimization, and sweeps are generic over it.
//! - [`domain::DomainBox`] validates integration regions once, at
//!   construction.
//! - Probability masses used for normalization are derived from the boxes
//!   themselves.
//!
//! Invariants & assumptions
//! ------------------------
//! - Integrands are pure and finite on their boxes for admissible
//!   boundaries; the estimator still checks every evaluation.
//! - Boundaries outside the admissible open interval surface as
//!   [`errors::DomainError::BoundaryOutOfRange`].

pub mod bernoulli;
pub mod domain;
pub mod errors;
pub mod gaussian;
pub mod traits;

pub use self::bernoulli::BernoulliModel;
pub use self::domain::{DomainBox, Interval};
pub use self::errors::{DomainError, DomainResult};
pub use self::gaussian::{AsymmetricGaussianModel, GaussianBounds, SymmetricGaussianModel};
pub use self::traits::{LossModel, ModelKind};

pub mod prelude {
    pub use super::bernoulli::BernoulliModel;
    pub use super::domain::DomainBox;
    pub use super::gaussian::{AsymmetricGaussianModel, SymmetricGaussianModel};
    pub use super::traits::{LossModel, ModelKind};
}
