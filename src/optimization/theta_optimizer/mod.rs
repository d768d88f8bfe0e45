//! theta_optimizer — argmin-powered search for the optimal NI decoder.
//!
//! Purpose
//! -------
//! Minimize the communication information loss ΔI*(θ) over the likelihood
//! exponent θ of the noise-independent decoder, where every trial θ is a
//! full, independent integral estimate.
//!
//! Key behaviors
//! -------------
//! - [`bracket::find_bracket`] walks downhill from `(0.5, 1.0, 1.5)` with
//!   doubling steps until the middle point is the lowest of the three.
//! - [`builders::build_brent`] and [`run::run_brent`] refine the bracket with
//!   argmin's `BrentOpt` through [`adapter::ArgMinAdapter`], which exposes
//!   the mean of the estimate as the cost.
//! - [`api::minimize_theta`] ties both phases together, keeps the bracket
//!   middle when it beats the Brent optimum, and re-estimates the loss at
//!   the chosen θ.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objective failures (integration errors, non-finite means) abort the
//!   search and surface as [`OptError`](crate::optimization::errors::OptError).
//! - Non-convergence is not an error unless
//!   [`ThetaOptions::require_convergence`] is set; otherwise the outcome
//!   is flagged with `converged = false`.
//!
//! Downstream usage
//! ----------------
//! - The sweep driver calls [`optimal_theta`] once per grid point.
//! - Custom objectives implement [`ThetaObjective`] and call
//!   [`minimize_theta`] directly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover bracketing on toy parabolas, solver construction,
//!   convergence flags, and error propagation through argmin.

pub mod adapter;
pub mod api;
pub mod bracket;
pub mod builders;
pub mod objective;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize_theta, optimal_theta};
pub use self::objective::CommunicationLoss;
pub use self::traits::{ThetaObjective, ThetaOptions, ThetaOutcome};
pub use self::types::{Cost, FnEvalMap, Theta};

pub mod prelude {
    pub use super::api::{minimize_theta, optimal_theta};
    pub use super::traits::{ThetaObjective, ThetaOptions, ThetaOutcome};
}
