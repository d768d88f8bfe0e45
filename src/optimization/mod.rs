//! optimization — θ search and its error surface.
//!
//! Purpose
//! -------
//! Provide the one-dimensional optimization layer that turns the
//! communication-loss objective into an optimal NI decoder: an argmin
//! Brent solver behind a downhill bracket search, plus a single error
//! enum (`errors::OptError`) with a common result alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - The search minimizes the mean of an integral estimate; the estimate's
//!   uncertainty is reported but never used for decisions.
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors. Integration failures are wrapped, not
//!   flattened, in `OptError::Integration`.
//! - This module only logs through the `log` facade (`debug!` per search,
//!   `trace!` per trial); installing a logger is up to the caller.

pub mod errors;
pub mod theta_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use infoloss::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::theta_optimizer::prelude::*;
}
