//! vegas — adaptive importance-sampling Monte Carlo.
//!
//! - [`map`]: separable piecewise-linear map from the unit hypercube.
//! - [`integrator`]: stratified sampling with an explicit train / measure
//!   protocol.
//! - [`result`]: inverse-variance combination of iterations with a `χ²`
//!   consistency check.

pub mod integrator;
pub mod map;
pub mod result;

pub use self::integrator::VegasIntegrator;
pub use self::map::AdaptiveMap;
pub use self::result::{IterationEstimate, VegasResult};
