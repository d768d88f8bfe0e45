//! theta_optimizer::types — shared numeric aliases and solver wiring.
//!
//! The θ search is one-dimensional, so parameters and costs are plain
//! `f64`.
use argmin::solver::brent::BrentOpt;
use std::collections::HashMap;

/// Likelihood exponent of the NI decoder.
pub type Theta = f64;

/// Mean communication-loss estimate at θ.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Brent's method specialized to the scalar θ search.
pub type ThetaBrent = BrentOpt<Cost>;
