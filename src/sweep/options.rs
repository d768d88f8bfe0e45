//! Options of a full sweep: how every integral is estimated and how θ is
//! searched at each grid point.
use crate::{
    integration::options::{EstimatorOptions, VegasOptions},
    optimization::theta_optimizer::traits::ThetaOptions,
    sweep::errors::{SweepError, SweepRunResult},
};

/// Reference Monte Carlo budget per VEGAS iteration.
pub const DEFAULT_MC_BUDGET: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SweepOptions {
    pub estimator: EstimatorOptions,
    pub theta: ThetaOptions,
}

impl SweepOptions {
    pub fn new(estimator: EstimatorOptions, theta: ThetaOptions) -> Self {
        Self { estimator, theta }
    }

    /// Default options with `mc_budget` evaluations per VEGAS iteration.
    ///
    /// # Errors
    /// [`SweepError::InvalidOptions`] if the budget is rejected by
    /// [`VegasOptions::with_budget`].
    pub fn with_mc_budget(mc_budget: usize) -> SweepRunResult<Self> {
        let vegas = VegasOptions::with_budget(mc_budget).map_err(SweepError::InvalidOptions)?;
        let estimator = EstimatorOptions { vegas, ..EstimatorOptions::default() };
        Ok(Self { estimator, theta: ThetaOptions::default() })
    }

    /// Base seed of the sweep; each grid point derives its own from it.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.estimator = self.estimator.with_seed(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.estimator.vegas.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::errors::IntegrationError;

    #[test]
    fn mc_budget_reaches_vegas_options() {
        let opts = SweepOptions::with_mc_budget(5_000).unwrap().with_seed(Some(7));

        assert_eq!(opts.estimator.vegas.evals_per_iteration, 5_000);
        assert_eq!(opts.seed(), Some(7));
        assert_eq!(opts.theta, ThetaOptions::default());
    }

    #[test]
    fn tiny_mc_budget_is_rejected() {
        assert!(matches!(
            SweepOptions::with_mc_budget(1),
            Err(SweepError::InvalidOptions(IntegrationError::InvalidBudget { .. }))
        ));
    }
}
