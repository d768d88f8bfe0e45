//! Adapter that exposes a [`ThetaObjective`] as an `argmin` problem.
//!
//! The cost handed to argmin is the *mean* of the estimate at θ. Errors
//! raised by the objective (integration failures included) are boxed into
//! `argmin::core::Error` here and recovered by
//! `From<argmin::core::Error> for OptError` once the executor returns.
use crate::optimization::{
    errors::OptResult,
    theta_optimizer::{
        traits::ThetaObjective,
        types::{Cost, Theta},
        validation::validate_value,
    },
};
use argmin::core::{CostFunction, Error};
use log::trace;

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, O: ThetaObjective> {
    pub objective: &'a O,
}

impl<'a, O: ThetaObjective> ArgMinAdapter<'a, O> {
    pub fn new(objective: &'a O) -> Self {
        Self { objective }
    }

    /// Evaluate the validated mean cost at θ.
    pub fn mean_cost(&self, theta: Theta) -> OptResult<Cost> {
        let estimate = self.objective.evaluate(theta)?;
        validate_value(theta, estimate.mean)?;
        trace!("theta trial {theta:.6}: {:.6e} ± {:.2e}", estimate.mean, estimate.std_err);
        Ok(estimate.mean)
    }
}

impl<'a, O: ThetaObjective> CostFunction for ArgMinAdapter<'a, O> {
    type Param = Theta;
    type Output = Cost;

    /// # Errors
    /// Propagates any `OptError` from the objective via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.mean_cost(*theta)?)
    }
}
