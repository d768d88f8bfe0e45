//! Communication-loss objective for a model over a fixed box.
use crate::{
    integration::{
        estimate::{Estimate, estimate},
        options::EstimatorOptions,
    },
    models::{domain::DomainBox, traits::LossModel},
    optimization::{errors::OptResult, theta_optimizer::traits::ThetaObjective},
};

/// `θ ↦ estimate(∫ communication(·, θ))` for one model and box.
///
/// Every evaluation builds a fresh integrator; with a seeded estimator all
/// trials see the same random stream.
#[derive(Debug, Clone)]
pub struct CommunicationLoss<'a, M: LossModel> {
    pub model: &'a M,
    pub domain: &'a DomainBox,
    pub options: &'a EstimatorOptions,
}

impl<'a, M: LossModel> CommunicationLoss<'a, M> {
    pub fn new(model: &'a M, domain: &'a DomainBox, options: &'a EstimatorOptions) -> Self {
        Self { model, domain, options }
    }
}

impl<'a, M: LossModel> ThetaObjective for CommunicationLoss<'a, M> {
    fn evaluate(&self, theta: f64) -> OptResult<Estimate> {
        let integrand = |point: &[f64]| self.model.communication(point, theta);
        Ok(estimate(&integrand, self.domain, self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BernoulliModel;

    #[test]
    fn objective_at_unit_theta_is_descriptive_loss() {
        let model = BernoulliModel::new();
        let domain = model.loss_domain(0.3).unwrap();
        let options = EstimatorOptions::default();
        let objective = CommunicationLoss::new(&model, &domain, &options);

        let at_one = objective.evaluate(1.0).unwrap();
        let descriptive = estimate(&|p: &[f64]| model.descriptive(p), &domain, &options).unwrap();

        assert_eq!(at_one, descriptive);
    }
}
