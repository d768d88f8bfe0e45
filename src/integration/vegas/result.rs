//! Per-iteration VEGAS estimates and their inverse-variance combination.
//!
//! Iterations are combined with weights `1/σ_i²`. The combined standard
//! error is `(Σ 1/σ_i²)^{-1/2}`, and the consistency of the iterations is
//! summarized by `χ² = Σ (I_i − Ī)²/σ_i²` on `n − 1` degrees of freedom,
//! with `Q = P(χ²_{n−1} > χ²)`. A small `Q` means the iterations disagree
//! more than their errors allow and the estimate is suspect.
use crate::integration::{
    errors::{IntegrationError, IntegrationResult},
    validation::validate_estimate,
};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Variance floor keeping weights finite for exactly integrable iterations.
const VARIANCE_FLOOR: f64 = 1e-300;

/// Estimate from one VEGAS iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationEstimate {
    pub mean: f64,
    pub variance: f64,
}

/// Combined estimate over a sequence of iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegasResult {
    pub iterations: Vec<IterationEstimate>,
    pub mean: f64,
    pub std_err: f64,
    pub chi2: f64,
    pub dof: usize,
    pub q_value: f64,
}

impl VegasResult {
    /// Combine iterations by inverse-variance weighting.
    ///
    /// # Errors
    /// - [`IntegrationError::InvalidIterations`] for an empty sequence.
    /// - [`IntegrationError::NonFiniteEstimate`] if the combination is not
    ///   finite.
    pub fn combine(iterations: Vec<IterationEstimate>) -> IntegrationResult<Self> {
        if iterations.is_empty() {
            return Err(IntegrationError::InvalidIterations {
                iterations: 0,
                reason: "At least one iteration is needed to form an estimate.",
            });
        }

        let weights: Vec<f64> =
            iterations.iter().map(|it| 1.0 / it.variance.max(VARIANCE_FLOOR)).collect();
        let weight_sum: f64 = weights.iter().sum();
        let mean =
            iterations.iter().zip(&weights).map(|(it, w)| w * it.mean).sum::<f64>() / weight_sum;
        let std_err = (1.0 / weight_sum).sqrt();
        validate_estimate(mean, std_err)?;

        let dof = iterations.len() - 1;
        let chi2: f64 = iterations
            .iter()
            .zip(&weights)
            .map(|(it, w)| {
                let dev = it.mean - mean;
                dev * dev * w
            })
            .sum();
        let q_value = match ChiSquared::new(dof as f64) {
            Ok(dist) if dof > 0 && chi2.is_finite() => 1.0 - dist.cdf(chi2),
            _ => 1.0,
        };

        Ok(Self { iterations, mean, std_err, chi2, dof, q_value })
    }

    /// `χ²` per degree of freedom, `0` for a single iteration.
    pub fn chi2_per_dof(&self) -> f64 {
        if self.dof == 0 { 0.0 } else { self.chi2 / self.dof as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Two iterations with variances 1 and 4 combine with weights 1 and
    // 1/4.
    //
    // Expect
    // ------
    // - mean = (1·1 + 0.25·2)/1.25 = 1.2, std_err = 1/√1.25,
    //   χ² = 0.2²·1 + 0.8²·0.25 = 0.2 on one degree of freedom.
    fn combine_weights_by_inverse_variance() {
        let result = VegasResult::combine(vec![
            IterationEstimate { mean: 1.0, variance: 1.0 },
            IterationEstimate { mean: 2.0, variance: 4.0 },
        ])
        .unwrap();

        assert_relative_eq!(result.mean, 1.2, epsilon = 1e-12);
        assert_relative_eq!(result.std_err, (1.0_f64 / 1.25).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(result.chi2, 0.2, epsilon = 1e-12);
        assert_eq!(result.dof, 1);
        assert!(result.q_value > 0.6 && result.q_value < 0.7, "Q = {}", result.q_value);
    }

    #[test]
    fn combine_handles_zero_variance_iterations() {
        let result = VegasResult::combine(vec![
            IterationEstimate { mean: 0.5, variance: 0.0 },
            IterationEstimate { mean: 0.5, variance: 0.0 },
        ])
        .unwrap();

        assert_relative_eq!(result.mean, 0.5, epsilon = 1e-15);
        assert!(result.std_err < 1e-140);
        assert_relative_eq!(result.q_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn combine_single_iteration_has_no_chi2() {
        let result =
            VegasResult::combine(vec![IterationEstimate { mean: 3.0, variance: 0.09 }]).unwrap();

        assert_relative_eq!(result.std_err, 0.3, epsilon = 1e-12);
        assert_eq!(result.dof, 0);
        assert_eq!(result.q_value, 1.0);
        assert_eq!(result.chi2_per_dof(), 0.0);
    }

    #[test]
    fn combine_rejects_empty_sequence() {
        assert!(matches!(
            VegasResult::combine(Vec::new()),
            Err(IntegrationError::InvalidIterations { .. })
        ));
    }
}
