//! Boundary grids for the sweep.
//!
//! [`ParameterGrid::open`] emits `lower + k·step` for `k ≥ 1` while the
//! point stays strictly below `upper`; neither endpoint is ever emitted.
//! Points are computed from `k` directly, so no rounding error accumulates
//! along the grid.
use crate::{
    models::traits::ModelKind,
    sweep::errors::{SweepError, SweepRunResult},
};

/// Reference step of every default grid.
pub const DEFAULT_STEP: f64 = 0.025;

/// Exclusive upper end of the default grids.
const REFERENCE_UPPER: f64 = 0.975;

/// Points closer than `step · EDGE_FRACTION` to `upper` count as `upper`.
const EDGE_FRACTION: f64 = 1e-9;

/// Ascending, finite boundary values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    points: Vec<f64>,
}

impl ParameterGrid {
    /// Interior points of `(lower, upper)` spaced by `step`.
    ///
    /// # Errors
    /// - [`SweepError::InvalidGrid`] for non-finite bounds, `lower >= upper`,
    ///   or a non-positive step.
    /// - [`SweepError::EmptyGrid`] if `step` leaves no interior point.
    pub fn open(lower: f64, upper: f64, step: f64) -> SweepRunResult<Self> {
        let invalid = |reason| SweepError::InvalidGrid { lower, upper, step, reason };
        if !lower.is_finite() || !upper.is_finite() {
            return Err(invalid("Grid bounds must be finite."));
        }
        if lower >= upper {
            return Err(invalid("Lower bound must be below the upper bound."));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid("Step must be positive and finite."));
        }

        let edge = upper - step * EDGE_FRACTION;
        let points: Vec<f64> =
            (1..).map(|k| lower + k as f64 * step).take_while(|&p| p < edge).collect();
        if points.is_empty() {
            return Err(SweepError::EmptyGrid);
        }
        Ok(Self { points })
    }

    /// Grid from explicit values.
    ///
    /// # Errors
    /// - [`SweepError::EmptyGrid`] for an empty list.
    /// - [`SweepError::InvalidGridPoint`] for non-finite or non-increasing
    ///   values.
    pub fn from_points(points: Vec<f64>) -> SweepRunResult<Self> {
        if points.is_empty() {
            return Err(SweepError::EmptyGrid);
        }
        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() {
                return Err(SweepError::InvalidGridPoint {
                    index,
                    value,
                    reason: "Grid points must be finite.",
                });
            }
            if index > 0 && value <= points[index - 1] {
                return Err(SweepError::InvalidGridPoint {
                    index,
                    value,
                    reason: "Grid points must be strictly increasing.",
                });
            }
        }
        Ok(Self { points })
    }

    /// Reference grid of a model with step `0.025`: `amax = 0.075, …, 0.95`
    /// for model A, `rhomax = −0.925, …, 0.95` for models B and C.
    ///
    /// The top point is `0.95`, the upper bound of the prior `q`.
    pub fn default_for(kind: ModelKind) -> SweepRunResult<Self> {
        match kind {
            ModelKind::Bernoulli => Self::open(0.05, REFERENCE_UPPER, DEFAULT_STEP),
            ModelKind::SymmetricGaussian | ModelKind::AsymmetricGaussian => {
                Self::open(-0.95, REFERENCE_UPPER, DEFAULT_STEP)
            }
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // The open grid never emits its endpoints, even when `upper` lies on a
    // multiple of the step.
    //
    // Expect
    // ------
    // (0.05, 1.0) with step 0.025 yields 0.075, ..., 0.975 (37 points).
    fn open_grid_excludes_both_endpoints() {
        let grid = ParameterGrid::open(0.05, 1.0, 0.025).unwrap();

        assert_eq!(grid.len(), 37);
        assert_relative_eq!(grid.points()[0], 0.075, epsilon = 1e-12);
        assert_relative_eq!(*grid.points().last().unwrap(), 0.975, epsilon = 1e-12);
        assert!(grid.points().iter().all(|&p| p > 0.05 && p < 1.0));
    }

    #[test]
    fn default_grids_match_model_ranges() {
        let a = ParameterGrid::default_for(ModelKind::Bernoulli).unwrap();
        let b = ParameterGrid::default_for(ModelKind::SymmetricGaussian).unwrap();
        let c = ParameterGrid::default_for(ModelKind::AsymmetricGaussian).unwrap();

        assert_eq!(a.len(), 36);
        assert_relative_eq!(a.points()[0], 0.075, epsilon = 1e-12);
        assert_relative_eq!(*a.points().last().unwrap(), 0.95, epsilon = 1e-12);
        assert_eq!(b, c);
        assert_eq!(b.len(), 76);
        assert_relative_eq!(b.points()[0], -0.925, epsilon = 1e-12);
        assert_relative_eq!(*b.points().last().unwrap(), 0.95, epsilon = 1e-12);
        assert!(b.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn open_grid_rejects_bad_bounds_and_steps() {
        assert!(matches!(
            ParameterGrid::open(1.0, 0.5, 0.1),
            Err(SweepError::InvalidGrid { .. })
        ));
        assert!(matches!(
            ParameterGrid::open(0.0, 1.0, 0.0),
            Err(SweepError::InvalidGrid { .. })
        ));
        assert!(matches!(
            ParameterGrid::open(0.0, f64::INFINITY, 0.1),
            Err(SweepError::InvalidGrid { .. })
        ));
        assert_eq!(ParameterGrid::open(0.0, 0.1, 0.1), Err(SweepError::EmptyGrid));
    }

    #[test]
    fn explicit_points_must_increase() {
        assert!(ParameterGrid::from_points(vec![0.1, 0.2]).is_ok());
        assert_eq!(ParameterGrid::from_points(vec![]), Err(SweepError::EmptyGrid));
        assert!(matches!(
            ParameterGrid::from_points(vec![0.2, 0.2]),
            Err(SweepError::InvalidGridPoint { index: 1, .. })
        ));
        assert!(matches!(
            ParameterGrid::from_points(vec![f64::NAN]),
            Err(SweepError::InvalidGridPoint { index: 0, .. })
        ));
    }
}
