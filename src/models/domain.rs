//! models::domain — axis-aligned integration boxes.
//!
//! Purpose
//! -------
//! Represent the rectangular regions every loss integral is taken over: a
//! list of closed intervals, one per integration variable, in the same
//! order the integrand receives its coordinates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every interval is finite with `lower < upper`; this is enforced at
//!   construction so backends never see a degenerate box.
//! - A box has at least one dimension.
//!
//! Conventions
//! -----------
//! - Coordinate `k` of an integrand point lies in `intervals()[k]`.
//! - [`DomainBox::sub_volume`] is the Lebesgue measure of a trailing
//!   block of dimensions; models use it to normalize by the probability
//!   mass of their parameter sub-box.
use crate::models::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Closed interval `[lower, upper]` with `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Build a validated interval. `index` is only used for error context.
    pub fn new(index: usize, lower: f64, upper: f64) -> DomainResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(DomainError::InvalidInterval {
                index,
                lower,
                upper,
                reason: "Bounds must be finite.",
            });
        }
        if lower >= upper {
            return Err(DomainError::InvalidInterval {
                index,
                lower,
                upper,
                reason: "Lower bound must be strictly below the upper bound.",
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Axis-aligned box `[l_0, u_0] × … × [l_{d-1}, u_{d-1}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBox {
    intervals: Vec<Interval>,
}

impl DomainBox {
    /// Build a box from `(lower, upper)` pairs, validating each one.
    ///
    /// # Errors
    /// - [`DomainError::EmptyBox`] when `bounds` is empty.
    /// - [`DomainError::InvalidInterval`] for the first malformed pair.
    pub fn new(bounds: &[(f64, f64)]) -> DomainResult<Self> {
        if bounds.is_empty() {
            return Err(DomainError::EmptyBox);
        }
        let intervals = bounds
            .iter()
            .enumerate()
            .map(|(index, &(lower, upper))| Interval::new(index, lower, upper))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { intervals })
    }

    pub fn dim(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Product of all interval widths.
    pub fn volume(&self) -> f64 {
        self.intervals.iter().map(Interval::width).product()
    }

    /// Product of the widths of dimensions `start..dim()`.
    ///
    /// Returns `1.0` when `start >= dim()` (empty product).
    pub fn sub_volume(&self, start: usize) -> f64 {
        self.intervals.iter().skip(start).map(Interval::width).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Construction-time validation of intervals and boxes, and the volume
    // helpers used for probability-mass normalization.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A well-formed box reports its dimension and volumes.
    //
    // Given
    // -----
    // - The Gaussian model C box at rhomax = 0.5.
    //
    // Expect
    // ------
    // - dim = 5, full volume = 10·10·0.9·1.45², trailing volume from
    //   dimension 2 = 0.9·1.45².
    fn domain_box_reports_volumes() {
        let domain =
            DomainBox::new(&[(-5.0, 5.0), (-5.0, 5.0), (0.05, 0.95), (-0.95, 0.5), (-0.95, 0.5)])
                .expect("valid bounds");

        assert_eq!(domain.dim(), 5);
        assert_relative_eq!(domain.volume(), 100.0 * 0.9 * 1.45 * 1.45, epsilon = 1e-12);
        assert_relative_eq!(domain.sub_volume(2), 0.9 * 1.45 * 1.45, epsilon = 1e-12);
        assert_relative_eq!(domain.sub_volume(5), 1.0);
    }

    #[test]
    fn domain_box_rejects_empty_bounds() {
        assert_eq!(DomainBox::new(&[]), Err(DomainError::EmptyBox));
    }

    #[test]
    // Purpose
    // -------
    // Reversed, degenerate, and non-finite intervals are rejected with the
    // index of the offending dimension.
    fn domain_box_rejects_malformed_intervals() {
        for bounds in [
            vec![(0.0, 1.0), (1.0, 1.0)],
            vec![(0.0, 1.0), (2.0, 1.0)],
            vec![(0.0, 1.0), (0.0, f64::INFINITY)],
            vec![(0.0, 1.0), (f64::NAN, 1.0)],
        ] {
            match DomainBox::new(&bounds) {
                Err(DomainError::InvalidInterval { index, .. }) => assert_eq!(index, 1),
                other => panic!("expected InvalidInterval for {bounds:?}, got {other:?}"),
            }
        }
    }
}
