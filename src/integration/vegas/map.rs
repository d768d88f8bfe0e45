//! Separable adaptive map from the unit hypercube to an integration box.
//!
//! Each dimension owns a piecewise-linear grid of `bins + 1` edges. A unit
//! coordinate `y` falls in bin `i = ⌊y·N⌋` and is sent to
//! `x = g_i + (y·N − i)·(g_{i+1} − g_i)`; the Jacobian of the map is
//! `Π_d N·(g_{i+1} − g_i)`.
//!
//! During an iteration the integrator records `(f·J)²` per bin. Refinement
//! smooths and damps those averages and then moves the edges so every bin
//! carries an equal share, concentrating resolution where the integrand
//! is large.
use crate::models::domain::DomainBox;
use ndarray::{Array2, ArrayView1};

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveMap {
    /// `dim × (bins + 1)` bin edges, increasing along each row.
    edges: Array2<f64>,
    /// `dim × bins` accumulated `(f·J)²`.
    weight_sum: Array2<f64>,
    /// `dim × bins` sample counts.
    counts: Array2<f64>,
}

impl AdaptiveMap {
    /// Uniform map with `bins` equal-width bins per dimension.
    pub fn new(domain: &DomainBox, bins: usize) -> Self {
        let dim = domain.dim();
        let mut edges = Array2::zeros((dim, bins + 1));
        for (d, interval) in domain.intervals().iter().enumerate() {
            let width = interval.width() / bins as f64;
            for i in 0..=bins {
                edges[[d, i]] = interval.lower() + width * i as f64;
            }
            edges[[d, bins]] = interval.upper();
        }
        Self { edges, weight_sum: Array2::zeros((dim, bins)), counts: Array2::zeros((dim, bins)) }
    }

    pub fn dim(&self) -> usize {
        self.edges.nrows()
    }

    pub fn bins(&self) -> usize {
        self.edges.ncols() - 1
    }

    pub fn edges(&self, dim: usize) -> ArrayView1<'_, f64> {
        self.edges.row(dim)
    }

    /// Map unit coordinates `y` into `x`, writing the bin index of every
    /// coordinate into `bins`. Returns the Jacobian.
    pub fn map(&self, y: &[f64], x: &mut [f64], bins: &mut [usize]) -> f64 {
        let n = self.bins();
        let scale = n as f64;
        let mut jacobian = 1.0;
        for d in 0..self.dim() {
            let t = y[d] * scale;
            let i = (t.floor() as usize).min(n - 1);
            let lower = self.edges[[d, i]];
            let width = self.edges[[d, i + 1]] - lower;
            x[d] = lower + (t - i as f64) * width;
            bins[d] = i;
            jacobian *= scale * width;
        }
        jacobian
    }

    /// Record one weighted sample `(f·J)²` in the bins it fell in.
    pub fn accumulate(&mut self, bins: &[usize], squared_weight: f64) {
        for (d, &i) in bins.iter().enumerate() {
            self.weight_sum[[d, i]] += squared_weight;
            self.counts[[d, i]] += 1.0;
        }
    }

    /// Refine the edges from the accumulated samples and clear them.
    ///
    /// Dimensions with no signal (all accumulated weights zero) keep their
    /// current edges.
    pub fn adapt(&mut self, alpha: f64) {
        let n = self.bins();
        for d in 0..self.dim() {
            let averages: Vec<f64> = (0..n)
                .map(|i| {
                    let count = self.counts[[d, i]];
                    if count > 0.0 { self.weight_sum[[d, i]] / count } else { 0.0 }
                })
                .collect();
            if let Some(importance) = damped_importance(&smooth(&averages), alpha) {
                let new_edges = redistribute(self.edges.row(d), &importance);
                for (i, edge) in new_edges.into_iter().enumerate() {
                    self.edges[[d, i]] = edge;
                }
            }
        }
        self.weight_sum.fill(0.0);
        self.counts.fill(0.0);
    }
}

/// Three-point smoothing `(d_{i−1} + 6·d_i + d_{i+1}) / 8` with one-sided
/// weights `(7, 1)` at the ends.
fn smooth(averages: &[f64]) -> Vec<f64> {
    let n = averages.len();
    if n < 2 {
        return averages.to_vec();
    }
    (0..n)
        .map(|i| match i {
            0 => (7.0 * averages[0] + averages[1]) / 8.0,
            i if i == n - 1 => (averages[n - 2] + 7.0 * averages[n - 1]) / 8.0,
            i => (averages[i - 1] + 6.0 * averages[i] + averages[i + 1]) / 8.0,
        })
        .collect()
}

/// Normalized, damped bin importances `((1 − d)/ln(1/d))^α`, or `None`
/// when there is nothing to adapt to.
fn damped_importance(smoothed: &[f64], alpha: f64) -> Option<Vec<f64>> {
    let total: f64 = smoothed.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    let importance: Vec<f64> = smoothed
        .iter()
        .map(|&s| {
            let d = s / total;
            if d <= 0.0 {
                0.0
            } else if d >= 1.0 - f64::EPSILON {
                1.0
            } else {
                ((1.0 - d) / (1.0 / d).ln()).powf(alpha)
            }
        })
        .collect();
    if importance.iter().sum::<f64>() > 0.0 { Some(importance) } else { None }
}

/// New edges such that each new bin holds an equal share of `importance`,
/// with the importance spread uniformly inside each old bin.
fn redistribute(old: ArrayView1<'_, f64>, importance: &[f64]) -> Vec<f64> {
    let n = importance.len();
    let share = importance.iter().sum::<f64>() / n as f64;
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(old[0]);

    let mut j = 0;
    let mut acc = 0.0;
    for k in 1..n {
        let target = share * k as f64;
        while j < n - 1 && acc + importance[j] < target {
            acc += importance[j];
            j += 1;
        }
        let width = old[j + 1] - old[j];
        let frac = if importance[j] > 0.0 {
            ((target - acc) / importance[j]).clamp(0.0, 1.0)
        } else {
            0.0
        };
        edges.push(old[j] + frac * width);
    }
    edges.push(old[n]);
    edges
}
