//! Downhill bracketing of the θ minimum.
//!
//! Starting from the configured triple `l < m < r`, the search walks
//! downhill while an end point scores strictly lower than the middle: the
//! triple shifts one step toward the lower end and the new end is placed
//! at twice the previous spacing. The left side is explored first, then
//! the right. A bracket is found when `f(m) ≤ f(l)` and `f(m) ≤ f(r)`.
use crate::optimization::{
    errors::OptResult,
    theta_optimizer::{
        adapter::ArgMinAdapter,
        traits::{ThetaObjective, ThetaOptions},
        types::{Cost, Theta},
    },
};
use log::debug;

/// One evaluated trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub theta: Theta,
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: Trial,
    pub middle: Trial,
    pub upper: Trial,
    pub expansions: usize,
    pub found: bool,
}

impl Bracket {
    /// Lowest-cost trial among the three points.
    pub fn best(&self) -> Trial {
        [self.lower, self.upper]
            .into_iter()
            .fold(self.middle, |best, t| if t.cost < best.cost { t } else { best })
    }

    /// Objective evaluations spent on bracketing.
    pub fn evaluations(&self) -> usize {
        3 + self.expansions
    }
}

/// Search for a bracket of the minimum of `problem`.
///
/// Returns a [`Bracket`] with `found = false` if `opts.max_expansions`
/// widenings were not enough.
///
/// # Errors
/// Propagates objective failures.
pub fn find_bracket<O: ThetaObjective>(
    problem: &ArgMinAdapter<'_, O>, opts: &ThetaOptions,
) -> OptResult<Bracket> {
    let trial = |theta: Theta| -> OptResult<Trial> {
        Ok(Trial { theta, cost: problem.mean_cost(theta)? })
    };
    let (l, m, r) = opts.bracket;
    let (mut lower, mut middle, mut upper) = (trial(l)?, trial(m)?, trial(r)?);
    let mut expansions = 0;

    while lower.cost < middle.cost {
        if expansions == opts.max_expansions {
            return Ok(Bracket { lower, middle, upper, expansions, found: false });
        }
        let step = 2.0 * (middle.theta - lower.theta);
        upper = middle;
        middle = lower;
        lower = trial(middle.theta - step)?;
        expansions += 1;
    }

    while upper.cost < middle.cost {
        if expansions == opts.max_expansions {
            return Ok(Bracket { lower, middle, upper, expansions, found: false });
        }
        let step = 2.0 * (upper.theta - middle.theta);
        lower = middle;
        middle = upper;
        upper = trial(middle.theta + step)?;
        expansions += 1;
    }

    debug!(
        "theta bracket ({:.4}, {:.4}, {:.4}) after {expansions} expansions",
        lower.theta, middle.theta, upper.theta
    );
    Ok(Bracket { lower, middle, upper, expansions, found: true })
}
