//! Solver construction for the θ search.
use crate::optimization::{
    errors::OptResult,
    theta_optimizer::{
        bracket::Bracket, traits::ThetaOptions, types::ThetaBrent, validation::verify_bracket,
    },
};
use argmin::solver::brent::BrentOpt;

/// Brent's method restricted to the outer points of `bracket`, with
/// tolerance `tol_theta·|θ| + abs_tol_theta`.
///
/// # Errors
/// [`OptError::InvalidBracket`](crate::optimization::errors::OptError::InvalidBracket)
/// if the bracket is not strictly increasing.
pub fn build_brent(bracket: &Bracket, opts: &ThetaOptions) -> OptResult<ThetaBrent> {
    verify_bracket(bracket.lower.theta, bracket.middle.theta, bracket.upper.theta)?;
    Ok(BrentOpt::new(bracket.lower.theta, bracket.upper.theta)
        .set_tolerance(opts.tol_theta, opts.abs_tol_theta))
}
