//! Classical and Choquet expectations of the piecewise-linear loss.
//!
//! Within one decomposition interval the loss of every demand outcome stays
//! in a single linear regime, so both integrals reduce to finite weighted
//! sums selected by the interval's tags.

use crate::decomposition::{CostRates, Interval};
use crate::mobius::MassFunction;
use crate::model::DemandModel;

/// Expected loss under the reference distribution on `interval`.
///
/// At or beyond the largest breakpoint (sentinel tags) every outcome is an
/// overstock; below the smallest breakpoint (support tag n−1) every outcome
/// is a shortfall; in between, the support tag splits the outcomes.
pub fn expected_loss(q: f64, interval: &Interval, model: &DemandModel, costs: &CostRates) -> f64 {
    let x = model.support();
    let p = model.probs();
    let n = model.len();
    let (a, b) = (costs.shortage, costs.holding);

    match interval.tags {
        None => x.iter().zip(p).map(|(&xk, &pk)| b * (q - xk) * pk).sum(),
        Some((i, _)) if i == n - 1 => {
            x.iter().zip(p).map(|(&xk, &pk)| a * (xk - q) * pk).sum()
        }
        Some((i, _)) => x
            .iter()
            .zip(p)
            .enumerate()
            .map(|(k, (&xk, &pk))| {
                if k <= i {
                    a * (xk - q) * pk
                } else {
                    b * (q - xk) * pk
                }
            })
            .sum(),
    }
}

/// Choquet expected loss under the head-chain mass function on `interval`.
///
/// Each chain set contributes through one extreme of its range: the
/// shortfall term is anchored at the largest demand, the overstock term at
/// the set's own maximal index, classified against the image tag. The
/// boundary singleton `{n−1}` always contributes an overstock term except
/// in the all-shortfall regime.
pub fn choquet_loss(
    q: f64,
    interval: &Interval,
    model: &DemandModel,
    mass: &MassFunction,
    costs: &CostRates,
) -> f64 {
    let x = model.support();
    let n = model.len();
    let (a, b) = (costs.shortage, costs.holding);

    match interval.tags {
        Some((i, _)) if i == n - 1 => {
            a * (x[0] - q) * mass.mass_containing(0)
                + a * (x[n - 1] - q) * mass.mass_containing(n - 1)
        }
        tags => {
            let image_tag = tags.map(|(_, j)| j);
            let mut total = 0.0;
            for f in &mass.focal {
                if f.lo == 0 {
                    match image_tag {
                        // Sentinel tags classify every chain set as overstocked.
                        Some(j) if f.hi <= j => total += a * (x[0] - q) * f.mass,
                        _ => total += b * (q - x[f.hi]) * f.mass,
                    }
                } else if f.is_singleton() && f.hi == n - 1 {
                    total += b * (q - x[n - 1]) * f.mass;
                }
            }
            total
        }
    }
}

/// Upper expected loss: the epsilon-contamination mixture of the classical
/// and Choquet branches. Continuous and piecewise-linear in `q` on each
/// decomposition interval.
pub fn upper_loss(
    q: f64,
    epsilon: f64,
    interval: &Interval,
    model: &DemandModel,
    mass: &MassFunction,
    costs: &CostRates,
) -> f64 {
    (1.0 - epsilon) * expected_loss(q, interval, model, costs)
        + epsilon * choquet_loss(q, interval, model, mass, costs)
}
