//! Lower expected profit: the maximin objective.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::mobius::MassFunction;
use crate::model::DemandModel;

/// Validated cost parameters for the maximin objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitParams {
    /// Contamination weight ε ∈ [0, 1].
    pub epsilon: f64,
    /// Unit sales revenue r, with r > c.
    pub revenue: f64,
    /// Unit purchase cost c > 0.
    pub cost: f64,
}

impl ProfitParams {
    /// Validate ε ∈ [0, 1] and r > c > 0.
    pub fn new(epsilon: f64, revenue: f64, cost: f64) -> Result<Self> {
        if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::InvalidEpsilon { epsilon });
        }
        if !revenue.is_finite() || revenue <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "revenue",
                value: revenue,
            });
        }
        if !cost.is_finite() || cost <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "cost",
                value: cost,
            });
        }
        if revenue <= cost {
            return Err(Error::RevenueNotAboveCost { revenue, cost });
        }
        Ok(Self {
            epsilon,
            revenue,
            cost,
        })
    }
}

/// Lower expected profit at order quantity `q` under epsilon-contamination.
///
/// Mixes the reference expectation of capped sales with the two extreme
/// points of the ambiguity set (point masses at the smallest and largest
/// demand, weighted by the α of ν*), then subtracts the linear ordering
/// cost. Continuous, concave and piecewise-linear in `q`, with kinks only
/// at support values.
pub fn lower_profit(
    q: f64,
    model: &DemandModel,
    mass: &MassFunction,
    params: &ProfitParams,
) -> f64 {
    let x = model.support();
    let n = model.len();
    let reference = model.expected_sales(q);
    let extremes = (1.0 - mass.alpha) * x[n - 1].min(q) + mass.alpha * x[0].min(q);
    params.revenue * ((1.0 - params.epsilon) * reference + params.epsilon * extremes)
        - params.cost * q
}

/// Elementwise [`lower_profit`] over a grid of order quantities.
pub fn lower_profit_curve(
    qs: &[f64],
    model: &DemandModel,
    mass: &MassFunction,
    params: &ProfitParams,
) -> Vec<f64> {
    qs.iter()
        .map(|&q| lower_profit(q, model, mass, params))
        .collect()
}
