//! Compute side of each driver subcommand.

use rnv_core::{
    lower_mass, lower_profit_curve, minimize, upper_mass, CostRates, Decomposition, DemandModel,
    ProfitParams, Result,
};
use tracing::debug;

use crate::report::{MaximinReport, MinimaxReport, OptimizerRow, SurfacePoint, SurfaceReport};

/// Tolerance used to group near-ties in the brute-force profit search.
const TIE_TOL: f64 = 1e-6;

/// Inclusive arithmetic grid for the surface sweeps.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridSpec {
    fn values(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut k = 0u32;
        loop {
            let x = self.start + f64::from(k) * self.step;
            if x > self.stop + 0.5 * self.step {
                break;
            }
            out.push(x);
            k += 1;
        }
        out
    }
}

/// Candidate order quantities for the profit maximization: one point past
/// the largest demand, the support itself, and zero. The lower expected
/// profit is piecewise linear with kinks only at support values, so the
/// maximum over `[0, ∞)` is attained on this grid.
fn profit_candidates(model: &DemandModel, tail_width: f64) -> Vec<f64> {
    let mut qs = Vec::with_capacity(model.len() + 2);
    qs.push(model.support()[0] + tail_width);
    qs.extend_from_slice(model.support());
    qs.push(0.0);
    qs
}

fn best_profit_quantity(
    model: &DemandModel,
    mass: &rnv_core::MassFunction,
    params: &ProfitParams,
    tail_width: f64,
) -> (f64, f64) {
    let qs = profit_candidates(model, tail_width);
    let values = lower_profit_curve(&qs, model, mass, params);
    let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Candidates are in descending order, so the last index within
    // tolerance of the maximum is the smallest tied maximizer.
    let index = values
        .iter()
        .rposition(|v| (v - best).abs() <= TIE_TOL)
        .unwrap_or(0);
    (qs[index], best)
}

pub fn maximin(
    model: &DemandModel,
    epsilons: &[f64],
    revenue: f64,
    cost: f64,
    tail_width: f64,
) -> Result<MaximinReport> {
    let mass = upper_mass(model);
    debug!(
        alpha = mass.alpha,
        beta = mass.beta,
        focal = mass.focal.len(),
        "built mass of the contamination upper envelope"
    );

    let mut optimizers = Vec::with_capacity(epsilons.len());
    for &epsilon in epsilons {
        let params = ProfitParams::new(epsilon, revenue, cost)?;
        let (quantity, value) = best_profit_quantity(model, &mass, &params, tail_width);
        optimizers.push(OptimizerRow {
            epsilon,
            quantity,
            value,
        });
    }

    Ok(MaximinReport {
        mean: model.mean(),
        alpha: mass.alpha,
        beta: mass.beta,
        choquet_mean: mass.extreme_point_mean(model),
        revenue,
        cost,
        optimizers,
    })
}

pub fn minimax(
    model: &DemandModel,
    epsilons: &[f64],
    shortage: f64,
    holding: f64,
    tail_width: f64,
) -> Result<MinimaxReport> {
    let costs = CostRates::new(shortage, holding)?;
    let mass = lower_mass(model)?;
    let decomposition = Decomposition::build(model, &costs, tail_width)?;
    debug!(
        alpha = mass.alpha,
        beta = mass.beta,
        intervals = decomposition.intervals().len(),
        "built mass of the contamination lower envelope and domain decomposition"
    );

    let mut optimizers = Vec::with_capacity(epsilons.len());
    for &epsilon in epsilons {
        let best = minimize(&decomposition, epsilon, model, &mass, &costs)?;
        optimizers.push(OptimizerRow {
            epsilon,
            quantity: best.quantity,
            value: best.loss,
        });
    }

    Ok(MinimaxReport {
        mean: model.mean(),
        alpha: mass.alpha,
        beta: mass.beta,
        choquet_mean: mass.extreme_point_mean(model),
        shortage,
        holding,
        intervals: decomposition.intervals().len(),
        optimizers,
    })
}

/// Optimal maximin quantity over a grid of (revenue, cost) pairs; pairs
/// with `revenue <= cost` are not admissible and are skipped.
pub fn surface_maximin(
    model: &DemandModel,
    epsilon: f64,
    grid: GridSpec,
    tail_width: f64,
) -> Result<SurfaceReport> {
    let mass = upper_mass(model);
    let axis = grid.values();

    let mut points = Vec::new();
    for &revenue in &axis {
        for &cost in &axis {
            if revenue <= cost {
                continue;
            }
            let params = ProfitParams::new(epsilon, revenue, cost)?;
            let (quantity, _) = best_profit_quantity(model, &mass, &params, tail_width);
            points.push(SurfacePoint {
                x: revenue,
                y: cost,
                quantity,
            });
        }
    }

    Ok(SurfaceReport {
        criterion: "maximin".to_string(),
        epsilon,
        x_label: "revenue",
        y_label: "cost",
        points,
    })
}

/// Optimal minimax quantity over a grid of (shortage, holding) pairs. The
/// decomposition depends on the cost ratio, so it is rebuilt per pair.
pub fn surface_minimax(
    model: &DemandModel,
    epsilon: f64,
    grid: GridSpec,
    tail_width: f64,
) -> Result<SurfaceReport> {
    let mass = lower_mass(model)?;
    let axis = grid.values();

    let mut points = Vec::new();
    for &shortage in &axis {
        for &holding in &axis {
            let costs = CostRates::new(shortage, holding)?;
            let decomposition = Decomposition::build(model, &costs, tail_width)?;
            let best = minimize(&decomposition, epsilon, model, &mass, &costs)?;
            points.push(SurfacePoint {
                x: shortage,
                y: holding,
                quantity: best.quantity,
            });
        }
    }

    Ok(SurfaceReport {
        criterion: "minimax".to_string(),
        epsilon,
        x_label: "shortage",
        y_label: "holding",
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_model() -> DemandModel {
        DemandModel::new(
            vec![2500.0, 2000.0, 1500.0, 1000.0, 500.0, 0.0],
            vec![0.4, 0.25, 0.05, 0.1, 0.1, 0.1],
        )
        .unwrap()
    }

    #[test]
    fn grid_values_include_both_endpoints() {
        let grid = GridSpec {
            start: 0.1,
            stop: 0.5,
            step: 0.1,
        };
        let values = grid.values();
        assert_eq!(values.len(), 5);
        assert!((values[0] - 0.1).abs() < 1e-12);
        assert!((values[4] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn maximin_matches_known_optimizers() {
        let model = example_model();
        let report = maximin(&model, &[0.0, 0.5, 1.0], 3.0, 2.0, 100.0).unwrap();
        assert_eq!(report.mean, 1725.0);
        assert_eq!(report.choquet_mean, 1725.0);
        // Growing contamination shifts the maximizer up the support: the
        // extreme points of the ambiguity set reward the high-demand tail.
        assert_eq!(report.optimizers[0].quantity, 1500.0);
        assert!((report.optimizers[0].value - 600.0).abs() < 1e-9);
        assert_eq!(report.optimizers[1].quantity, 2000.0);
        assert_eq!(report.optimizers[2].quantity, 2500.0);
    }

    #[test]
    fn minimax_reports_the_decomposition_size() {
        let model = example_model();
        let report = minimax(&model, &[0.0, 0.2], 4.0, 2.0, 100.0).unwrap();
        assert_eq!(report.intervals, 11);
        assert_eq!(report.optimizers.len(), 2);
        assert_eq!(report.optimizers[0].quantity, 2500.0);
        assert!((report.optimizers[0].value - 1550.0).abs() < 1e-9);
    }

    #[test]
    fn maximin_surface_skips_inadmissible_pairs() {
        let model = example_model();
        let grid = GridSpec {
            start: 1.0,
            stop: 3.0,
            step: 1.0,
        };
        let report = surface_maximin(&model, 0.2, grid, 100.0).unwrap();
        // Only (2,1), (3,1) and (3,2) have revenue above cost.
        assert_eq!(report.points.len(), 3);
        assert!(report.points.iter().all(|p| p.x > p.y));
    }

    #[test]
    fn minimax_surface_covers_the_full_grid() {
        let model = example_model();
        let grid = GridSpec {
            start: 1.0,
            stop: 2.0,
            step: 1.0,
        };
        let report = surface_minimax(&model, 0.2, grid, 100.0).unwrap();
        assert_eq!(report.points.len(), 4);
    }
}
