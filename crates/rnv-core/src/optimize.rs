//! Exact global minimizer of the upper expected loss.

use serde::Serialize;

use crate::decomposition::{CostRates, Decomposition};
use crate::error::{Error, Result};
use crate::loss::upper_loss;
use crate::mobius::MassFunction;
use crate::model::DemandModel;

/// The minimizing order quantity and the loss it attains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Minimizer {
    /// Optimal order quantity q*.
    pub quantity: f64,
    /// Upper expected loss at q*.
    pub loss: f64,
}

/// Find the exact minimizer of the upper expected loss.
///
/// The objective is linear inside every decomposition interval, so the
/// global minimum is attained at an interval endpoint; only those are
/// evaluated. Candidates are visited in descending order of `q` (upper
/// endpoint before lower within each interval) and the running best is
/// replaced on less-than-*or-equal*, so of all tied global minimizers the
/// smallest order quantity is the one returned.
pub fn minimize(
    decomposition: &Decomposition,
    epsilon: f64,
    model: &DemandModel,
    mass: &MassFunction,
    costs: &CostRates,
) -> Result<Minimizer> {
    if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
        return Err(Error::InvalidEpsilon { epsilon });
    }

    let mut best = Minimizer {
        quantity: f64::INFINITY,
        loss: f64::INFINITY,
    };
    for interval in decomposition.intervals() {
        let at_hi = upper_loss(interval.hi, epsilon, interval, model, mass, costs);
        if at_hi <= best.loss {
            best = Minimizer {
                quantity: interval.hi,
                loss: at_hi,
            };
        }
        let at_lo = upper_loss(interval.lo, epsilon, interval, model, mass, costs);
        if at_lo <= best.loss {
            best = Minimizer {
                quantity: interval.lo,
                loss: at_lo,
            };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::DEFAULT_TAIL_WIDTH;
    use crate::mobius::lower_mass;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn example2() -> (DemandModel, MassFunction, CostRates, Decomposition) {
        let probs = [8.0, 5.0, 1.0, 2.0, 2.0, 2.0].map(|w| w / 20.0).to_vec();
        let model =
            DemandModel::new(vec![2500.0, 2000.0, 1500.0, 1000.0, 500.0, 0.0], probs).unwrap();
        let mass = lower_mass(&model).unwrap();
        let costs = CostRates::new(4.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();
        (model, mass, costs, decomp)
    }

    #[test]
    fn example2_golden_minimizers() {
        let (model, mass, costs, decomp) = example2();
        let golden = [
            (0.0, 2500.0, 1550.0),
            (0.2, 7000.0 / 3.0, 1824.5),
            (0.4, 6500.0 / 3.0, 2029.0),
            (0.6, 6500.0 / 3.0, 2201.8333333333335),
            (0.8, 6500.0 / 3.0, 2374.6666666666665),
            (1.0, 6500.0 / 3.0, 2547.5),
        ];
        for (epsilon, q_star, value) in golden {
            let result = minimize(&decomp, epsilon, &model, &mass, &costs).unwrap();
            assert!(
                approx_eq(result.quantity, q_star, 1e-9),
                "epsilon {epsilon}: q* = {}, expected {q_star}",
                result.quantity
            );
            assert!(
                approx_eq(result.loss, value, 1e-9),
                "epsilon {epsilon}: loss = {}, expected {value}",
                result.loss
            );
        }
    }

    #[test]
    fn minimum_dominates_every_support_point() {
        let (model, mass, costs, decomp) = example2();
        let result = minimize(&decomp, 0.2, &model, &mass, &costs).unwrap();
        for &q in model.support() {
            let interval = decomp.containing(q).unwrap();
            let value = upper_loss(q, 0.2, interval, &model, &mass, &costs);
            assert!(
                result.loss <= value + 1e-9,
                "upper_loss({q}) = {value} beats the reported minimum {}",
                result.loss
            );
        }
    }

    #[test]
    fn minimizer_is_a_decomposition_endpoint() {
        let (model, mass, costs, decomp) = example2();
        for epsilon in [0.0, 0.3, 0.7, 1.0] {
            let result = minimize(&decomp, epsilon, &model, &mass, &costs).unwrap();
            let hit = decomp
                .intervals()
                .iter()
                .any(|iv| iv.lo == result.quantity || iv.hi == result.quantity);
            assert!(hit, "q* = {} is not an endpoint", result.quantity);
        }
    }

    #[test]
    fn flat_objective_returns_the_smallest_tied_minimizer() {
        // Uniform demand with a = b and ε = 0: the classical loss is flat on
        // [10, 20], so 10, 15 and 20 all minimize it. The walk must keep 10.
        let model = DemandModel::new(
            vec![30.0, 20.0, 10.0, 0.0],
            vec![0.25, 0.25, 0.25, 0.25],
        )
        .unwrap();
        let mass = lower_mass(&model).unwrap();
        let costs = CostRates::new(2.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();

        let result = minimize(&decomp, 0.0, &model, &mass, &costs).unwrap();
        assert!(approx_eq(result.loss, 20.0, 1e-9));
        assert!(
            approx_eq(result.quantity, 10.0, 1e-9),
            "tie must resolve to the smallest q, got {}",
            result.quantity
        );
    }

    #[test]
    fn uniform_example3_minimizer() {
        let model = DemandModel::new(
            vec![1500.0, 1000.0, 500.0, 0.0],
            vec![0.25, 0.25, 0.25, 0.25],
        )
        .unwrap();
        let mass = lower_mass(&model).unwrap();
        let costs = CostRates::new(2.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();

        let result = minimize(&decomp, 0.2, &model, &mass, &costs).unwrap();
        assert!(approx_eq(result.quantity, 500.0, 1e-9));
        assert!(approx_eq(result.loss, 1100.0, 1e-9));
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        let (model, mass, costs, decomp) = example2();
        for epsilon in [-0.1, 1.01, f64::NAN] {
            assert!(matches!(
                minimize(&decomp, epsilon, &model, &mass, &costs),
                Err(Error::InvalidEpsilon { .. })
            ));
        }
    }
}
