//! Domain decomposition of [0, ∞) for the minimax objective.
//!
//! The upper expected loss is linear between consecutive breakpoints drawn
//! from the demand support and its image under the cost transform `f`. The
//! decomposition enumerates those breakpoints in descending order and tags
//! every interval with the index pair that selects the correct linear branch
//! of the loss integrals.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::DemandModel;

/// Width of the unbounded sentinel interval above the largest breakpoint.
///
/// A finite stand-in for +∞: objective evaluations beyond the sentinel's
/// upper endpoint are undefined, so callers querying larger order quantities
/// must pass a wider tail to [`Decomposition::build`].
pub const DEFAULT_TAIL_WIDTH: f64 = 100.0;

/// Unit understocking (shortage) and overstocking (holding) cost rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRates {
    /// Unit understocking cost a > 0.
    pub shortage: f64,
    /// Unit overstocking cost b > 0.
    pub holding: f64,
}

impl CostRates {
    /// Validate a > 0 and b > 0.
    pub fn new(shortage: f64, holding: f64) -> Result<Self> {
        if !shortage.is_finite() || shortage <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "shortage cost",
                value: shortage,
            });
        }
        if !holding.is_finite() || holding <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "holding cost",
                value: holding,
            });
        }
        Ok(Self { shortage, holding })
    }

    /// Breakpoint transform `f(x) = (b/(a+b)) · (x + (a/b)·x_max)`: the order
    /// quantity where the loss regime attached to demand `x` swaps on the
    /// image grid. Fixes `x_max` in place.
    pub(crate) fn transform(&self, x: f64, x_max: f64) -> f64 {
        let (a, b) = (self.shortage, self.holding);
        (b / (a + b)) * (x + (a / b) * x_max)
    }
}

/// One sub-domain of [0, ∞) with the index pair selecting the linear regime.
///
/// `tags` is `None` only on the sentinel interval above the largest
/// breakpoint, where every demand outcome is an overstock. The closing
/// interval at q = 0 carries `(n−1, n−1)`, where every outcome is a
/// shortfall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    /// Lower endpoint.
    pub lo: f64,
    /// Upper endpoint.
    pub hi: f64,
    /// Support index and image index of the breakpoint bounding this
    /// interval from above, carried forward across breakpoints that fall on
    /// neither grid.
    pub tags: Option<(usize, usize)>,
}

/// Ordered partition of [0, ∞), largest order quantities first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    intervals: Vec<Interval>,
}

impl Decomposition {
    /// Partition [0, ∞) into loss-linear intervals.
    ///
    /// Breakpoints are the distinct values of the support united with its
    /// transform image, walked in descending order as a fold that carries
    /// the last-seen index pair. The partition must be rebuilt whenever the
    /// support or the cost rates change; it is independent of ε and can be
    /// reused across contamination weights and evaluation points.
    pub fn build(model: &DemandModel, costs: &CostRates, tail_width: f64) -> Result<Self> {
        if !tail_width.is_finite() || tail_width <= 0.0 {
            return Err(Error::NonPositiveParameter {
                name: "tail width",
                value: tail_width,
            });
        }

        let x = model.support();
        let n = model.len();
        let image: Vec<f64> = x.iter().map(|&v| costs.transform(v, x[0])).collect();

        let mut nodes: Vec<f64> = x.iter().chain(image.iter()).copied().collect();
        nodes.sort_by(|p, q| q.total_cmp(p));
        nodes.dedup();

        let mut intervals = Vec::with_capacity(nodes.len() + 1);
        intervals.push(Interval {
            lo: nodes[0],
            hi: nodes[0] + tail_width,
            tags: None,
        });

        let mut carry = (0usize, 0usize);
        for k in 1..nodes.len() {
            let prev = nodes[k - 1];
            if let Some(i) = x.iter().position(|&v| v == prev) {
                carry.0 = i;
            }
            if let Some(j) = image.iter().position(|&v| v == prev) {
                carry.1 = j;
            }
            intervals.push(Interval {
                lo: nodes[k],
                hi: prev,
                tags: Some(carry),
            });
        }
        intervals.push(Interval {
            lo: 0.0,
            hi: nodes[nodes.len() - 1],
            tags: Some((n - 1, n - 1)),
        });

        Ok(Self { intervals })
    }

    /// Intervals in descending order of `q`.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The interval containing `q`, preferring the higher one when `q` is a
    /// shared endpoint. `None` for negative `q` or `q` beyond the sentinel.
    pub fn containing(&self, q: f64) -> Option<&Interval> {
        self.intervals.iter().find(|iv| iv.lo <= q && q <= iv.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn example2() -> DemandModel {
        let probs = [8.0, 5.0, 1.0, 2.0, 2.0, 2.0].map(|w| w / 20.0).to_vec();
        DemandModel::new(vec![2500.0, 2000.0, 1500.0, 1000.0, 500.0, 0.0], probs).unwrap()
    }

    #[test]
    fn cost_rates_validation() {
        assert!(CostRates::new(4.0, 2.0).is_ok());
        assert!(matches!(
            CostRates::new(0.0, 2.0),
            Err(Error::NonPositiveParameter { name: "shortage cost", .. })
        ));
        assert!(matches!(
            CostRates::new(4.0, f64::NAN),
            Err(Error::NonPositiveParameter { name: "holding cost", .. })
        ));
    }

    #[test]
    fn transform_fixes_the_largest_demand() {
        let costs = CostRates::new(4.0, 2.0).unwrap();
        assert_eq!(costs.transform(2500.0, 2500.0), 2500.0);
        // f(2000) = (2/6)·(2000 + 2·2500) = 7000/3
        assert!(approx_eq(
            costs.transform(2000.0, 2500.0),
            7000.0 / 3.0,
            1e-9
        ));
    }

    #[test]
    fn example2_golden_intervals() {
        let model = example2();
        let costs = CostRates::new(4.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();
        let iv = decomp.intervals();

        // 2500 and 2000 appear on both grids, so 10 distinct breakpoints
        // yield a sentinel, nine interior intervals, and the closing one.
        assert_eq!(iv.len(), 11);
        assert_eq!(iv[0].tags, None);
        assert_eq!((iv[0].lo, iv[0].hi), (2500.0, 2600.0));

        let golden = [
            (7000.0 / 3.0, 2500.0, (0, 0)),
            (6500.0 / 3.0, 7000.0 / 3.0, (0, 1)),
            (2000.0, 6500.0 / 3.0, (0, 2)),
            (5500.0 / 3.0, 2000.0, (1, 3)),
            (5000.0 / 3.0, 5500.0 / 3.0, (1, 4)),
            (1500.0, 5000.0 / 3.0, (1, 5)),
            (1000.0, 1500.0, (2, 5)),
            (500.0, 1000.0, (3, 5)),
            (0.0, 500.0, (4, 5)),
            (0.0, 0.0, (5, 5)),
        ];
        for (interval, (lo, hi, tags)) in iv[1..].iter().zip(golden) {
            assert!(approx_eq(interval.lo, lo, 1e-9), "lo {}", interval.lo);
            assert!(approx_eq(interval.hi, hi, 1e-9), "hi {}", interval.hi);
            assert_eq!(interval.tags, Some(tags));
        }
    }

    #[test]
    fn intervals_are_contiguous_and_exhaustive() {
        let model = example2();
        let costs = CostRates::new(3.0, 5.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();
        let iv = decomp.intervals();

        for w in iv.windows(2) {
            assert_eq!(w[1].hi, w[0].lo, "gap between intervals");
            assert!(w[1].lo <= w[1].hi);
        }
        assert_eq!(iv[iv.len() - 1].lo, 0.0);
    }

    #[test]
    fn tags_are_monotone_as_q_decreases() {
        let model = example2();
        let costs = CostRates::new(4.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();

        let mut prev = (0usize, 0usize);
        for interval in decomp.intervals().iter().skip(1) {
            let tags = interval.tags.unwrap();
            assert!(tags.0 >= prev.0 && tags.1 >= prev.1, "tags regressed");
            prev = tags;
        }
        assert_eq!(prev, (5, 5));
    }

    #[test]
    fn containing_prefers_the_higher_interval() {
        let model = example2();
        let costs = CostRates::new(4.0, 2.0).unwrap();
        let decomp = Decomposition::build(&model, &costs, DEFAULT_TAIL_WIDTH).unwrap();

        // 2000 is a shared endpoint; lookup resolves to the interval above it.
        let interval = decomp.containing(2000.0).unwrap();
        assert_eq!(interval.lo, 2000.0);
        assert_eq!(interval.tags, Some((0, 2)));

        assert!(decomp.containing(-1.0).is_none());
        assert!(decomp.containing(1e9).is_none());
    }

    #[test]
    fn rejects_bad_tail_width() {
        let model = example2();
        let costs = CostRates::new(4.0, 2.0).unwrap();
        assert!(matches!(
            Decomposition::build(&model, &costs, 0.0),
            Err(Error::NonPositiveParameter { name: "tail width", .. })
        ));
    }
}
