//! Möbius inverses of the first-moment capacities ν* and ν**.
//!
//! Both capacities put mass only on a nested chain of contiguous index
//! ranges plus one boundary singleton, so focal sets are stored as inclusive
//! index ranges rather than a general subset-to-mass table. The chain for
//! ν* runs over upper tails `{k, …, n-1}`, the chain for ν** over lower
//! heads `{0, …, k}`; the residual mass lands on the singleton at the
//! opposite end of the support.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::DemandModel;

/// A contiguous index range `[lo, hi]` carrying positive mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocalSet {
    /// Smallest index in the set.
    pub lo: usize,
    /// Largest index in the set.
    pub hi: usize,
    /// Mass assigned to the set.
    pub mass: f64,
}

impl FocalSet {
    /// Whether the range covers `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.lo <= index && index <= self.hi
    }

    /// Whether the range is a single index.
    pub fn is_singleton(&self) -> bool {
        self.lo == self.hi
    }
}

/// A Möbius inverse restricted to its focal sets, together with the split of
/// total mass between the chain and the boundary singleton.
///
/// For ν* the chain carries β and the singleton `{0}` carries α = 1 − β;
/// for ν** the chain carries α and the singleton `{n−1}` carries β = 1 − α.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassFunction {
    /// Focal sets in chain order, boundary singleton last.
    pub focal: Vec<FocalSet>,
    /// Mass share associated with the largest demand value.
    pub alpha: f64,
    /// Mass share associated with the smallest demand value.
    pub beta: f64,
}

impl MassFunction {
    /// Total mass over focal sets containing `index`.
    pub fn mass_containing(&self, index: usize) -> f64 {
        self.focal
            .iter()
            .filter(|f| f.contains(index))
            .map(|f| f.mass)
            .sum()
    }

    /// Sum of all focal masses. Equals 1 up to rounding for any valid model.
    pub fn total_mass(&self) -> f64 {
        self.focal.iter().map(|f| f.mass).sum()
    }

    /// Expectation of demand at the capacity's extreme points, weighted by
    /// the contamination split. Reproduces μ for both capacities, which is
    /// the first-moment constraint itself.
    pub fn extreme_point_mean(&self, model: &DemandModel) -> f64 {
        let x = model.support();
        self.beta * x[model.len() - 1] + (1.0 - self.beta) * x[0]
    }
}

/// Build the Möbius inverse of the lower-envelope capacity ν*.
///
/// The chain runs over the upper-tail sets `{k, …, n-1}` for `k = 1, …, s`;
/// the singleton `{0}` receives the residual α. The validated model
/// guarantees every denominator is a difference of distinct support values.
pub fn upper_mass(model: &DemandModel) -> MassFunction {
    let x = model.support();
    let n = model.len();
    let mu = model.mean();
    let s = model.split();

    let mut focal = Vec::with_capacity(s + 1);
    let mut beta = 0.0;
    for k in 1..=s {
        let mass = if k == s {
            (x[s - 1] - mu) / (x[s - 1] - x[n - 1])
        } else {
            (x[k - 1] - mu) / (x[k - 1] - x[n - 1]) - (x[k] - mu) / (x[k] - x[n - 1])
        };
        beta += mass;
        focal.push(FocalSet {
            lo: k,
            hi: n - 1,
            mass,
        });
    }
    let alpha = 1.0 - beta;
    focal.push(FocalSet {
        lo: 0,
        hi: 0,
        mass: alpha,
    });

    MassFunction { focal, alpha, beta }
}

/// Build the Möbius inverse of the complementary capacity ν**.
///
/// The chain runs over the lower-head sets `{0, …, k}` for `k = s−1, …, n−2`;
/// the singleton `{n−1}` receives the residual β. The boundary chain set
/// `{0, …, s−1}` is left out entirely when μ sits exactly on `X[s]`: its
/// closed-form mass is zero there, and at `s = n−1` the formula itself
/// degenerates to 0/0.
///
/// Fails with [`Error::DegenerateAtMaximum`] when μ = X[0] (all reference
/// mass on the largest demand value), which leaves no head chain at all.
pub fn lower_mass(model: &DemandModel) -> Result<MassFunction> {
    let x = model.support();
    let n = model.len();
    let mu = model.mean();
    let s = model.split();
    if s == 0 {
        return Err(Error::DegenerateAtMaximum { mean: mu });
    }

    let mut focal = Vec::with_capacity(n - s + 1);
    let mut alpha = 0.0;
    for k in (s - 1)..=(n - 2) {
        if k == s - 1 {
            if mu != x[s] {
                let mass = (mu - x[s]) / (x[0] - x[s]);
                alpha += mass;
                focal.push(FocalSet { lo: 0, hi: k, mass });
            }
        } else {
            let mass = (mu - x[k + 1]) / (x[0] - x[k + 1]) - (mu - x[k]) / (x[0] - x[k]);
            alpha += mass;
            focal.push(FocalSet { lo: 0, hi: k, mass });
        }
    }
    let beta = 1.0 - alpha;
    focal.push(FocalSet {
        lo: n - 1,
        hi: n - 1,
        mass: beta,
    });

    Ok(MassFunction { focal, alpha, beta })
}
