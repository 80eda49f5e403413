//! Validated demand model: support, reference distribution, first moment.

use serde::Serialize;

use crate::error::{Error, Result};

/// Tolerance for the normalization check on the reference distribution.
const MASS_TOL: f64 = 1e-9;

/// A discrete demand distribution with its support in strictly decreasing
/// order, validated once at construction.
///
/// Index 0 holds the largest demand value, index `n - 1` the smallest. The
/// expected demand μ and the threshold index `s` (the boundary where the
/// support crosses μ from below) are computed here and cached; both Möbius
/// builders and the loss machinery read them without re-validating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandModel {
    support: Vec<f64>,
    probs: Vec<f64>,
    mean: f64,
    split: usize,
}

impl DemandModel {
    /// Build a model from a strictly decreasing support and an aligned
    /// reference distribution summing to one.
    pub fn new(support: Vec<f64>, probs: Vec<f64>) -> Result<Self> {
        let n = support.len();
        if n < 2 {
            return Err(Error::SupportTooShort { len: n });
        }
        if probs.len() != n {
            return Err(Error::LengthMismatch {
                support: n,
                probs: probs.len(),
            });
        }
        for (index, &value) in support.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidDemand { index, value });
            }
            if index > 0 && support[index - 1] <= value {
                return Err(Error::SupportNotDecreasing { index });
            }
        }
        let mut total = 0.0;
        for (index, &value) in probs.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidProbability { index, value });
            }
            total += value;
        }
        if (total - 1.0).abs() > MASS_TOL {
            return Err(Error::ProbabilityMass { total });
        }

        let mean = support.iter().zip(&probs).map(|(x, p)| x * p).sum();

        // Smallest index whose demand value sits at or below the mean; the
        // scan from the bottom stops at the first value above it.
        let mut split = 0;
        for k in (0..n).rev() {
            if support[k] <= mean {
                split = k;
            } else {
                break;
            }
        }

        Ok(Self {
            support,
            probs,
            mean,
            split,
        })
    }

    /// Number of demand points.
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Always false: construction rejects supports shorter than two points.
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Demand values, strictly decreasing.
    pub fn support(&self) -> &[f64] {
        &self.support
    }

    /// Reference probabilities, aligned with [`support`](Self::support).
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Expected demand μ under the reference distribution.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Threshold index `s`: indices `s..n` hold demand values at or below μ,
    /// indices `0..s` hold values above it.
    pub fn split(&self) -> usize {
        self.split
    }

    /// Expected sales at order quantity `q`: `E_P0[min(X, q)]`.
    pub fn expected_sales(&self, q: f64) -> f64 {
        self.support
            .iter()
            .zip(&self.probs)
            .map(|(&x, &p)| x.min(q) * p)
            .sum()
    }
}
