//! Typed precondition and degeneracy errors.
//!
//! Inputs are validated once at the boundary of each entry point
//! ([`DemandModel::new`](crate::model::DemandModel::new), parameter
//! constructors, the optimizer); the numeric internals never re-validate and
//! never manufacture NaN to signal failure.

use thiserror::Error;

/// Result type alias for newsvendor core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating inputs or detecting degenerate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The demand support has fewer than two points.
    #[error("demand support must contain at least two points, got {len}")]
    SupportTooShort { len: usize },

    /// The demand support is not strictly decreasing (or repeats a value).
    #[error("demand support must be strictly decreasing with distinct values, violated at index {index}")]
    SupportNotDecreasing { index: usize },

    /// A demand value is negative or not finite.
    #[error("demand values must be finite and non-negative, got {value} at index {index}")]
    InvalidDemand { index: usize, value: f64 },

    /// Support and reference distribution have different lengths.
    #[error("support has {support} entries but the distribution has {probs}")]
    LengthMismatch { support: usize, probs: usize },

    /// A probability is negative or not finite.
    #[error("probabilities must be finite and non-negative, got {value} at index {index}")]
    InvalidProbability { index: usize, value: f64 },

    /// The reference distribution does not sum to one.
    #[error("probabilities must sum to 1, got {total}")]
    ProbabilityMass { total: f64 },

    /// The contamination weight lies outside [0, 1].
    #[error("epsilon must lie in [0, 1], got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },

    /// A cost or rate parameter is zero, negative, or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    /// Unit revenue does not exceed unit cost.
    #[error("unit revenue must exceed unit cost, got revenue {revenue} and cost {cost}")]
    RevenueNotAboveCost { revenue: f64, cost: f64 },

    /// The reference distribution concentrates on the largest demand value,
    /// leaving the head chain of ν** empty.
    #[error("reference distribution is degenerate at the largest demand value (mean {mean})")]
    DegenerateAtMaximum { mean: f64 },
}
