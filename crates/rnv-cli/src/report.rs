//! Serializable result payloads emitted by the driver commands.

use serde::Serialize;

/// Optimizer found for one contamination weight.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptimizerRow {
    pub epsilon: f64,
    pub quantity: f64,
    pub value: f64,
}

/// Output of `rnv maximin`: the lower-expected-profit maximizers.
#[derive(Debug, Clone, Serialize)]
pub struct MaximinReport {
    /// Expected demand μ under the reference distribution.
    pub mean: f64,
    pub alpha: f64,
    pub beta: f64,
    /// Demand evaluated at ν*'s extreme points; reproduces μ.
    pub choquet_mean: f64,
    pub revenue: f64,
    pub cost: f64,
    pub optimizers: Vec<OptimizerRow>,
}

/// Output of `rnv minimax`: the upper-expected-loss minimizers.
#[derive(Debug, Clone, Serialize)]
pub struct MinimaxReport {
    pub mean: f64,
    pub alpha: f64,
    pub beta: f64,
    /// Demand evaluated at ν**'s extreme points; reproduces μ.
    pub choquet_mean: f64,
    pub shortage: f64,
    pub holding: f64,
    /// Number of intervals in the domain decomposition.
    pub intervals: usize,
    pub optimizers: Vec<OptimizerRow>,
}

/// One grid point of a cost-parameter sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub quantity: f64,
}

/// Output of `rnv surface`: the optimal order quantity across a grid of
/// cost parameters at fixed epsilon, one record per admissible pair.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub criterion: String,
    pub epsilon: f64,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<SurfacePoint>,
}
