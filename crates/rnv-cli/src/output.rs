//! Output rendering for the driver commands.
//!
//! stdout carries only the command payload; all logging goes to stderr.

use clap::ValueEnum;
use serde::Serialize;

use crate::report::{MaximinReport, MinimaxReport, OptimizerRow, SurfaceReport};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,

    /// Human-readable Markdown
    Md,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
        }
    }
}

fn json<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn optimizer_table(rows: &[OptimizerRow], value_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("| epsilon | quantity | {value_label} |\n"));
    out.push_str("|---|---|---|\n");
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {:.4} |\n",
            row.epsilon, row.quantity, row.value
        ));
    }
    out
}

pub fn render_maximin(
    report: &MaximinReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => json(report),
        OutputFormat::Md => {
            let mut out = String::new();
            out.push_str("# Maximin order quantities\n\n");
            out.push_str(&format!(
                "mean = {}, alpha = {}, beta = {}, choquet mean = {}\n",
                report.mean, report.alpha, report.beta, report.choquet_mean
            ));
            out.push_str(&format!(
                "revenue = {}, cost = {}\n\n",
                report.revenue, report.cost
            ));
            out.push_str(&optimizer_table(&report.optimizers, "profit"));
            Ok(out)
        }
    }
}

pub fn render_minimax(
    report: &MinimaxReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => json(report),
        OutputFormat::Md => {
            let mut out = String::new();
            out.push_str("# Minimax order quantities\n\n");
            out.push_str(&format!(
                "mean = {}, alpha = {}, beta = {}, choquet mean = {}\n",
                report.mean, report.alpha, report.beta, report.choquet_mean
            ));
            out.push_str(&format!(
                "shortage = {}, holding = {}, intervals = {}\n\n",
                report.shortage, report.holding, report.intervals
            ));
            out.push_str(&optimizer_table(&report.optimizers, "loss"));
            Ok(out)
        }
    }
}

pub fn render_surface(
    report: &SurfaceReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => json(report),
        OutputFormat::Md => {
            let mut out = String::new();
            out.push_str(&format!(
                "# Optimal quantity surface ({}, epsilon = {})\n\n",
                report.criterion, report.epsilon
            ));
            out.push_str(&format!(
                "| {} | {} | quantity |\n|---|---|---|\n",
                report.x_label, report.y_label
            ));
            for point in &report.points {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    point.x, point.y, point.quantity
                ));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_table_lists_every_row() {
        let rows = vec![
            OptimizerRow {
                epsilon: 0.0,
                quantity: 1500.0,
                value: 5150.0,
            },
            OptimizerRow {
                epsilon: 0.5,
                quantity: 1000.0,
                value: 3200.0,
            },
        ];
        let table = optimizer_table(&rows, "profit");
        assert!(table.contains("| 0 | 1500 |"));
        assert!(table.contains("| 0.5 | 1000 |"));
    }
}
