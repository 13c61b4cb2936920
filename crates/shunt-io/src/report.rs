//! Summary statistics and exceedance frequencies of simulated braking distances.

use serde::{Deserialize, Serialize};
use shunt_core::F;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Thresholds in m checked when none are given.
pub const DEFAULT_THRESHOLDS: [F; 6] = [64.0, 65.0, 66.0, 67.0, 68.0, 69.0];

/// Upper tail probability for which a critical distance is reported.
pub const TAIL_PROBABILITY: F = 1e-5;

/// Descriptive statistics of a set of braking distances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Summary {
    pub count: usize,
    #[tabled(display = "metres")]
    pub mean: F,
    /// Population standard deviation.
    #[tabled(display = "metres")]
    pub std_dev: F,
    #[tabled(display = "metres")]
    pub min: F,
    /// Longest braking distance.
    #[tabled(display = "metres")]
    pub max: F,
}

impl Summary {
    /// `None` for an empty slice.
    pub fn from_distances(distances: &[F]) -> Option<Self> {
        if distances.is_empty() {
            return None;
        }
        let n = distances.len() as F;
        let mean = distances.iter().sum::<F>() / n;
        let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<F>() / n;
        let (min, max) = distances
            .iter()
            .fold((F::INFINITY, F::NEG_INFINITY), |(lo, hi), &d| (lo.min(d), hi.max(d)));

        Some(Self {
            count: distances.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Relative frequency of braking distances above one threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct ExceedanceRow {
    #[tabled(rename = "s (m)")]
    #[tabled(display = "metres")]
    pub threshold: F,
    #[tabled(rename = "p(s > threshold)")]
    pub probability: F,
}

/// Fraction of `distances` strictly greater than `threshold`. Zero when empty.
pub fn exceedance(distances: &[F], threshold: F) -> F {
    if distances.is_empty() {
        return 0.0;
    }
    let above = distances.iter().filter(|&&d| d > threshold).count();
    above as F / distances.len() as F
}

pub fn exceedance_table(distances: &[F], thresholds: &[F]) -> Vec<ExceedanceRow> {
    thresholds
        .iter()
        .map(|&threshold| ExceedanceRow {
            threshold,
            probability: exceedance(distances, threshold),
        })
        .collect()
}

/// Ascending copy of `distances`.
pub fn sorted(distances: &[F]) -> Vec<F> {
    let mut sorted = distances.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Distance exceeded by a fraction `p` of the trials in `sorted`.
///
/// Returns the value with exactly `round(p · M)` trials above it, or `None`
/// when the sample is too small to resolve `p`.
pub fn upper_quantile(sorted: &[F], p: F) -> Option<F> {
    let above = (p * sorted.len() as F).round() as usize;
    if above >= sorted.len() {
        return None;
    }
    sorted.get(sorted.len() - 1 - above).copied()
}

/// Whether `n_trials` put at least 100 samples beyond the `p` tail.
pub fn resolves_tail(n_trials: usize, p: F) -> bool {
    n_trials as F * p >= 100.0
}

pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new([summary.clone()]);
    table.with(Style::modern());
    table
}

pub fn exceedance_report(rows: &[ExceedanceRow]) -> Table {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table
}

fn metres(value: &F) -> String {
    format!("{:.3}", value)
}
