//! Summary statistics over a filtered view.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::airport::AirportRecord;

/// Min / max / mean elevation of a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ElevationStats {
    /// Mean rounded to two decimals, as shown to the user.
    pub fn display_mean(&self) -> f64 {
        round_to(self.mean, 2)
    }
}

/// Count of one airport type, with its share of the view for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub percent: f64,
}

/// Five-number summary of elevations for one type, for the box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDistribution {
    #[serde(rename = "type")]
    pub kind: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Elevation stats over records that have an elevation.
///
/// `None` when there is nothing to summarize; callers show the empty state.
pub fn elevation_stats(view: &[&AirportRecord]) -> Option<ElevationStats> {
    let values: Vec<f64> = view.iter().filter_map(|r| r.elevation()).collect();
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(ElevationStats {
        min,
        max,
        mean: mean(&values),
    })
}

/// Number of records per distinct type, keys sorted.
///
/// Every record is counted exactly once; absent types have no entry.
pub fn group_count_by_type(view: &[&AirportRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in view {
        *counts.entry(r.kind.clone()).or_insert(0) += 1;
    }
    counts
}

/// Type counts with percentage of the whole view.
pub fn type_shares(counts: &BTreeMap<String, usize>) -> Vec<TypeCount> {
    let total: usize = counts.values().sum();
    counts
        .iter()
        .map(|(kind, &count)| TypeCount {
            kind: kind.clone(),
            count,
            percent: pct(count, total),
        })
        .collect()
}

/// Per-type elevation distribution, keys sorted. Types with no usable
/// elevation are left out.
pub fn distribution_by_type(view: &[&AirportRecord]) -> Vec<TypeDistribution> {
    let mut by_type: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in view {
        if let Some(e) = r.elevation() {
            by_type.entry(r.kind.as_str()).or_default().push(e);
        }
    }

    by_type
        .into_iter()
        .map(|(kind, mut values)| {
            values.sort_by(f64::total_cmp);
            TypeDistribution {
                kind: kind.to_string(),
                min: values[0],
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Linear interpolation between closest ranks over sorted, non-empty input.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
