//! Aggregates over a chart series, as shown on dashboard stat cards.

use paywall_types::ChartData;
use serde::{Deserialize, Serialize};

#[must_use]
pub fn series_total(series: &[ChartData]) -> f64 {
    series.iter().map(|point| point.value).sum()
}

/// Mean value, or `None` for an empty series.
#[must_use]
pub fn series_average(series: &[ChartData]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(series_total(series) / series.len() as f64)
}

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when `previous` is zero, since growth from nothing has no
/// meaningful percentage.
#[must_use]
pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Summary statistics for a chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub total: f64,
    pub average: f64,
    /// Highest point; the earliest one wins ties.
    pub peak: Option<ChartData>,
}

impl SeriesSummary {
    #[must_use]
    pub fn from_series(series: &[ChartData]) -> Self {
        let peak = series
            .iter()
            .fold(None::<&ChartData>, |best, point| match best {
                Some(best) if best.value >= point.value => Some(best),
                _ => Some(point),
            })
            .cloned();

        Self {
            points: series.len(),
            total: series_total(series),
            average: series_average(series).unwrap_or(0.0),
            peak,
        }
    }
}
