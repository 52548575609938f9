//! Chart points and revenue records.

use serde::{Deserialize, Serialize};

/// A single point of a chart series. Every visualization consumes this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub name: String,
    pub value: f64,
}

impl ChartData {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Granularity of a revenue series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueKind {
    Daily,
    Monthly,
}

wire_str!(RevenueKind {
    Daily => "daily",
    Monthly => "monthly",
});

/// A revenue data point with an explicit granularity tag.
///
/// The backend distinguishes the two shapes only by the presence of a `date`
/// or `month` key; this type carries the distinction explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RevenueRecord {
    Daily { date: String, revenue: f64 },
    Monthly { month: String, revenue: f64 },
}

impl RevenueRecord {
    /// Returns the granularity of this record.
    #[must_use]
    pub fn kind(&self) -> RevenueKind {
        match self {
            Self::Daily { .. } => RevenueKind::Daily,
            Self::Monthly { .. } => RevenueKind::Monthly,
        }
    }

    /// Returns the date or month label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Daily { date, .. } => date,
            Self::Monthly { month, .. } => month,
        }
    }

    #[must_use]
    pub fn revenue(&self) -> f64 {
        match self {
            Self::Daily { revenue, .. } | Self::Monthly { revenue, .. } => *revenue,
        }
    }

    /// Converts the record into a chart point.
    #[must_use]
    pub fn to_chart_data(&self) -> ChartData {
        ChartData::new(self.label(), self.revenue())
    }
}
