//! Chart data shaping.
//!
//! Every function here is total: malformed or missing input yields an empty
//! series or default-valued points, never an error.

use paywall_types::{ChartData, RevenueKind, RevenueRecord};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Label used when a record carries no usable `date`/`month`.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Decides the granularity of a revenue series from its first element.
///
/// A `date` key on the first element selects [`RevenueKind::Daily`]; anything
/// else is treated as monthly. Returns `None` for an empty series.
#[must_use]
pub fn detect_revenue_kind(records: &[Value]) -> Option<RevenueKind> {
    let first = records.first()?;
    if first.get("date").is_some() {
        Some(RevenueKind::Daily)
    } else {
        Some(RevenueKind::Monthly)
    }
}

/// Converts raw revenue records into explicitly tagged records.
///
/// The kind detected on the first element applies to the whole series.
#[must_use]
pub fn to_revenue_records(records: Option<&[Value]>) -> Vec<RevenueRecord> {
    let Some(records) = records else {
        return Vec::new();
    };
    let Some(kind) = detect_revenue_kind(records) else {
        return Vec::new();
    };

    records
        .iter()
        .map(|record| {
            let revenue = numeric_field(record, "revenue");
            match kind {
                RevenueKind::Daily => RevenueRecord::Daily {
                    date: label_field(record, "date"),
                    revenue,
                },
                RevenueKind::Monthly => RevenueRecord::Monthly {
                    month: label_field(record, "month"),
                    revenue,
                },
            }
        })
        .collect()
}

/// Maps a revenue series of unknown shape to chart points.
#[must_use]
pub fn to_chart_data(records: Option<&[Value]>) -> Vec<ChartData> {
    revenue_records_to_chart(&to_revenue_records(records))
}

/// Same as [`to_chart_data`] but takes the raw JSON value; anything other
/// than an array yields an empty series.
#[must_use]
pub fn chart_from_json(value: &Value) -> Vec<ChartData> {
    to_chart_data(value.as_array().map(Vec::as_slice))
}

#[must_use]
pub fn revenue_records_to_chart(records: &[RevenueRecord]) -> Vec<ChartData> {
    records.iter().map(RevenueRecord::to_chart_data).collect()
}

/// Flattens a traffic-source map into chart points, keeping key order.
#[must_use]
pub fn normalize_traffic_data(sources: Option<&Map<String, Value>>) -> Vec<ChartData> {
    sources
        .map(|sources| {
            sources
                .iter()
                .map(|(name, value)| ChartData::new(name.clone(), as_number(value)))
                .collect()
        })
        .unwrap_or_default()
}

/// Merges several series into one, summing values that share a name.
///
/// Output order is the order in which each name first appears.
#[must_use]
pub fn combine_chart_data<'a, I>(series: I) -> Vec<ChartData>
where
    I: IntoIterator<Item = &'a [ChartData]>,
{
    let mut combined: Vec<ChartData> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for point in series.into_iter().flatten() {
        match positions.get(&point.name) {
            Some(&index) => combined[index].value += point.value,
            None => {
                positions.insert(point.name.clone(), combined.len());
                combined.push(point.clone());
            }
        }
    }

    combined
}

fn label_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

fn numeric_field(record: &Value, key: &str) -> f64 {
    record.get(key).map_or(0.0, as_number)
}

fn as_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() { number } else { 0.0 }
}
