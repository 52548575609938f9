//! Analytics payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Traffic source name to visit count, in the order the backend sent them.
pub type TrafficSources = Map<String, Value>;

/// Reporting window accepted by the analytics endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyticsPeriod {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

wire_str!(AnalyticsPeriod {
    Week => "7d",
    Month => "30d",
    Quarter => "90d",
    Year => "1y",
});

/// Dashboard analytics for the signed-in creator.
///
/// `revenue_data` stays raw JSON: depending on the period the backend sends
/// daily (`date`) or monthly (`month`) records, and the shape is only known
/// by inspecting the array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsData {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_views: u64,
    pub conversion_rate: f64,
    pub revenue_data: Vec<Value>,
    pub traffic_sources: TrafficSources,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPaywall {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub sales: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub conversion_rate: f64,
}

/// Lifetime statistics for a single creator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatorStats {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_paywalls: u32,
    pub active_paywalls: u32,
    pub total_customers: u32,
    pub average_order_value: f64,
}
