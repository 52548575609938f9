//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a customer is still purchasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

wire_str!(CustomerStatus {
    Active => "active",
    Inactive => "inactive",
});

/// A customer of the creator, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_purchases: u32,
    pub last_purchase: Option<DateTime<Utc>>,
    pub join_date: DateTime<Utc>,
    pub status: CustomerStatus,
}

/// Filters for listing and exporting customers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilters {
    pub status: Option<CustomerStatus>,
    pub search: Option<String>,
    pub segment: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CustomerFilters {
    /// Renders the set filters as query pairs, skipping unset and blank ones.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        if let Some(segment) = &self.segment {
            query.push(("segment", segment.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
}

/// A saved customer segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer_count: u32,
    /// Backend-defined segment criteria, kept opaque.
    #[serde(default)]
    pub criteria: serde_json::Value,
}

/// Aggregate customer metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerAnalytics {
    pub total_customers: u32,
    pub active_customers: u32,
    pub new_customers_this_month: u32,
    pub average_lifetime_value: f64,
    pub retention_rate: f64,
}
