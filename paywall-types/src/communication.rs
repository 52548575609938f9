//! Outbound communications (email, SMS, in-app notifications).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStatus {
    Sent,
    Failed,
    Pending,
}

wire_str!(CommunicationStatus {
    Sent => "sent",
    Failed => "failed",
    Pending => "pending",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationType {
    Email,
    Sms,
    Notification,
}

wire_str!(CommunicationType {
    Email => "email",
    Sms => "sms",
    Notification => "notification",
});

/// A communication sent (or queued) to one or more customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub status: CommunicationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub open_rate: Option<f64>,
    pub click_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCommunicationRequest {
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub subject: String,
    pub message: String,
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Sends one message to a whole segment or an explicit recipient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCommunicationRequest {
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
}

/// Outcome of a bulk send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkSendSummary {
    pub queued: u32,
    pub failed: u32,
}
