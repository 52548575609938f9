//! Social share tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Linkedin,
    Reddit,
    Email,
    #[serde(other)]
    Other,
}

wire_str!(SocialPlatform {
    Twitter => "twitter",
    Facebook => "facebook",
    Linkedin => "linkedin",
    Reddit => "reddit",
    Email => "email",
    Other => "other",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialShare {
    pub id: String,
    pub paywall_id: String,
    pub platform: SocialPlatform,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareStats {
    pub total_shares: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    /// Share counts per platform, in backend order.
    pub by_platform: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackShareRequest {
    pub paywall_id: String,
    pub platform: SocialPlatform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}
