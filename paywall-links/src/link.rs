//! Protected link records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a protected link.
/// Uses UUID v7 so links sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(Uuid);

impl LinkId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Paused,
    Expired,
}

impl LinkStatus {
    /// The status a toggle moves to, or `None` for expired links.
    #[must_use]
    pub fn toggled(self) -> Option<Self> {
        match self {
            Self::Active => Some(Self::Paused),
            Self::Paused => Some(Self::Active),
            Self::Expired => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link whose target is only reachable through the paywall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedLink {
    pub id: LinkId,
    pub url: String,
    pub title: String,
    /// Lifetime click count.
    pub clicks: u64,
    pub status: LinkStatus,
    pub expiration_date: Option<DateTime<Utc>>,
    pub max_clicks: Option<u64>,
    /// Clicks counted against `max_clicks`.
    pub current_clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl ProtectedLink {
    /// Clicks left before `max_clicks` is reached, if a limit is set.
    #[must_use]
    pub fn remaining_clicks(&self) -> Option<u64> {
        self.max_clicks
            .map(|max| max.saturating_sub(self.current_clicks))
    }

    /// True once the expiration date has passed or the click limit is used up.
    #[must_use]
    pub fn is_past_limits(&self, now: DateTime<Utc>) -> bool {
        let past_date = self.expiration_date.is_some_and(|at| at <= now);
        let out_of_clicks = self.remaining_clicks() == Some(0);
        past_date || out_of_clicks
    }
}

/// Input for creating a link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub url: String,
    pub title: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub max_clicks: Option<u64>,
}

/// Partial edit of a link. Outer `None` leaves a field untouched; for the
/// optional limits, `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkUpdate {
    pub url: Option<String>,
    pub title: Option<String>,
    pub status: Option<LinkStatus>,
    pub expiration_date: Option<Option<DateTime<Utc>>>,
    pub max_clicks: Option<Option<u64>>,
}
