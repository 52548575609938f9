//! Data-transfer records for the paywall dashboard API.
//!
//! Every record here is a plain request/response shape owned by the backend.
//! The dashboard never enforces cross-request consistency on them; the
//! backend is the source of truth.
//!
//! - Response envelope (`{success, data, message}`)
//! - Chart points and tagged revenue records
//! - Customers, communications, support tickets
//! - Analytics, access, social shares, content previews, paywalls
//! - Authentication and user preferences

/// Implements `as_str`, `Display` and `FromStr` using the backend's wire spelling.
macro_rules! wire_str {
    ($ty:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the wire spelling used by the backend.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(crate::Error::InvalidValue {
                        kind: stringify!($ty),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

mod access;
mod analytics;
mod auth;
mod chart;
mod communication;
mod content;
mod customer;
mod envelope;
mod paywall;
mod preferences;
mod social;
mod support;

pub use access::{AccessCheck, AccessGrant, AccessRequest};
pub use analytics::{AnalyticsData, AnalyticsPeriod, CreatorStats, TopPaywall, TrafficSources};
pub use auth::{AuthTokens, LoginRequest, LoginResponse, MfaVerifyRequest, User};
pub use chart::{ChartData, RevenueKind, RevenueRecord};
pub use communication::{
    BulkCommunicationRequest, BulkSendSummary, Communication, CommunicationStatus,
    CommunicationType, SendCommunicationRequest,
};
pub use content::ContentPreview;
pub use customer::{
    CreateCustomerRequest, Customer, CustomerAnalytics, CustomerFilters, CustomerSegment,
    CustomerStatus, UpdateCustomerRequest,
};
pub use envelope::ApiEnvelope;
pub use paywall::{
    CreatePaywallRequest, Paywall, PaywallContentType, PaywallStatus, UpdatePaywallRequest,
};
pub use preferences::{Theme, UserPreferences};
pub use social::{ShareStats, SocialPlatform, SocialShare, TrackShareRequest};
pub use support::{
    CreateTicketRequest, SupportCategory, SupportStatistics, SupportTicket, TicketFilters,
    TicketPriority, TicketReply, TicketStatus, UpdateTicketRequest,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}
