//! Typed wrappers over the backend's resource endpoints.
//!
//! Each service logs failures with context and re-raises them unchanged.

mod access;
mod analytics;
mod auth;
mod communications;
mod content;
mod customers;
mod paywalls;
mod preferences;
mod social;
mod support;

pub use access::AccessService;
pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use communications::CommunicationService;
pub use content::ContentService;
pub use customers::CustomerService;
pub use paywalls::PaywallService;
pub use preferences::PreferencesService;
pub use social::SocialShareService;
pub use support::SupportService;
