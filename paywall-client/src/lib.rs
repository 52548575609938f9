//! HTTP client for the paywall dashboard backend.
//!
//! - [`HttpClient`]: bearer auth, one refresh-and-retry on 401, 429
//!   surfacing, a concurrency throttle and cancellation scoping
//! - Typed services per resource, bundled by [`PaywallApi`]
//! - [`load_dashboard`]: concurrent widget loading with a slow-load fallback
//! - [`save_export`]: CSV exports written to disk
//!
//! ```no_run
//! # async fn demo() -> paywall_client::ApiResult<()> {
//! use paywall_client::{ClientConfig, MemoryTokenStore, NoopSessionObserver, PaywallApi};
//! use std::sync::Arc;
//!
//! let api = PaywallApi::connect(
//!     ClientConfig::from_env()?,
//!     Arc::new(MemoryTokenStore::new()),
//!     Arc::new(NoopSessionObserver),
//! )?;
//! api.auth().login("creator@example.com", "secret").await?;
//! let customers = api.customers().list(&Default::default()).await?;
//! # let _ = customers;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod export;
pub mod services;
pub mod token_store;

mod api;
mod http;
mod request;
mod session;
mod throttle;
mod validate;

pub use api::PaywallApi;
pub use config::ClientConfig;
pub use dashboard::{
    load_dashboard, DashboardLoad, DashboardOverview, DashboardSnapshot, WidgetState,
    DEFAULT_SLOW_AFTER,
};
pub use envelope::{unwrap_envelope, unwrap_record};
pub use error::{ApiError, ApiResult, ErrorMessage};
pub use export::{export_file_name, save_export, ExportResource};
pub use http::HttpClient;
pub use request::ApiRequest;
pub use services::{
    AccessService, AnalyticsService, AuthService, CommunicationService, ContentService,
    CustomerService, PaywallService, PreferencesService, SocialShareService, SupportService,
};
pub use session::{NoopSessionObserver, SessionObserver};
pub use throttle::{ThrottlePermit, Throttler};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
