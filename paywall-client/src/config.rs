//! Client configuration.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable selecting the backend origin.
pub const API_URL_ENV: &str = "VITE_API_URL";
/// Fallback variable for non-browser deployments.
pub const API_URL_FALLBACK_ENV: &str = "PAYWALL_API_URL";
pub const TIMEOUT_ENV: &str = "PAYWALL_REQUEST_TIMEOUT_SECS";
pub const MAX_CONCURRENT_ENV: &str = "PAYWALL_MAX_CONCURRENT_REQUESTS";

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Upper bound on requests in flight at once.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Configuration for [`crate::HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are appended to it.
    pub api_base_url: String,
    /// Fixed timeout applied to every request.
    pub request_timeout_secs: u64,
    /// Throttler bound.
    pub max_concurrent_requests: usize,
    /// Paths sent without a bearer token.
    pub public_paths: Vec<String>,
    /// Endpoint used to exchange a refresh token.
    pub refresh_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            public_paths: [
                "/auth/login",
                "/auth/register",
                "/auth/refresh",
                "/auth/forgot-password",
                "/auth/reset-password",
                "/auth/mfa/verify",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            refresh_path: "/auth/refresh".to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `api_base_url`.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps variable names
    /// to values.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(API_URL_ENV).or_else(|| non_empty(API_URL_FALLBACK_ENV)) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = non_empty(TIMEOUT_ENV) {
            config.request_timeout_secs = parse_number(TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = non_empty(MAX_CONCURRENT_ENV) {
            config.max_concurrent_requests = parse_number(MAX_CONCURRENT_ENV, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is an absolute http(s) URL and the numeric
    /// limits are non-zero.
    pub fn validate(&self) -> ApiResult<()> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| ApiError::Config(format!("api_base_url {}: {e}", self.api_base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "api_base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ApiError::Config("request timeout must be at least 1s".into()));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ApiError::Config(
                "max_concurrent_requests must be at least 1".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns true if `path` (without query string) is on the public allowlist.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.public_paths.iter().any(|public| path == public)
    }

    /// Joins the base URL and an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> ApiResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Config(format!("{key} must be a positive integer, got {raw:?}")))
}
