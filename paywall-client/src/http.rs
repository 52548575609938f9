//! Authenticated, throttled HTTP transport.
//!
//! Every service call goes through [`HttpClient`]. It attaches the bearer
//! token (except on public auth paths), refreshes an expired token once and
//! replays the request, surfaces 429s without retrying, and normalizes every
//! failure into [`ApiError`].

use crate::config::ClientConfig;
use crate::envelope::{unwrap_envelope, unwrap_record};
use crate::error::{message_from_body, ApiError, ApiResult};
use crate::request::ApiRequest;
use crate::session::{NoopSessionObserver, SessionObserver};
use crate::throttle::{ThrottlePermit, Throttler};
use crate::token_store::TokenStore;
use paywall_types::AuthTokens;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = concat!("paywall-dashboard/", env!("CARGO_PKG_VERSION"));

/// Cheap to clone; clones share the connection pool, token store,
/// throttler and refresh lock.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
    cancel: Option<CancellationToken>,
}

struct Inner {
    config: ClientConfig,
    client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    observer: Arc<dyn SessionObserver>,
    throttler: Throttler,
    /// Serializes refresh attempts so concurrent 401s trigger one refresh.
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_base_url", &self.inner.config.api_base_url)
            .field("throttler", &self.inner.throttler)
            .field("scoped", &self.cancel.is_some())
            .finish()
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        Self::with_observer(config, tokens, Arc::new(NoopSessionObserver))
    }

    pub fn with_observer(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        observer: Arc<dyn SessionObserver>,
    ) -> ApiResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        let throttler = Throttler::new(config.max_concurrent_requests);

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                client,
                tokens,
                observer,
                throttler,
                refresh_lock: Mutex::new(()),
            }),
            cancel: None,
        })
    }

    /// Returns a handle whose requests fail with [`ApiError::Cancelled`]
    /// once `token` is cancelled. The underlying client is shared.
    #[must_use]
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    #[must_use]
    pub fn throttler(&self) -> &Throttler {
        &self.inner.throttler
    }

    /// Sends a request and unwraps the envelope leniently.
    pub async fn json<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.cancellable(self.body_json(&request)).await?;
        unwrap_envelope(body)
    }

    /// Sends a request whose payload must be a single record.
    pub async fn record<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let body = self.cancellable(self.body_json(&request)).await?;
        unwrap_record(body)
    }

    /// Sends a request and only checks that it succeeded.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<()> {
        let body = self.cancellable(self.body_json(&request)).await?;
        unwrap_envelope::<Value>(body).map(|_| ())
    }

    /// Sends a request and returns the raw body, for file downloads.
    pub async fn bytes(&self, request: ApiRequest) -> ApiResult<Vec<u8>> {
        self.cancellable(async {
            let (response, _permit) = self.perform(&request).await?;
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        })
        .await
    }

    /// Exchanges the stored refresh token for new tokens and saves them.
    pub async fn refresh_session(&self) -> ApiResult<AuthTokens> {
        let _guard = self.inner.refresh_lock.lock().await;
        let refresh_token = self
            .inner
            .tokens
            .load()?
            .and_then(|t| t.refresh_token)
            .ok_or(ApiError::SessionExpired)?;
        let tokens = self.cancellable(self.request_refresh(&refresh_token)).await?;
        self.inner.tokens.save(&tokens)?;
        Ok(tokens)
    }

    async fn cancellable<T, F>(&self, fut: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(ApiError::Cancelled),
                result = fut => result,
            },
            None => fut.await,
        }
    }

    async fn body_json(&self, request: &ApiRequest) -> ApiResult<Value> {
        let (response, _permit) = self.perform(request).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Runs the request through the throttler and the auth handling. The
    /// permit is returned so the caller keeps it while reading the body.
    async fn perform(&self, request: &ApiRequest) -> ApiResult<(Response, ThrottlePermit)> {
        let permit = self.inner.throttler.acquire().await?;
        let protected = !self.inner.config.is_public(&request.path);
        let mut refreshed = false;

        loop {
            let token = if protected {
                self.inner.tokens.load()?.map(|t| t.access_token)
            } else {
                None
            };

            let response = self.dispatch(request, token.as_deref()).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && protected {
                if !request.refresh {
                    let message = read_error_message(response).await;
                    debug!("{} {} unauthorized, refresh disabled", request.method, request.path);
                    return Err(ApiError::Unauthorized(message));
                }
                if refreshed {
                    let message = read_error_message(response).await;
                    warn!(
                        "{} {} still unauthorized after token refresh",
                        request.method, request.path
                    );
                    return Err(ApiError::Unauthorized(message));
                }
                refreshed = true;
                self.refresh_after_unauthorized(token.as_deref()).await?;
                continue;
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = retry_after(&response);
                warn!(
                    "Rate limited on {} {} (retry after {:?}s)",
                    request.method, request.path, retry_after_secs
                );
                return Err(ApiError::RateLimited { retry_after_secs });
            }

            if !status.is_success() {
                let message = read_error_message(response).await;
                debug!(
                    "{} {} failed with {}: {}",
                    request.method, request.path, status, message
                );
                return Err(ApiError::Http {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok((response, permit));
        }
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> ApiResult<Response> {
        let url = self.inner.config.endpoint(&request.path);
        let mut builder = self.inner.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            debug!("{} {} transport error: {}", request.method, request.path, err);
            err
        })
    }

    /// Refreshes after a 401 that was sent with `stale`. If another request
    /// already replaced the token, returns without refreshing again.
    async fn refresh_after_unauthorized(&self, stale: Option<&str>) -> ApiResult<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        let current = self.inner.tokens.load()?;

        if let Some(current) = &current {
            if Some(current.access_token.as_str()) != stale {
                debug!("Access token already refreshed, replaying request");
                return Ok(());
            }
        }

        let Some(refresh_token) = current.and_then(|t| t.refresh_token) else {
            warn!("Received 401 with no refresh token available");
            self.expire_session();
            return Err(ApiError::SessionExpired);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(tokens) => {
                self.inner.tokens.save(&tokens)?;
                info!("Access token refreshed");
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed: {e}");
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// Calls the refresh endpoint directly, outside the throttler.
    async fn request_refresh(&self, refresh_token: &str) -> ApiResult<AuthTokens> {
        let url = self.inner.config.endpoint(&self.inner.config.refresh_path);
        debug!("Refreshing access token");

        let response = self
            .inner
            .client
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = read_error_message(response).await;
            return Err(ApiError::Unauthorized(message));
        }

        let body: Value = response.json().await?;
        let tokens: AuthTokens = unwrap_record(body)?;
        Ok(AuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token.or_else(|| Some(refresh_token.to_string())),
        })
    }

    fn expire_session(&self) {
        if let Err(e) = self.inner.tokens.clear() {
            error!("Failed to clear stored tokens: {e}");
        }
        self.inner.observer.session_expired();
    }
}

async fn read_error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    message_from_body(status, &body)
}

fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
