use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::services::{
    AccessService, AnalyticsService, AuthService, CommunicationService, ContentService,
    CustomerService, PaywallService, PreferencesService, SocialShareService, SupportService,
};
use crate::session::SessionObserver;
use crate::token_store::TokenStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Entry point bundling every service over one shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct PaywallApi {
    http: HttpClient,
}

impl PaywallApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn connect(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        observer: Arc<dyn SessionObserver>,
    ) -> ApiResult<Self> {
        Ok(Self::new(HttpClient::with_observer(config, tokens, observer)?))
    }

    /// Services from the returned handle stop with [`crate::ApiError::Cancelled`]
    /// once `token` fires.
    #[must_use]
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self::new(self.http.scoped(token))
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.http.clone())
    }

    #[must_use]
    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.http.clone())
    }

    #[must_use]
    pub fn communications(&self) -> CommunicationService {
        CommunicationService::new(self.http.clone())
    }

    #[must_use]
    pub fn support(&self) -> SupportService {
        SupportService::new(self.http.clone())
    }

    #[must_use]
    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(self.http.clone())
    }

    #[must_use]
    pub fn access(&self) -> AccessService {
        AccessService::new(self.http.clone())
    }

    #[must_use]
    pub fn social_shares(&self) -> SocialShareService {
        SocialShareService::new(self.http.clone())
    }

    #[must_use]
    pub fn content(&self) -> ContentService {
        ContentService::new(self.http.clone())
    }

    #[must_use]
    pub fn paywalls(&self) -> PaywallService {
        PaywallService::new(self.http.clone())
    }

    #[must_use]
    pub fn preferences(&self) -> PreferencesService {
        PreferencesService::new(self.http.clone())
    }
}
