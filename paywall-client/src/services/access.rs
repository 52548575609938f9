use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{AccessCheck, AccessGrant, AccessRequest};
use tracing::{error, info};

/// Buyer-side access to paywalled content.
#[derive(Debug, Clone)]
pub struct AccessService {
    http: HttpClient,
}

impl AccessService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn request_access(&self, request: &AccessRequest) -> ApiResult<AccessGrant> {
        validate::required("Paywall id", &request.paywall_id)?;
        validate::email("Email", &request.email)?;

        let grant: AccessGrant = self
            .http
            .json(ApiRequest::post("/access/request").json(request)?)
            .await
            .inspect_err(|e| error!("Access request for {} failed: {e}", request.paywall_id))?;
        info!("Access requested for paywall {}", request.paywall_id);
        Ok(grant)
    }

    pub async fn check_access(&self, paywall_id: &str) -> ApiResult<AccessCheck> {
        validate::required("Paywall id", paywall_id)?;
        self.http
            .json(ApiRequest::get(resource_path("/access/check", paywall_id, "")))
            .await
            .inspect_err(|e| error!("Access check for {paywall_id} failed: {e}"))
    }
}
