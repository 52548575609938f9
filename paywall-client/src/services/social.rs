use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{ShareStats, SocialShare, TrackShareRequest};
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct SocialShareService {
    http: HttpClient,
}

impl SocialShareService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, paywall_id: &str) -> ApiResult<Vec<SocialShare>> {
        validate::required("Paywall id", paywall_id)?;
        self.http
            .json(ApiRequest::get(resource_path("/social-shares", paywall_id, "")))
            .await
            .inspect_err(|e| error!("Failed to fetch shares for {paywall_id}: {e}"))
    }

    pub async fn stats(&self, paywall_id: &str) -> ApiResult<ShareStats> {
        validate::required("Paywall id", paywall_id)?;
        self.http
            .json(ApiRequest::get(resource_path("/social-shares", paywall_id, "/stats")))
            .await
            .inspect_err(|e| error!("Failed to fetch share stats for {paywall_id}: {e}"))
    }

    /// Records a share. Failures are logged and dropped.
    pub async fn track_share(&self, share: &TrackShareRequest) {
        let request = match ApiRequest::post("/social-shares/track").json(share) {
            Ok(request) => request,
            Err(e) => {
                warn!("Could not encode share event: {e}");
                return;
            }
        };
        match self.http.execute(request).await {
            Ok(()) => debug!("Tracked {} share of {}", share.platform, share.paywall_id),
            Err(e) => warn!("Share tracking failed for {}: {e}", share.paywall_id),
        }
    }
}
