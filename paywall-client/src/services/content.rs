use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::ContentPreview;
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct ContentService {
    http: HttpClient,
}

impl ContentService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn preview(&self, id: &str) -> ApiResult<ContentPreview> {
        validate::required("Content id", id)?;
        self.http
            .record(ApiRequest::get(resource_path("/content", id, "/preview")))
            .await
            .inspect_err(|e| error!("Failed to fetch preview for {id}: {e}"))
    }

    /// Counts a view. Failures are logged and dropped.
    pub async fn track_view(&self, id: &str) {
        if id.trim().is_empty() {
            return;
        }
        let request = ApiRequest::post(resource_path("/content", id, "/view"));
        match self.http.execute(request).await {
            Ok(()) => debug!("Tracked view of {id}"),
            Err(e) => warn!("View tracking failed for {id}: {e}"),
        }
    }
}
