use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{
    BulkCommunicationRequest, BulkSendSummary, Communication, CommunicationStatus,
    SendCommunicationRequest,
};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct CommunicationService {
    http: HttpClient,
}

impl CommunicationService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, status: Option<CommunicationStatus>) -> ApiResult<Vec<Communication>> {
        let mut request = ApiRequest::get("/communications");
        if let Some(status) = status {
            request = request.query("status", status);
        }
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch communications: {e}"))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Communication> {
        validate::required("Communication id", id)?;
        self.http
            .record(ApiRequest::get(resource_path("/communications", id, "")))
            .await
            .inspect_err(|e| error!("Failed to fetch communication {id}: {e}"))
    }

    pub async fn send(&self, message: &SendCommunicationRequest) -> ApiResult<Communication> {
        validate::required("Subject", &message.subject)?;
        validate::required("Message", &message.message)?;
        if message.recipients.iter().all(|r| r.trim().is_empty()) {
            return Err(ApiError::Validation(
                "at least one recipient is required".into(),
            ));
        }

        let sent: Communication = self
            .http
            .record(ApiRequest::post("/communications").json(message)?)
            .await
            .inspect_err(|e| error!("Failed to send communication: {e}"))?;
        info!(
            "Queued {} to {} recipient(s)",
            sent.kind,
            message.recipients.len()
        );
        Ok(sent)
    }

    /// Sends to a segment or an explicit list; one of the two is required.
    pub async fn send_bulk(&self, message: &BulkCommunicationRequest) -> ApiResult<BulkSendSummary> {
        validate::required("Subject", &message.subject)?;
        validate::required("Message", &message.message)?;
        let has_segment = message
            .segment_id
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        if !has_segment && message.recipients.is_empty() {
            return Err(ApiError::Validation(
                "a segment or at least one recipient is required".into(),
            ));
        }

        self.http
            .json(ApiRequest::post("/communications/bulk").json(message)?)
            .await
            .inspect_err(|e| error!("Failed to send bulk communication: {e}"))
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: CommunicationStatus,
    ) -> ApiResult<Communication> {
        validate::required("Communication id", id)?;
        let request = ApiRequest::patch(resource_path("/communications", id, "/status"))
            .json(&serde_json::json!({ "status": status }))?;
        self.http
            .record(request)
            .await
            .inspect_err(|e| error!("Failed to update communication {id}: {e}"))
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        validate::required("Communication id", id)?;
        self.http
            .execute(ApiRequest::delete(resource_path("/communications", id, "")))
            .await
            .inspect_err(|e| error!("Failed to delete communication {id}: {e}"))
    }

    pub async fn export(&self, status: Option<CommunicationStatus>) -> ApiResult<Vec<u8>> {
        let mut request = ApiRequest::get("/communications/export");
        if let Some(status) = status {
            request = request.query("status", status);
        }
        self.http
            .bytes(request)
            .await
            .inspect_err(|e| error!("Failed to export communications: {e}"))
    }
}
