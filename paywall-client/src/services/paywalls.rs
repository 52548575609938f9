use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{CreatePaywallRequest, Paywall, PaywallStatus, UpdatePaywallRequest};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct PaywallService {
    http: HttpClient,
}

impl PaywallService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, status: Option<PaywallStatus>) -> ApiResult<Vec<Paywall>> {
        let mut request = ApiRequest::get("/paywalls");
        if let Some(status) = status {
            request = request.query("status", status);
        }
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch paywalls: {e}"))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Paywall> {
        validate::required("Paywall id", id)?;
        self.http
            .record(ApiRequest::get(resource_path("/paywalls", id, "")))
            .await
            .inspect_err(|e| error!("Failed to fetch paywall {id}: {e}"))
    }

    pub async fn create(&self, paywall: &CreatePaywallRequest) -> ApiResult<Paywall> {
        validate::required("Title", &paywall.title)?;
        validate::price(paywall.price)?;
        validate::required("Currency", &paywall.currency)?;

        let created: Paywall = self
            .http
            .record(ApiRequest::post("/paywalls").json(paywall)?)
            .await
            .inspect_err(|e| error!("Failed to create paywall: {e}"))?;
        info!("Created paywall {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &UpdatePaywallRequest) -> ApiResult<Paywall> {
        validate::required("Paywall id", id)?;
        if let Some(title) = &update.title {
            validate::required("Title", title)?;
        }
        if let Some(price) = update.price {
            validate::price(price)?;
        }
        self.http
            .record(ApiRequest::put(resource_path("/paywalls", id, "")).json(update)?)
            .await
            .inspect_err(|e| error!("Failed to update paywall {id}: {e}"))
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        validate::required("Paywall id", id)?;
        self.http
            .execute(ApiRequest::delete(resource_path("/paywalls", id, "")))
            .await
            .inspect_err(|e| error!("Failed to delete paywall {id}: {e}"))
    }
}
