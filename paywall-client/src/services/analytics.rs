use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_analytics::{normalize_traffic_data, to_chart_data};
use paywall_types::{
    AnalyticsData, AnalyticsPeriod, ChartData, CreatorStats, TopPaywall, TrafficSources,
};
use serde_json::Value;
use tracing::error;

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    http: HttpClient,
}

impl AnalyticsService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn data(&self, period: AnalyticsPeriod) -> ApiResult<AnalyticsData> {
        let request = ApiRequest::get("/analytics/data").query("period", period);
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch analytics: {e}"))
    }

    pub async fn top_paywalls(&self, limit: u32) -> ApiResult<Vec<TopPaywall>> {
        let request = ApiRequest::get("/analytics/top-paywalls").query("limit", limit);
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch top paywalls: {e}"))
    }

    pub async fn traffic_sources(&self, period: AnalyticsPeriod) -> ApiResult<TrafficSources> {
        let request = ApiRequest::get("/analytics/traffic-sources").query("period", period);
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch traffic sources: {e}"))
    }

    /// Revenue series for the period, shaped for a chart.
    pub async fn revenue_chart(&self, period: AnalyticsPeriod) -> ApiResult<Vec<ChartData>> {
        let data = self.data(period).await?;
        Ok(to_chart_data(Some(data.revenue_data.as_slice())))
    }

    pub async fn traffic_chart(&self, period: AnalyticsPeriod) -> ApiResult<Vec<ChartData>> {
        let sources = self.traffic_sources(period).await?;
        Ok(normalize_traffic_data(Some(&sources)))
    }

    pub async fn creator_stats(&self, creator_id: &str) -> ApiResult<CreatorStats> {
        validate::required("Creator id", creator_id)?;
        let request = ApiRequest::get(resource_path("/analytics/creator", creator_id, "/stats"));
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch stats for creator {creator_id}: {e}"))
    }

    pub async fn creator_revenue(
        &self,
        creator_id: &str,
        period: AnalyticsPeriod,
    ) -> ApiResult<Vec<ChartData>> {
        validate::required("Creator id", creator_id)?;
        let request = ApiRequest::get(resource_path("/analytics/creator", creator_id, "/revenue"))
            .query("period", period);
        let records: Vec<Value> = self
            .http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch revenue for creator {creator_id}: {e}"))?;
        Ok(to_chart_data(Some(records.as_slice())))
    }
}
