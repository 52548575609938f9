//! Dashboard loading with per-widget failure isolation.
//!
//! The overview, top paywalls and traffic widgets are fetched concurrently.
//! One widget failing only marks that widget as failed. If the fetch takes
//! longer than the slow threshold, callers get an empty fallback snapshot to
//! render right away plus a handle to the fetch, which keeps running.

use crate::error::{ApiResult, ErrorMessage};
use crate::services::AnalyticsService;
use paywall_analytics::{normalize_traffic_data, to_chart_data, SeriesSummary};
use paywall_types::{AnalyticsPeriod, ChartData, TopPaywall};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

pub const DEFAULT_SLOW_AFTER: Duration = Duration::from_secs(10);
pub const TOP_PAYWALLS_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum WidgetState<T> {
    Loaded(T),
    Failed(ErrorMessage),
}

impl<T> WidgetState<T> {
    fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(e) => Self::Failed(e.to_error_message()),
        }
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorMessage> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Headline totals and the revenue chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_revenue: f64,
    pub total_sales: u64,
    pub total_views: u64,
    pub conversion_rate: f64,
    pub revenue_chart: Vec<ChartData>,
    pub revenue_summary: SeriesSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub period: AnalyticsPeriod,
    /// Set on the placeholder shown while a slow load is still pending.
    pub is_fallback: bool,
    pub overview: WidgetState<DashboardOverview>,
    pub top_paywalls: WidgetState<Vec<TopPaywall>>,
    pub traffic: WidgetState<Vec<ChartData>>,
}

impl DashboardSnapshot {
    /// Empty, fully loaded widgets.
    #[must_use]
    pub fn fallback(period: AnalyticsPeriod) -> Self {
        Self {
            period,
            is_fallback: true,
            overview: WidgetState::Loaded(DashboardOverview::default()),
            top_paywalls: WidgetState::Loaded(Vec::new()),
            traffic: WidgetState::Loaded(Vec::new()),
        }
    }

    fn failed(period: AnalyticsPeriod, error: &ErrorMessage) -> Self {
        Self {
            period,
            is_fallback: false,
            overview: WidgetState::Failed(error.clone()),
            top_paywalls: WidgetState::Failed(error.clone()),
            traffic: WidgetState::Failed(error.clone()),
        }
    }

    /// Number of widgets that failed to load.
    #[must_use]
    pub fn failed_widgets(&self) -> usize {
        [
            self.overview.is_failed(),
            self.top_paywalls.is_failed(),
            self.traffic.is_failed(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

#[derive(Debug)]
pub enum DashboardLoad {
    Ready(DashboardSnapshot),
    /// The fetch outlived the slow threshold. `pending` resolves to the real
    /// snapshot; it is never cancelled on the caller's behalf.
    Slow {
        fallback: DashboardSnapshot,
        pending: JoinHandle<DashboardSnapshot>,
    },
}

impl DashboardLoad {
    /// Waits for the real snapshot, whichever way the load went.
    pub async fn resolve(self) -> DashboardSnapshot {
        match self {
            Self::Ready(snapshot) => snapshot,
            Self::Slow { fallback, pending } => {
                let period = fallback.period;
                join_snapshot(period, pending.await)
            }
        }
    }
}

/// Loads every dashboard widget for `period`.
pub async fn load_dashboard(
    analytics: &AnalyticsService,
    period: AnalyticsPeriod,
    slow_after: Duration,
) -> DashboardLoad {
    let service = analytics.clone();
    let mut handle = tokio::spawn(async move { fetch_snapshot(&service, period).await });

    match tokio::time::timeout(slow_after, &mut handle).await {
        Ok(joined) => DashboardLoad::Ready(join_snapshot(period, joined)),
        Err(_) => {
            warn!(
                "Dashboard still loading after {}s, showing fallback",
                slow_after.as_secs_f64()
            );
            DashboardLoad::Slow {
                fallback: DashboardSnapshot::fallback(period),
                pending: handle,
            }
        }
    }
}

async fn fetch_snapshot(analytics: &AnalyticsService, period: AnalyticsPeriod) -> DashboardSnapshot {
    let (data, top, traffic) = tokio::join!(
        analytics.data(period),
        analytics.top_paywalls(TOP_PAYWALLS_LIMIT),
        analytics.traffic_sources(period),
    );

    let overview = data.map(|data| {
        let revenue_chart = to_chart_data(Some(data.revenue_data.as_slice()));
        DashboardOverview {
            total_revenue: data.total_revenue,
            total_sales: data.total_sales,
            total_views: data.total_views,
            conversion_rate: data.conversion_rate,
            revenue_summary: SeriesSummary::from_series(&revenue_chart),
            revenue_chart,
        }
    });
    let traffic = traffic.map(|sources| normalize_traffic_data(Some(&sources)));

    let snapshot = DashboardSnapshot {
        period,
        is_fallback: false,
        overview: WidgetState::from_result(overview),
        top_paywalls: WidgetState::from_result(top),
        traffic: WidgetState::from_result(traffic),
    };
    debug!(
        "Dashboard loaded for {period} ({} failed widget(s))",
        snapshot.failed_widgets()
    );
    snapshot
}

fn join_snapshot(
    period: AnalyticsPeriod,
    joined: Result<DashboardSnapshot, tokio::task::JoinError>,
) -> DashboardSnapshot {
    joined.unwrap_or_else(|e| {
        error!("Dashboard load task failed: {e}");
        DashboardSnapshot::failed(period, &ErrorMessage::new("Failed to load dashboard"))
    })
}
