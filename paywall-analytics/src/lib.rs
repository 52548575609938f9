//! Analytics helpers for the paywall dashboard.
//!
//! Two independent groups of pure, synchronous functions:
//!
//! - **Chart shaping**: converts heterogeneous backend payloads (daily or
//!   monthly revenue arrays, traffic-source maps, several series at once)
//!   into the single [`ChartData`] shape every visualization consumes.
//! - **Formatting**: locale-aware currency, number, percentage and date
//!   rendering with a symbol-table fallback for unknown currencies.
//!
//! None of these functions panic or perform I/O. Given identical input they
//! return identical output.
//!
//! # Example
//!
//! ```
//! use paywall_analytics::{format_currency, to_chart_data};
//! use serde_json::json;
//!
//! let records = vec![json!({"date": "2024-01-01", "revenue": 100})];
//! let series = to_chart_data(Some(&records[..]));
//! assert_eq!(series[0].name, "2024-01-01");
//! assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
//! ```

mod chart;
mod error;
mod format;
mod summary;

pub use chart::{
    chart_from_json, combine_chart_data, detect_revenue_kind, normalize_traffic_data,
    revenue_records_to_chart, to_chart_data, to_revenue_records, UNKNOWN_LABEL,
};
pub use error::{FormatError, FormatResult};
pub use format::{
    format_compact, format_currency, format_currency_in, format_date, format_datetime,
    format_number, format_percentage, try_format_currency, Currency, Locale,
};
pub use summary::{growth_rate, series_average, series_total, SeriesSummary};

pub use paywall_types::{ChartData, RevenueKind, RevenueRecord};
