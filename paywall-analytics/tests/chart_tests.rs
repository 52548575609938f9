use paywall_analytics::{
    chart_from_json, combine_chart_data, detect_revenue_kind, growth_rate, normalize_traffic_data,
    series_average, series_total, to_chart_data, to_revenue_records, ChartData, RevenueKind,
    RevenueRecord, SeriesSummary, UNKNOWN_LABEL,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn values(v: Value) -> Vec<Value> {
    v.as_array().cloned().unwrap()
}

// ── to_chart_data ───────────────────────────────────────────────

#[test]
fn empty_series_yields_empty_chart() {
    assert!(to_chart_data(Some(&[])).is_empty());
}

#[test]
fn missing_series_yields_empty_chart() {
    assert!(to_chart_data(None).is_empty());
    assert!(chart_from_json(&Value::Null).is_empty());
    assert!(chart_from_json(&json!({"not": "an array"})).is_empty());
}

#[test]
fn daily_branch_selected_by_date_key() {
    let records = values(json!([{"date": "2024-01-01", "revenue": 100}]));
    assert_eq!(
        to_chart_data(Some(&records)),
        vec![ChartData::new("2024-01-01", 100.0)]
    );
    assert_eq!(detect_revenue_kind(&records), Some(RevenueKind::Daily));
}

#[test]
fn monthly_branch_selected_without_date_key() {
    let records = values(json!([{"month": "Jan", "revenue": 50}]));
    assert_eq!(to_chart_data(Some(&records)), vec![ChartData::new("Jan", 50.0)]);
    assert_eq!(detect_revenue_kind(&records), Some(RevenueKind::Monthly));
}

#[test]
fn first_element_decides_the_whole_series() {
    let records = values(json!([
        {"date": "2024-01-01", "revenue": 10},
        {"month": "Feb", "revenue": 20}
    ]));
    let chart = to_chart_data(Some(&records));
    assert_eq!(
        chart,
        vec![
            ChartData::new("2024-01-01", 10.0),
            ChartData::new(UNKNOWN_LABEL, 20.0)
        ]
    );
}

#[test]
fn missing_fields_default_to_unknown_and_zero() {
    let records = values(json!([{"date": "2024-01-02"}, {"date": null, "revenue": 5}]));
    assert_eq!(
        to_chart_data(Some(&records)),
        vec![
            ChartData::new("2024-01-02", 0.0),
            ChartData::new(UNKNOWN_LABEL, 5.0)
        ]
    );
}

#[test]
fn neither_key_present_is_monthly_unknown() {
    let records = values(json!([{"revenue": 7}, 42, null]));
    assert_eq!(
        to_chart_data(Some(&records)),
        vec![
            ChartData::new(UNKNOWN_LABEL, 7.0),
            ChartData::new(UNKNOWN_LABEL, 0.0),
            ChartData::new(UNKNOWN_LABEL, 0.0)
        ]
    );
}

#[test]
fn revenue_records_are_explicitly_tagged() {
    let records = values(json!([{"month": "Mar", "revenue": "12.5"}]));
    assert_eq!(
        to_revenue_records(Some(&records)),
        vec![RevenueRecord::Monthly {
            month: "Mar".into(),
            revenue: 12.5
        }]
    );
}

#[test]
fn chart_from_json_accepts_arrays() {
    let chart = chart_from_json(&json!([{"date": "2024-02-01", "revenue": 1.5}]));
    assert_eq!(chart, vec![ChartData::new("2024-02-01", 1.5)]);
}

// ── normalize_traffic_data ──────────────────────────────────────

#[test]
fn traffic_sources_keep_insertion_order() {
    let sources = json!({"Direct": 10, "Email": 5});
    let chart = normalize_traffic_data(sources.as_object());
    assert_eq!(
        chart,
        vec![ChartData::new("Direct", 10.0), ChartData::new("Email", 5.0)]
    );
}

#[test]
fn traffic_sources_order_is_not_alphabetical() {
    let sources = json!({"Social": 1, "Direct": 2, "Affiliate": 3});
    let names: Vec<String> = normalize_traffic_data(sources.as_object())
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Social", "Direct", "Affiliate"]);
}

#[test]
fn traffic_non_numeric_values_become_zero() {
    let sources = json!({"Direct": "n/a", "Email": null, "Ads": "4"});
    let chart = normalize_traffic_data(sources.as_object());
    assert_eq!(
        chart,
        vec![
            ChartData::new("Direct", 0.0),
            ChartData::new("Email", 0.0),
            ChartData::new("Ads", 4.0)
        ]
    );
}

#[test]
fn traffic_missing_map_is_empty() {
    assert!(normalize_traffic_data(None).is_empty());
}

// ── combine_chart_data ──────────────────────────────────────────

#[test]
fn combine_sums_shared_names() {
    let a = vec![ChartData::new("X", 2.0)];
    let b = vec![ChartData::new("X", 3.0)];
    assert_eq!(
        combine_chart_data([a.as_slice(), b.as_slice()]),
        vec![ChartData::new("X", 5.0)]
    );
}

#[test]
fn combine_preserves_first_appearance_order() {
    let a = vec![ChartData::new("Jan", 1.0), ChartData::new("Feb", 2.0)];
    let b = vec![
        ChartData::new("Mar", 4.0),
        ChartData::new("Jan", 10.0),
        ChartData::new("Feb", 20.0),
    ];
    assert_eq!(
        combine_chart_data([a.as_slice(), b.as_slice()]),
        vec![
            ChartData::new("Jan", 11.0),
            ChartData::new("Feb", 22.0),
            ChartData::new("Mar", 4.0)
        ]
    );
}

#[test]
fn combine_of_nothing_is_empty() {
    let none: Vec<&[ChartData]> = Vec::new();
    assert!(combine_chart_data(none).is_empty());
}

// ── Summaries ───────────────────────────────────────────────────

#[test]
fn totals_and_averages() {
    let series = vec![ChartData::new("a", 1.0), ChartData::new("b", 3.0)];
    assert_eq!(series_total(&series), 4.0);
    assert_eq!(series_average(&series), Some(2.0));
    assert_eq!(series_average(&[]), None);
}

#[test]
fn growth_rate_handles_zero_baseline() {
    assert_eq!(growth_rate(150.0, 100.0), Some(50.0));
    assert_eq!(growth_rate(50.0, 100.0), Some(-50.0));
    assert_eq!(growth_rate(10.0, 0.0), None);
}

#[test]
fn summary_picks_earliest_peak() {
    let series = vec![
        ChartData::new("a", 5.0),
        ChartData::new("b", 9.0),
        ChartData::new("c", 9.0),
    ];
    let summary = SeriesSummary::from_series(&series);
    assert_eq!(summary.points, 3);
    assert_eq!(summary.total, 23.0);
    assert_eq!(summary.peak, Some(ChartData::new("b", 9.0)));
}

#[test]
fn summary_of_empty_series() {
    let summary = SeriesSummary::from_series(&[]);
    assert_eq!(summary, SeriesSummary::default());
}
