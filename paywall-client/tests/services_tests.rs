use chrono::NaiveDate;
use paywall_client::{
    save_export, ApiError, ClientConfig, ExportResource, MemoryTokenStore, NoopSessionObserver,
    PaywallApi, TokenStore,
};
use paywall_types::{
    AccessRequest, AnalyticsPeriod, AuthTokens, BulkCommunicationRequest, ChartData,
    CommunicationType, CreatePaywallRequest, CreateTicketRequest, CustomerFilters,
    CustomerStatus, PaywallContentType, SendCommunicationRequest, SocialPlatform, Theme,
    TicketPriority, TicketStatus, TrackShareRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, PaywallApi, Arc<MemoryTokenStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens(AuthTokens::new(
        "access",
        Some("refresh".into()),
    )));
    let api = PaywallApi::connect(
        ClientConfig::with_base_url(server.uri()),
        store.clone(),
        Arc::new(NoopSessionObserver),
    )
    .unwrap();
    (server, api, store)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn customer_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Ann Lee",
        "email": "ann@example.com",
        "totalSpent": 120.5,
        "totalPurchases": 3,
        "lastPurchase": "2024-02-01T10:00:00Z",
        "joinDate": "2023-06-15T08:30:00Z",
        "status": "active"
    })
}

async fn assert_nothing_sent(server: &MockServer) {
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Customers ───────────────────────────────────────────────────

#[tokio::test]
async fn customer_filters_become_query_parameters() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("status", "active"))
        .and(query_param("search", "ann"))
        .and(query_param("page", "2"))
        .respond_with(ok(json!([customer_json("c1")])))
        .expect(1)
        .mount(&server)
        .await;

    let customers = api
        .customers()
        .list(&CustomerFilters {
            status: Some(CustomerStatus::Active),
            search: Some("  ann ".into()),
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].total_purchases, 3);
    assert_eq!(customers[0].status, CustomerStatus::Active);
}

#[tokio::test]
async fn customer_ids_are_path_encoded() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/customers/a%20b"))
        .respond_with(ok(customer_json("a b")))
        .expect(1)
        .mount(&server)
        .await;

    let customer = api.customers().get("a b").await.unwrap();
    assert_eq!(customer.id, "a b");
}

#[tokio::test]
async fn missing_customer_record_is_an_error() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/customers/c9"))
        .respond_with(ok(serde_json::Value::Null))
        .mount(&server)
        .await;

    let err = api.customers().get("c9").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn customer_export_saves_csv() {
    let (server, api, _) = setup().await;
    let csv = "id,name\nc1,Ann Lee\n";
    Mock::given(method("GET"))
        .and(path("/customers/export"))
        .and(query_param("status", "inactive"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = api
        .customers()
        .export(&CustomerFilters {
            status: Some(CustomerStatus::Inactive),
            ..Default::default()
        })
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let saved = save_export(
        &bytes,
        &dir.path().join("exports"),
        ExportResource::Customers.file_prefix(),
        date,
    )
    .await
    .unwrap();

    assert_eq!(
        saved.file_name().unwrap().to_str().unwrap(),
        "customers-export-2024-05-01.csv"
    );
    assert_eq!(std::fs::read_to_string(saved).unwrap(), csv);
}

// ── Validation ──────────────────────────────────────────────────

#[tokio::test]
async fn login_requires_email_and_password() {
    let (server, api, _) = setup().await;
    let err = api.auth().login("", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    let err = api.auth().login("a@b.co", "").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ref m) if m == "Password is required"));
    assert_nothing_sent(&server).await;
}

#[tokio::test]
async fn communication_needs_subject_message_and_recipients() {
    let (server, api, _) = setup().await;
    let comms = api.communications();
    let base = SendCommunicationRequest {
        kind: CommunicationType::Email,
        subject: "Launch".into(),
        message: "Hello".into(),
        recipients: vec!["a@b.co".into()],
        scheduled_at: None,
    };

    let no_subject = SendCommunicationRequest {
        subject: " ".into(),
        ..base.clone()
    };
    assert!(matches!(comms.send(&no_subject).await, Err(ApiError::Validation(_))));

    let no_recipients = SendCommunicationRequest {
        recipients: vec![],
        ..base.clone()
    };
    assert!(matches!(comms.send(&no_recipients).await, Err(ApiError::Validation(_))));

    let bulk = BulkCommunicationRequest {
        kind: CommunicationType::Sms,
        subject: "Sale".into(),
        message: "20% off".into(),
        segment_id: None,
        recipients: vec![],
    };
    assert!(matches!(comms.send_bulk(&bulk).await, Err(ApiError::Validation(_))));

    assert_nothing_sent(&server).await;
}

#[tokio::test]
async fn ticket_and_access_and_paywall_validation() {
    let (server, api, _) = setup().await;

    let ticket = CreateTicketRequest {
        subject: "Refund".into(),
        description: "".into(),
        priority: TicketPriority::High,
        category: None,
    };
    assert!(matches!(
        api.support().create_ticket(&ticket).await,
        Err(ApiError::Validation(_))
    ));

    let access = AccessRequest {
        paywall_id: "p1".into(),
        email: "not-an-email".into(),
        payment_method_id: None,
    };
    assert!(matches!(
        api.access().request_access(&access).await,
        Err(ApiError::Validation(_))
    ));

    let paywall = CreatePaywallRequest {
        title: "Course".into(),
        description: None,
        price: -5.0,
        currency: "USD".into(),
        content_type: PaywallContentType::Url,
        content: "https://example.com/course".into(),
    };
    assert!(matches!(
        api.paywalls().create(&paywall).await,
        Err(ApiError::Validation(_))
    ));

    assert_nothing_sent(&server).await;
}

// ── Communications and support ──────────────────────────────────

#[tokio::test]
async fn bulk_send_to_segment() {
    let (server, api, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/communications/bulk"))
        .and(body_partial_json(json!({ "type": "email", "segmentId": "vip" })))
        .respond_with(ok(json!({ "queued": 42, "failed": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = api
        .communications()
        .send_bulk(&BulkCommunicationRequest {
            kind: CommunicationType::Email,
            subject: "News".into(),
            message: "Body".into(),
            segment_id: Some("vip".into()),
            recipients: vec![],
        })
        .await
        .unwrap();
    assert_eq!(summary.queued, 42);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn close_ticket_puts_closed_status() {
    let (server, api, _) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/support/tickets/t1"))
        .and(body_partial_json(json!({ "status": "closed" })))
        .respond_with(ok(json!({
            "id": "t1",
            "subject": "Refund",
            "description": "Please refund",
            "status": "closed",
            "priority": "urgent",
            "category": null,
            "customerEmail": "ann@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = api.support().close_ticket("t1").await.unwrap();
    assert_eq!(ticket.status, TicketStatus::Closed);
    assert!(!ticket.status.is_open());
    assert_eq!(ticket.priority, TicketPriority::Urgent);
    assert!(ticket.replies.is_empty());
}

#[tokio::test]
async fn reply_posts_to_ticket_replies() {
    let (server, api, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/support/tickets/t1/replies"))
        .and(body_partial_json(json!({ "message": "On it" })))
        .respond_with(ok(json!({
            "id": "r1",
            "message": "On it",
            "author": "Support",
            "isStaff": true,
            "createdAt": "2024-01-02T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = api.support().reply("t1", "On it").await.unwrap();
    assert!(reply.is_staff);
}

// ── Analytics ───────────────────────────────────────────────────

#[tokio::test]
async fn revenue_chart_shapes_daily_records() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/analytics/data"))
        .and(query_param("period", "7d"))
        .respond_with(ok(json!({
            "totalRevenue": 30.0,
            "totalSales": 3,
            "totalViews": 90,
            "conversionRate": 3.3,
            "revenueData": [
                { "date": "2024-03-01", "revenue": 10 },
                { "date": "2024-03-02", "revenue": "20" }
            ],
            "trafficSources": { "direct": 50, "twitter": 40 }
        })))
        .mount(&server)
        .await;

    let chart = api
        .analytics()
        .revenue_chart(AnalyticsPeriod::Week)
        .await
        .unwrap();
    assert_eq!(
        chart,
        vec![
            ChartData::new("2024-03-01", 10.0),
            ChartData::new("2024-03-02", 20.0),
        ]
    );
}

#[tokio::test]
async fn traffic_chart_keeps_backend_order() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/analytics/traffic-sources"))
        .respond_with(ok(json!({ "search": 5, "direct": 12, "email": "bad" })))
        .mount(&server)
        .await;

    let chart = api
        .analytics()
        .traffic_chart(AnalyticsPeriod::Month)
        .await
        .unwrap();
    let names: Vec<&str> = chart.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["search", "direct", "email"]);
    assert_eq!(chart[2].value, 0.0);
}

#[tokio::test]
async fn creator_revenue_handles_monthly_records() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/analytics/creator/u1/revenue"))
        .and(query_param("period", "1y"))
        .respond_with(ok(json!([
            { "month": "Jan", "revenue": 100 },
            { "month": "Feb" }
        ])))
        .mount(&server)
        .await;

    let chart = api
        .analytics()
        .creator_revenue("u1", AnalyticsPeriod::Year)
        .await
        .unwrap();
    assert_eq!(chart, vec![ChartData::new("Jan", 100.0), ChartData::new("Feb", 0.0)]);
}

#[tokio::test]
async fn top_paywalls_sends_limit() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/analytics/top-paywalls"))
        .and(query_param("limit", "3"))
        .respond_with(ok(json!([
            { "id": "p1", "title": "Course", "revenue": 500.0, "sales": 10 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let top = api.analytics().top_paywalls(3).await.unwrap();
    assert_eq!(top[0].title, "Course");
}

// ── Best-effort tracking ────────────────────────────────────────

#[tokio::test]
async fn share_tracking_swallows_failures() {
    let (server, api, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/social-shares/track"))
        .and(body_partial_json(json!({ "paywallId": "p1", "platform": "twitter" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    api.social_shares()
        .track_share(&TrackShareRequest {
            paywall_id: "p1".into(),
            platform: SocialPlatform::Twitter,
            referrer: None,
        })
        .await;
}

#[tokio::test]
async fn view_tracking_swallows_failures() {
    let (server, api, _) = setup().await;
    Mock::given(method("POST"))
        .and(path("/content/c1/view"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    api.content().track_view("c1").await;
}

// ── Auth flows ──────────────────────────────────────────────────

#[tokio::test]
async fn mfa_login_stores_tokens_only_after_verification() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::new());
    let api = PaywallApi::connect(
        ClientConfig::with_base_url(server.uri()),
        store.clone(),
        Arc::new(NoopSessionObserver),
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ok(json!({ "mfaRequired": true, "mfaToken": "mfa-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/mfa/verify"))
        .and(body_partial_json(json!({ "mfaToken": "mfa-1", "code": "123456" })))
        .respond_with(ok(json!({
            "user": { "id": "u1", "email": "a@b.co", "mfaEnabled": true },
            "accessToken": "a1",
            "refreshToken": "r1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = api.auth();
    let first = auth.login("a@b.co", "pw").await.unwrap();
    assert!(first.mfa_required);
    assert!(!auth.is_authenticated().unwrap());

    let verified = auth
        .verify_mfa(first.mfa_token.as_deref().unwrap(), "123456")
        .await
        .unwrap();
    assert!(verified.user.unwrap().mfa_enabled);
    assert!(auth.is_authenticated().unwrap());
    assert_eq!(store.load().unwrap().unwrap().access_token, "a1");
}

#[tokio::test]
async fn invalid_credentials_are_not_treated_as_expired_session() {
    let server = MockServer::start().await;
    let api = PaywallApi::connect(
        ClientConfig::with_base_url(server.uri()),
        Arc::new(MemoryTokenStore::new()),
        Arc::new(NoopSessionObserver),
    )
    .unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })))
        .mount(&server)
        .await;

    let err = api.auth().login("a@b.co", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, ref message } if message == "Invalid credentials"));
}

#[tokio::test]
async fn logout_clears_tokens_even_when_backend_fails() {
    let (server, api, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    api.auth().logout().await.unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_with_expired_token_does_not_refresh_or_expire_session() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens(AuthTokens::new(
        "stale",
        Some("refresh".into()),
    )));
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = expired.clone();
    let api = PaywallApi::connect(
        ClientConfig::with_base_url(server.uri()),
        store.clone(),
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expired" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    api.auth().logout().await.unwrap();
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(expired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn explicit_refresh_rotates_tokens() {
    let (server, api, store) = setup().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_partial_json(json!({ "refreshToken": "refresh" })))
        .respond_with(ok(json!({ "accessToken": "a2", "refreshToken": "r2" })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = api.auth().refresh().await.unwrap();
    assert_eq!(tokens, AuthTokens::new("a2", Some("r2".into())));
    assert_eq!(store.load().unwrap(), Some(tokens));
}

// ── Preferences ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_preferences_fall_back_to_defaults() {
    let (server, api, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/user/preferences"))
        .respond_with(ok(serde_json::Value::Null))
        .mount(&server)
        .await;

    let prefs = api.preferences().get().await.unwrap();
    assert_eq!(prefs.currency, "USD");
    assert_eq!(prefs.theme, Theme::System);
}
