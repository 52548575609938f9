use paywall_client::config::{DEFAULT_API_URL, DEFAULT_MAX_CONCURRENT_REQUESTS};
use paywall_client::{ApiError, ClientConfig, FileTokenStore, TokenStore};
use paywall_types::AuthTokens;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn defaults_without_environment() {
    let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.max_concurrent_requests, DEFAULT_MAX_CONCURRENT_REQUESTS);
    assert_eq!(config.refresh_path, "/auth/refresh");
}

#[test]
fn vite_url_wins_over_fallback() {
    let config = ClientConfig::from_lookup(lookup(&[
        ("VITE_API_URL", "https://api.example.com"),
        ("PAYWALL_API_URL", "https://other.example.com"),
    ]))
    .unwrap();
    assert_eq!(config.api_base_url, "https://api.example.com");

    let config = ClientConfig::from_lookup(lookup(&[
        ("VITE_API_URL", "  "),
        ("PAYWALL_API_URL", "https://other.example.com"),
    ]))
    .unwrap();
    assert_eq!(config.api_base_url, "https://other.example.com");
}

#[test]
fn numeric_overrides_are_parsed() {
    let config = ClientConfig::from_lookup(lookup(&[
        ("PAYWALL_REQUEST_TIMEOUT_SECS", "5"),
        ("PAYWALL_MAX_CONCURRENT_REQUESTS", "8"),
    ]))
    .unwrap();
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.max_concurrent_requests, 8);
}

#[test]
fn bad_values_are_config_errors() {
    let err = ClientConfig::from_lookup(lookup(&[("PAYWALL_REQUEST_TIMEOUT_SECS", "soon")]))
        .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));

    let err = ClientConfig::from_lookup(lookup(&[("PAYWALL_MAX_CONCURRENT_REQUESTS", "0")]))
        .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));

    let err = ClientConfig::from_lookup(lookup(&[("VITE_API_URL", "ftp://example.com")]))
        .unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[test]
fn public_paths_and_endpoints() {
    let config = ClientConfig::with_base_url("https://api.example.com/api/");
    assert!(config.is_public("/auth/login"));
    assert!(config.is_public("/auth/refresh?x=1"));
    assert!(!config.is_public("/auth/me"));
    assert!(!config.is_public("/customers"));
    assert_eq!(
        config.endpoint("/customers"),
        "https://api.example.com/api/customers"
    );
    assert_eq!(config.endpoint("paywalls"), "https://api.example.com/api/paywalls");
}

// ── File token store ────────────────────────────────────────────

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

    assert_eq!(store.load().unwrap(), None);

    let tokens = AuthTokens::new("access", Some("refresh".into()));
    store.save(&tokens).unwrap();
    assert_eq!(store.load().unwrap(), Some(tokens));

    let reopened = FileTokenStore::new(store.path());
    assert_eq!(reopened.load().unwrap().unwrap().access_token, "access");

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
}

#[test]
fn corrupt_session_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileTokenStore::new(&path).load().unwrap_err();
    assert!(matches!(err, ApiError::Storage(_)));
}

#[cfg(unix)]
#[test]
fn session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("session.json"));
    store.save(&AuthTokens::new("a", None)).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
