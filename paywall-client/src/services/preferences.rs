use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::ApiRequest;
use paywall_types::UserPreferences;
use tracing::error;

const PATH: &str = "/user/preferences";

#[derive(Debug, Clone)]
pub struct PreferencesService {
    http: HttpClient,
}

impl PreferencesService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Missing preferences come back as the defaults.
    pub async fn get(&self) -> ApiResult<UserPreferences> {
        self.http
            .json(ApiRequest::get(PATH))
            .await
            .inspect_err(|e| error!("Failed to fetch preferences: {e}"))
    }

    pub async fn update(&self, preferences: &UserPreferences) -> ApiResult<UserPreferences> {
        self.http
            .json(ApiRequest::put(PATH).json(preferences)?)
            .await
            .inspect_err(|e| error!("Failed to save preferences: {e}"))
    }
}
