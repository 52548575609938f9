use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::request::ApiRequest;
use crate::validate;
use paywall_types::{AuthTokens, LoginRequest, LoginResponse, MfaVerifyRequest, User};
use tracing::{error, info, warn};

/// Sign-in, MFA, refresh and sign-out.
#[derive(Debug, Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Signs in. Tokens are stored unless a second factor is required, in
    /// which case the response carries the `mfa_token` for [`Self::verify_mfa`].
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        validate::email("Email", email)?;
        validate::required("Password", password)?;

        let request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self
            .http
            .json(request)
            .await
            .inspect_err(|e| error!("Login failed: {e}"))?;

        self.store_tokens(&response)?;
        Ok(response)
    }

    pub async fn verify_mfa(&self, mfa_token: &str, code: &str) -> ApiResult<LoginResponse> {
        validate::required("MFA token", mfa_token)?;
        validate::required("Verification code", code)?;

        let request = ApiRequest::post("/auth/mfa/verify").json(&MfaVerifyRequest {
            mfa_token: mfa_token.to_string(),
            code: code.trim().to_string(),
        })?;
        let response: LoginResponse = self
            .http
            .json(request)
            .await
            .inspect_err(|e| error!("MFA verification failed: {e}"))?;

        if response.tokens.is_none() {
            return Err(ApiError::InvalidResponse(
                "MFA verification returned no tokens".into(),
            ));
        }
        self.store_tokens(&response)?;
        Ok(response)
    }

    pub async fn refresh(&self) -> ApiResult<AuthTokens> {
        self.http
            .refresh_session()
            .await
            .inspect_err(|e| error!("Token refresh failed: {e}"))
    }

    /// Tells the backend the session ended, then clears local tokens even if
    /// that call failed.
    pub async fn logout(&self) -> ApiResult<()> {
        let refresh_token = self
            .http
            .token_store()
            .load()?
            .and_then(|t| t.refresh_token);

        // An expired session must not be refreshed just to end it.
        let request = ApiRequest::post("/auth/logout")
            .json(&serde_json::json!({ "refreshToken": refresh_token }))?
            .without_refresh();
        if let Err(e) = self.http.execute(request).await {
            warn!("Logout request failed, clearing local session anyway: {e}");
        }

        self.http.token_store().clear()?;
        info!("Signed out");
        Ok(())
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.http
            .record(ApiRequest::get("/auth/me"))
            .await
            .inspect_err(|e| error!("Failed to fetch current user: {e}"))
    }

    /// True if an access token is stored. The token may still be expired.
    pub fn is_authenticated(&self) -> ApiResult<bool> {
        Ok(self.http.token_store().load()?.is_some())
    }

    fn store_tokens(&self, response: &LoginResponse) -> ApiResult<()> {
        match &response.tokens {
            Some(tokens) => {
                self.http.token_store().save(tokens)?;
                info!("Signed in");
                Ok(())
            }
            None if response.mfa_required => {
                info!("Second factor required");
                Ok(())
            }
            None => Err(ApiError::InvalidResponse(
                "login response carried no tokens".into(),
            )),
        }
    }
}
