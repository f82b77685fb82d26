//! REST client for the backend's `/auth` endpoints.
//!
//! These calls do not pass through the [`RequestGate`](crate::RequestGate):
//! a rejected login or a stale token at startup is an expected outcome, not a
//! reason to force a logout.

use crate::models::{LoginForm, LoginResponse, UserProfile};
use crate::{AuthError, AuthResult};
use reqwest::{Client, Response, StatusCode};
use url::Url;

/// Client for `/auth/token` and `/auth/me`.
#[derive(Clone)]
pub struct AuthClient {
    http_client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str) -> AuthResult<Self> {
        Self::with_http_client(base_url, Client::new())
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http_client(base_url: &str, http_client: Client) -> AuthResult<Self> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuthError::Config(format!(
                "Unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange email and password for a credential.
    pub async fn request_token(&self, email: &str, password: &str) -> AuthResult<LoginResponse> {
        let url = self.endpoint("/auth/token");
        tracing::debug!(url = %url, email = %email, "Requesting access token");

        let response = self
            .http_client
            .post(&url)
            .form(&LoginForm::new(email, password))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Login failed").await);
        }

        let login: LoginResponse = response.json().await?;
        tracing::debug!(user_id = login.user.id, "Access token issued");
        Ok(login)
    }

    /// Fetch the profile of the user owning `access_token`.
    pub async fn fetch_profile(&self, access_token: &str) -> AuthResult<UserProfile> {
        let url = self.endpoint("/auth/me");
        tracing::debug!(url = %url, "Fetching current user profile");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Profile fetch failed").await);
        }

        Ok(response.json().await?)
    }
}

/// Map a non-success `/auth` response onto an [`AuthError`].
async fn error_from_response(response: Response, context: &str) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body, status);
    tracing::warn!(status = %status, detail = %detail, "{}", context);

    match status {
        StatusCode::UNAUTHORIZED => AuthError::InvalidCredentials(detail),
        StatusCode::FORBIDDEN => AuthError::AccountInactive(detail),
        _ => AuthError::Api {
            status: status.as_u16(),
            detail,
        },
    }
}

/// Human-readable detail of an error body.
///
/// FastAPI wraps errors as `{"detail": ...}` where the value is a string or a
/// list of validation errors. Anything else falls back to the raw body, then
/// to the status reason.
pub(crate) fn extract_detail(body: &str, status: StatusCode) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
