//! Request gate for protected backend calls.
//!
//! Every protected call goes through [`RequestGate::send`], which stamps the
//! current credential and treats any 401 as "the credential is no longer good
//! for anything": the session is force-reset and the caller gets
//! [`AuthError::Unauthorized`]. Every other status passes through.

use crate::client::extract_detail;
use crate::session::SessionController;
use crate::{AuthError, AuthResult};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Notice shown when the backend rejects the held credential.
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

/// Credential-stamping HTTP wrapper shared by all protected resource clients.
#[derive(Clone)]
pub struct RequestGate {
    http_client: Client,
    base_url: String,
    session: Arc<SessionController>,
}

impl RequestGate {
    pub fn new(base_url: &str, session: Arc<SessionController>) -> AuthResult<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            http_client: session.client().http_client().clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Gate rooted at the same base URL as the session's auth client.
    pub fn for_session(session: Arc<SessionController>) -> Self {
        Self {
            http_client: session.client().http_client().clone(),
            base_url: session.client().base_url().to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request to `path`, letting `customize` add a body or headers.
    ///
    /// Returns the raw response for every status except 401.
    pub async fn send<F>(&self, method: Method, path: &str, customize: F) -> AuthResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(path);
        let mut request = self.http_client.request(method.clone(), &url);

        match self.session.token_store().get() {
            Some(token) => request = request.bearer_auth(token),
            None => debug!(path = %path, "No credential held, sending unauthenticated"),
        }

        let response = customize(request).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(method = %method, path = %path, "Protected call rejected with 401");
            self.session.force_logout(SESSION_EXPIRED_NOTICE);
            return Err(AuthError::Unauthorized);
        }

        debug!(method = %method, path = %path, status = %response.status(), "Protected call completed");
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AuthResult<T> {
        let response = self.send(Method::GET, path, |req| req).await?;
        read_json(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> AuthResult<T> {
        let response = self
            .send(Method::POST, path, move |req| req.multipart(form))
            .await?;
        read_json(response).await
    }

    /// Fetch a binary payload such as a result file.
    pub async fn get_bytes(&self, path: &str) -> AuthResult<Vec<u8>> {
        let response = ensure_success(self.send(Method::GET, path, |req| req).await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn ensure_success(response: Response) -> AuthResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body, status);
    warn!(status = %status, detail = %detail, "Protected call failed");
    Err(AuthError::Api {
        status: status.as_u16(),
        detail,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> AuthResult<T> {
    Ok(ensure_success(response).await?.json().await?)
}
