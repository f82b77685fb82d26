//! Authentication error types.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Backend rejected the email/password pair
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Credentials were right but the account may not sign in
    #[error("Account inactive: {0}")]
    AccountInactive(String),

    /// A protected call was rejected with 401; the session has been reset
    #[error("Unauthorized: session has been reset")]
    Unauthorized,

    /// No valid credential is held
    #[error("Not logged in")]
    NotLoggedIn,

    /// Any other non-success response
    #[error("API error (HTTP {status}): {detail}")]
    Api { status: u16, detail: String },

    /// Invalid state transition in the session FSM
    #[error("Invalid session state transition: {0}")]
    InvalidStateTransition(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login succeeded but the issued credential is expired or undecodable
    #[error("Backend issued an unusable credential")]
    UnusableCredential,

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Returns true if this error is transient and the operation can be retried.
    ///
    /// Transient errors include:
    /// - Connection failures and timeouts
    /// - HTTP 5xx responses
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Http(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                if let Some(status) = e.status() {
                    return status.is_server_error();
                }
                false
            }
            AuthError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient_server_error() {
        let err = AuthError::Api {
            status: 503,
            detail: "unavailable".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_is_not_transient_client_error() {
        let err = AuthError::Api {
            status: 404,
            detail: "Document not found".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_is_not_transient_invalid_credentials() {
        assert!(!AuthError::InvalidCredentials("bad password".to_string()).is_transient());
    }

    #[test]
    fn test_is_not_transient_unauthorized() {
        assert!(!AuthError::Unauthorized.is_transient());
    }

    #[test]
    fn test_api_error_display() {
        let err = AuthError::Api {
            status: 422,
            detail: "field required".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 422): field required");
    }
}
