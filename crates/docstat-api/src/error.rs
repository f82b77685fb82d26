//! Resource client error types.

use docstat_auth::AuthError;
use thiserror::Error;

/// Error type for protected resource calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport, session or unexpected backend failure
    #[error(transparent)]
    Auth(AuthError),

    /// Backend answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected before dispatch, or by the backend with 400/422
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api { status: 404, detail } => ApiError::NotFound(detail),
            AuthError::Api {
                status: 400 | 422,
                detail,
            } => ApiError::InvalidInput(detail),
            other => ApiError::Auth(other),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Auth(AuthError::Http(err))
    }
}

impl ApiError {
    /// The session was reset because the backend rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Auth(AuthError::Unauthorized))
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = AuthError::Api {
            status: 404,
            detail: "Document not found".to_string(),
        }
        .into();
        assert!(matches!(not_found, ApiError::NotFound(ref d) if d == "Document not found"));

        let invalid: ApiError = AuthError::Api {
            status: 422,
            detail: "field required".to_string(),
        }
        .into();
        assert!(matches!(invalid, ApiError::InvalidInput(_)));

        let server: ApiError = AuthError::Api {
            status: 500,
            detail: "boom".to_string(),
        }
        .into();
        assert!(matches!(server, ApiError::Auth(AuthError::Api { status: 500, .. })));
    }

    #[test]
    fn test_unauthorized_is_flagged() {
        let err: ApiError = AuthError::Unauthorized.into();
        assert!(err.is_unauthorized());
        assert!(!ApiError::NotFound("x".to_string()).is_unauthorized());
    }
}
