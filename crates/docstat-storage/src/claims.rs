//! Credential claims decoding.
//!
//! A credential is `header.claims.signature`, each segment base64url encoded.
//! Only the claims segment is inspected; the signature is the backend's
//! business. Every failure decodes to `None`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims carried by a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialClaims {
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Subject (user id as issued by the backend)
    pub sub: Option<String>,
    /// Email of the owning user
    pub email: Option<String>,
    /// Role id of the owning user at issue time
    pub role_id: Option<i64>,
}

#[derive(Deserialize)]
struct RawClaims {
    exp: serde_json::Number,
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role_id: Option<i64>,
}

impl CredentialClaims {
    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Decode the claims segment of `token`.
pub fn decode_claims(token: &str) -> Option<CredentialClaims> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() || payload.is_empty() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let raw: RawClaims = serde_json::from_slice(&bytes).ok()?;

    let exp = match raw.exp.as_i64() {
        Some(exp) => exp,
        None => {
            let exp = raw.exp.as_f64()?.floor();
            if !exp.is_finite() || exp < i64::MIN as f64 || exp > i64::MAX as f64 {
                return None;
            }
            exp as i64
        }
    };

    let sub = match raw.sub {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Some(CredentialClaims {
        exp,
        sub,
        email: raw.email,
        role_id: raw.role_id,
    })
}
