//! Two-tier custody of the bearer credential.
//!
//! The primary scope is volatile and local to one client process. The
//! recovery scope is durable and shared by every process of the same user.
//! Reconciliation rule: the recovery copy only repopulates the primary scope
//! while it is still valid, and an expired copy in either scope purges both.
//!
//! Nothing here surfaces an error. Storage and decode failures are logged and
//! treated as "no valid credential".

use crate::claims::{decode_claims, CredentialClaims};
use crate::{KeyValueStore, StorageKeys};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Custodian of zero or one credential.
pub struct TokenStore {
    primary: Box<dyn KeyValueStore>,
    recovery: Box<dyn KeyValueStore>,
}

impl TokenStore {
    /// Create a token store over the given primary and recovery scopes.
    pub fn new(primary: Box<dyn KeyValueStore>, recovery: Box<dyn KeyValueStore>) -> Self {
        Self { primary, recovery }
    }

    /// Persist `token` to the primary scope and mirror it into the recovery
    /// scope. The token is not validated.
    pub fn save(&self, token: &str) {
        if let Err(e) = self.primary.set(StorageKeys::ACCESS_TOKEN, token) {
            warn!(error = %e, "Failed to write credential to primary scope");
        }
        if let Err(e) = self.recovery.set(StorageKeys::RECOVERY_ACCESS_TOKEN, token) {
            warn!(error = %e, "Failed to write credential recovery copy");
        }
        debug!("Credential saved");
    }

    /// Return the current credential if one is present and unexpired.
    pub fn get(&self) -> Option<String> {
        self.get_at(Utc::now().timestamp())
    }

    fn get_at(&self, now: i64) -> Option<String> {
        if let Some(token) = self.read(&*self.primary, StorageKeys::ACCESS_TOKEN) {
            if is_expired_at(&token, now) {
                info!("Stored credential expired or unreadable, purging");
                self.remove();
                return None;
            }
            return Some(token);
        }

        let token = self.read(&*self.recovery, StorageKeys::RECOVERY_ACCESS_TOKEN)?;
        if is_expired_at(&token, now) {
            info!("Recovery credential expired or unreadable, purging");
            self.remove();
            return None;
        }

        debug!("Primary scope empty, restoring credential from recovery copy");
        if let Err(e) = self.primary.set(StorageKeys::ACCESS_TOKEN, &token) {
            warn!(error = %e, "Failed to restore credential into primary scope");
        }
        Some(token)
    }

    fn read(&self, scope: &dyn KeyValueStore, key: &str) -> Option<String> {
        match scope.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read credential scope");
                None
            }
        }
    }

    /// Whether `token` is expired, undecodable, or lacks an expiry claim.
    pub fn is_expired(token: &str) -> bool {
        is_expired_at(token, Utc::now().timestamp())
    }

    /// Purge the credential from both scopes. Idempotent.
    pub fn remove(&self) {
        if let Err(e) = self.primary.delete(StorageKeys::ACCESS_TOKEN) {
            warn!(error = %e, "Failed to delete credential from primary scope");
        }
        if let Err(e) = self.recovery.delete(StorageKeys::RECOVERY_ACCESS_TOKEN) {
            warn!(error = %e, "Failed to delete credential recovery copy");
        }
    }

    /// Whether a valid credential is available.
    pub fn exists(&self) -> bool {
        self.get().is_some()
    }

    /// Whole minutes until the current credential expires, or `None` when
    /// there is no valid credential.
    pub fn remaining_minutes(&self) -> Option<i64> {
        self.remaining_minutes_at(Utc::now().timestamp())
    }

    fn remaining_minutes_at(&self, now: i64) -> Option<i64> {
        let token = self.get_at(now)?;
        let claims = decode_claims(&token)?;
        Some(((claims.exp - now) / 60).max(0))
    }

    /// Claims of the current valid credential.
    pub fn claims(&self) -> Option<CredentialClaims> {
        self.get().as_deref().and_then(decode_claims)
    }
}

fn is_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Some(claims) => now >= claims.exp,
        None => true,
    }
}
