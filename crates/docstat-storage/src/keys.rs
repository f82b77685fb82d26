//! Storage key constants.

/// Storage keys used by the token store
pub struct StorageKeys;

impl StorageKeys {
    /// Credential in the primary (volatile) scope
    pub const ACCESS_TOKEN: &'static str = "access_token";

    /// Recovery copy of the credential in the durable scope
    pub const RECOVERY_ACCESS_TOKEN: &'static str = "access_token_recovery";
}
