//! Credential custody for docstat clients.
//!
//! This crate provides:
//! - A key/value storage abstraction with a volatile in-process scope and a
//!   durable file-backed scope
//! - Decoding of the claims segment of bearer credentials
//! - [`TokenStore`], the two-tier custodian of the current credential

mod claims;
mod file;
mod keys;
mod memory;
mod token_store;
mod traits;

pub use claims::{decode_claims, CredentialClaims};
pub use file::FileStore;
pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use token_store::TokenStore;
pub use traits::KeyValueStore;

use std::path::Path;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Platform storage error: {0}")]
    Platform(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default token store: a fresh volatile primary scope backed by a
/// durable recovery file at `recovery_path`.
pub fn create_token_store(recovery_path: &Path) -> TokenStore {
    TokenStore::new(
        Box::new(MemoryStore::new()),
        Box::new(FileStore::new(recovery_path)),
    )
}
