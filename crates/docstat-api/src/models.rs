//! Wire types for documents and user administration.

use docstat_auth::{AccountStatus, Role};
use serde::{Deserialize, Serialize};

/// Processing status of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl DocumentStatus {
    pub const PROCESSED: &'static str = "Processed";
    pub const ERROR: &'static str = "Error";

    /// Processing has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        self.name == Self::PROCESSED || self.name == Self::ERROR
    }
}

/// A row of the document listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub user_id: i64,
    pub status_id: i64,
    pub original_filename: String,
    pub stored_filename: String,
    pub file_path: String,
    pub content_type: Option<String>,
    /// Backend timestamp, ISO 8601
    pub uploaded_at: String,
    pub status: DocumentStatus,
}

/// Acknowledgement of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: i64,
    pub filename: String,
    pub status: String,
    pub message: String,
}

/// Current processing state of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatusReport {
    pub id: i64,
    pub filename: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub result_csv_url: Option<String>,
    #[serde(default)]
    pub result_mask_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Result artifact of a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Measurements table
    Csv,
    /// Segmentation mask image
    Mask,
    /// Zip archive holding every artifact
    All,
}

impl ResultKind {
    /// Last segment of the download endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Csv => "csv",
            ResultKind::Mask => "mask",
            ResultKind::All => "all",
        }
    }

    /// Local file name for the artifact of `original_filename`.
    pub fn file_name(&self, original_filename: &str) -> String {
        let stem = match original_filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => original_filename,
        };
        let suffix = match self {
            ResultKind::Csv => "_results.csv",
            ResultKind::Mask => "_mask.png",
            ResultKind::All => "_results.zip",
        };
        format!("{}{}", stem, suffix)
    }
}

/// A user as listed by the administration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "role_id")]
    pub role: Role,
    #[serde(rename = "status_id")]
    pub status: AccountStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    pub users: Vec<UserRecord>,
}
