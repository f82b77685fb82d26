//! Document upload and status endpoints.

use crate::models::{Document, DocumentStatusReport, ResultKind, UploadReceipt};
use crate::{ApiError, ApiResult};
use docstat_auth::{AuthError, RequestGate};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};

/// Client for `/documents`.
#[derive(Clone)]
pub struct DocumentsClient {
    gate: RequestGate,
}

impl DocumentsClient {
    pub fn new(gate: RequestGate) -> Self {
        Self { gate }
    }

    /// Documents of the signed-in user, newest first.
    pub async fn list(&self) -> ApiResult<Vec<Document>> {
        let documents: Vec<Document> = self.gate.get_json("/documents").await?;
        debug!(count = documents.len(), "Fetched documents");
        Ok(documents)
    }

    /// Upload a document for processing.
    pub async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> ApiResult<UploadReceipt> {
        if filename.trim().is_empty() {
            return Err(ApiError::InvalidInput("filename must not be empty".to_string()));
        }

        let size = bytes.len();
        let mut part = Part::bytes(bytes).file_name(filename.to_string());
        if let Some(content_type) = content_type {
            part = part
                .mime_str(content_type)
                .map_err(|_| ApiError::InvalidInput(format!("invalid content type: {}", content_type)))?;
        }

        let form = Form::new().part("file", part);
        let receipt: UploadReceipt = self.gate.post_multipart("/documents/upload", form).await?;

        info!(document_id = receipt.id, filename = %filename, size, "Document uploaded");
        Ok(receipt)
    }

    /// Upload a file from disk, named after its final path component.
    pub async fn upload_file(&self, path: &Path) -> ApiResult<UploadReceipt> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ApiError::InvalidInput(format!("not a file path: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        self.upload(&filename, bytes, guess_content_type(path)).await
    }

    /// Current processing status of one document.
    pub async fn status(&self, id: i64) -> ApiResult<DocumentStatusReport> {
        let report: DocumentStatusReport = self.gate.get_json(&format!("/documents/{}", id)).await?;
        debug!(document_id = id, status = %report.status.name, "Fetched document status");
        Ok(report)
    }

    /// Download a result artifact of a processed document.
    ///
    /// Refused before dispatch when no credential is held.
    pub async fn download(&self, id: i64, kind: ResultKind) -> ApiResult<Vec<u8>> {
        if !self.gate.session().token_store().exists() {
            return Err(AuthError::NotLoggedIn.into());
        }

        let bytes = self
            .gate
            .get_bytes(&format!("/documents/{}/download/{}", id, kind.as_str()))
            .await?;
        info!(document_id = id, kind = kind.as_str(), size = bytes.len(), "Result downloaded");
        Ok(bytes)
    }
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "tif" | "tiff" => Some("image/tiff"),
        "bmp" => Some("image/bmp"),
        "pdf" => Some("application/pdf"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}
