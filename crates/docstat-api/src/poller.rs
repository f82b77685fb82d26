//! Document status polling loop.
//!
//! The loop has no cancellation handle of its own. It ends when the document
//! reaches a terminal status or when a single poll fails; failures are not
//! retried.

use crate::documents::DocumentsClient;
use crate::models::DocumentStatusReport;
use crate::ApiResult;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Polls one document until processing finishes.
#[derive(Clone)]
pub struct StatusPoller {
    documents: DocumentsClient,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(documents: DocumentsClient) -> Self {
        Self::with_interval(documents, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(documents: DocumentsClient, interval: Duration) -> Self {
        Self {
            documents,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll document `id` every interval, reporting each observation to
    /// `on_update`. Returns the first terminal report.
    pub async fn watch<F>(&self, id: i64, mut on_update: F) -> ApiResult<DocumentStatusReport>
    where
        F: FnMut(&DocumentStatusReport),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first poll waits one interval.
        ticker.tick().await;

        let mut polls = 0u32;
        loop {
            ticker.tick().await;
            polls += 1;

            let report = match self.documents.status(id).await {
                Ok(report) => report,
                Err(e) => {
                    warn!(document_id = id, polls, error = %e, "Status poll failed, stopping");
                    return Err(e);
                }
            };

            debug!(document_id = id, polls, status = %report.status.name, "Status polled");
            on_update(&report);

            if report.status.is_terminal() {
                info!(document_id = id, polls, status = %report.status.name, "Document processing finished");
                return Ok(report);
            }
        }
    }
}
