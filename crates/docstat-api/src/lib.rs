//! Protected resource clients for the docstat backend.
//!
//! Every call goes through a [`RequestGate`](docstat_auth::RequestGate), so a
//! rejected credential resets the session no matter which endpoint saw it.

mod documents;
mod error;
mod models;
mod poller;
mod users;

pub use documents::DocumentsClient;
pub use error::{ApiError, ApiResult};
pub use models::{
    Document, DocumentStatus, DocumentStatusReport, ResultKind, UploadReceipt, UserList, UserRecord,
};
pub use poller::{StatusPoller, DEFAULT_POLL_INTERVAL};
pub use users::UsersClient;
