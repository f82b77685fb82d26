//! User administration endpoints.

use crate::models::{UserList, UserRecord};
use crate::ApiResult;
use docstat_auth::RequestGate;

/// Client for `/users`. The backend decides who may call it.
#[derive(Clone)]
pub struct UsersClient {
    gate: RequestGate,
}

impl UsersClient {
    pub fn new(gate: RequestGate) -> Self {
        Self { gate }
    }

    pub async fn list(&self) -> ApiResult<Vec<UserRecord>> {
        let list: UserList = self.gate.get_json("/users/").await?;
        tracing::debug!(count = list.users.len(), "Fetched users");
        Ok(list.users)
    }

    pub async fn get(&self, id: i64) -> ApiResult<UserRecord> {
        Ok(self.gate.get_json(&format!("/users/{}", id)).await?)
    }
}
