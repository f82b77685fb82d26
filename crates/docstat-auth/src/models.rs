//! Wire types for the backend's `/auth` endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend role. Only id 1 carries admin rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Role {
    Admin,
    Regular(i64),
}

impl Role {
    pub const ADMIN_ID: i64 = 1;

    pub fn id(&self) -> i64 {
        match self {
            Role::Admin => Self::ADMIN_ID,
            Role::Regular(id) => *id,
        }
    }
}

impl From<i64> for Role {
    fn from(id: i64) -> Self {
        if id == Self::ADMIN_ID {
            Role::Admin
        } else {
            Role::Regular(id)
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

/// Backend account status. Only id 1 may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum AccountStatus {
    Active,
    Disabled(i64),
}

impl AccountStatus {
    pub const ACTIVE_ID: i64 = 1;

    pub fn id(&self) -> i64 {
        match self {
            AccountStatus::Active => Self::ACTIVE_ID,
            AccountStatus::Disabled(id) => *id,
        }
    }
}

impl From<i64> for AccountStatus {
    fn from(id: i64) -> Self {
        if id == Self::ACTIVE_ID {
            AccountStatus::Active
        } else {
            AccountStatus::Disabled(id)
        }
    }
}

impl From<AccountStatus> for i64 {
    fn from(status: AccountStatus) -> Self {
        status.id()
    }
}

/// The signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "role_id", alias = "role")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(rename = "status_id", alias = "status")]
    pub status: AccountStatus,
}

impl UserProfile {
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

/// OAuth2 password-grant form posted to `/auth/token`.
#[derive(Clone, Serialize)]
pub struct LoginForm {
    /// The backend takes the email in the `username` field.
    pub username: String,
    pub password: String,
    pub grant_type: &'static str,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            username: email.to_string(),
            password: password.to_string(),
            grant_type: "password",
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Successful response of `/auth/token`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserProfile,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_json() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 1,
            "first_name": "Ada",
            "last_name": "Admin",
            "email": "admin@example.com",
            "role_id": 1,
            "role_name": "admin",
            "status_id": 1,
        }))
        .unwrap();

        assert!(profile.is_admin());
        assert!(profile.is_active());
        assert_eq!(profile.full_name(), "Ada Admin");
        assert_eq!(profile.role_name.as_deref(), Some("admin"));
    }

    #[test]
    fn test_regular_disabled_profile() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 5,
            "first_name": "Reg",
            "last_name": "",
            "email": "reg@example.com",
            "role": 2,
            "status": 3,
        }))
        .unwrap();

        assert!(!profile.is_admin());
        assert!(!profile.is_active());
        assert_eq!(profile.role, Role::Regular(2));
        assert_eq!(profile.status, AccountStatus::Disabled(3));
        assert_eq!(profile.full_name(), "Reg");
    }

    #[test]
    fn test_profile_serializes_backend_ids() {
        let profile = UserProfile {
            id: 9,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            role: Role::Admin,
            role_name: None,
            status: AccountStatus::Disabled(2),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role_id"], 1);
        assert_eq!(json["status_id"], 2);
        assert!(json.get("role_name").is_none());
    }

    #[test]
    fn test_login_form_debug_hides_password() {
        let form = LoginForm::new("good@x.com", "right-pw");
        let debug = format!("{:?}", form);
        assert!(debug.contains("good@x.com"));
        assert!(!debug.contains("right-pw"));
        assert_eq!(form.grant_type, "password");
    }

    #[test]
    fn test_login_response_defaults_token_type() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "access_token": "t",
            "user": {
                "id": 1, "first_name": "A", "last_name": "B",
                "email": "a@b.c", "role_id": 2, "status_id": 1
            }
        }))
        .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert!(!format!("{:?}", response).contains("\"t\""));
    }
}
