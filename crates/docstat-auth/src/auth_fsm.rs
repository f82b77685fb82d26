//! Session state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Bootstrapping  │ (initial)
//! └───┬─────────┬───┘
//!     │         │ ProfileLoaded
//!     │         ▼
//!     │   ┌─────────────────┐  LoginSucceeded
//!     │   │  Authenticated  │ ◄──────────────┐
//!     │   └────────┬────────┘                │
//!     │            │ LogoutRequested /       │
//!     │            │ CredentialRejected      │
//!     │            ▼                         │
//!     │   ┌─────────────────┐                │
//!     └─► │    Anonymous    │ ───────────────┘
//!         └─────────────────┘
//!  NoCredential / ProfileRejected /
//!  LogoutRequested / CredentialRejected
//! ```
//!
//! Logout and credential rejection are accepted from every state, so a
//! forced reset never fails. Login is the only input refused while the
//! session is still bootstrapping.

use rust_fsm::*;
use serde::{Deserialize, Serialize};

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub auth_machine(Bootstrapping)

    Bootstrapping => {
        NoCredential => Anonymous,
        ProfileRejected => Anonymous,
        ProfileLoaded => Authenticated,
        LogoutRequested => Anonymous,
        CredentialRejected => Anonymous
    },
    Anonymous => {
        LoginSucceeded => Authenticated,
        LogoutRequested => Anonymous,
        CredentialRejected => Anonymous
    },
    Authenticated => {
        LoginSucceeded => Authenticated,
        LogoutRequested => Anonymous,
        CredentialRejected => Anonymous
    }
}

pub use auth_machine::Input as AuthMachineInput;
pub use auth_machine::State as AuthMachineState;
pub use auth_machine::StateMachine as AuthMachine;

/// Session state for external consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Startup validation of a persisted credential is in flight.
    Bootstrapping,
    /// No user is signed in.
    Anonymous,
    /// A user profile is cached for this process.
    Authenticated,
}

impl SessionState {
    /// Consumers must not treat any other read as final while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Bootstrapping)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl From<&AuthMachineState> for SessionState {
    fn from(state: &AuthMachineState) -> Self {
        match state {
            AuthMachineState::Bootstrapping => SessionState::Bootstrapping,
            AuthMachineState::Anonymous => SessionState::Anonymous,
            AuthMachineState::Authenticated => SessionState::Authenticated,
        }
    }
}

/// Payload for session state change events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionChangedPayload {
    /// Current session state.
    pub state: SessionState,
    /// User ID if signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// User email if signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the signed-in user holds the admin role.
    pub is_admin: bool,
}
