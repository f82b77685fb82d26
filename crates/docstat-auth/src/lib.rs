//! Session lifecycle for docstat clients.
//!
//! This crate provides:
//! - A typed client for the backend's `/auth` endpoints
//! - An explicit FSM for the session lifecycle
//! - [`SessionController`], the single owner of the in-memory session
//! - A navigation seam so redirects are observable and testable
//! - [`RequestGate`], which stamps credentials on protected calls and turns
//!   a 401 into a forced logout

mod auth_fsm;
mod client;
mod error;
mod gate;
mod models;
mod navigation;
mod session;

pub use auth_fsm::auth_machine;
pub use auth_fsm::{
    AuthMachine, AuthMachineInput, AuthMachineState, SessionChangedPayload, SessionState,
};
pub use client::AuthClient;
pub use error::{AuthError, AuthResult};
pub use gate::{RequestGate, SESSION_EXPIRED_NOTICE};
pub use models::{AccountStatus, LoginForm, LoginResponse, Role, UserProfile};
pub use navigation::{NoopNavigator, Navigator, Route};
pub use session::{AccessDecision, SessionController, SessionSnapshot, SessionStateCallback};
