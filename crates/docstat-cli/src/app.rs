//! Per-invocation application state.

use crate::navigator::TerminalNavigator;
use docstat_api::{DocumentsClient, StatusPoller, UsersClient};
use docstat_auth::{AccessDecision, AuthClient, AuthError, RequestGate, SessionController};
use docstat_config_and_utils::{Config, Paths};
use docstat_storage::create_token_store;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a command needs: resolved configuration and a bootstrapped
/// session with its request gate.
pub struct App {
    pub config: Config,
    pub paths: Paths,
    pub session: Arc<SessionController>,
    pub gate: RequestGate,
}

impl App {
    pub async fn start(config: Config, paths: Paths) -> Result<Self, Box<dyn std::error::Error>> {
        let tokens = Arc::new(create_token_store(&paths.credential_store_file()));
        let client = AuthClient::new(config.api_base_url()?.as_str())?;
        let session = Arc::new(SessionController::new(
            tokens,
            client,
            Arc::new(TerminalNavigator),
        ));
        session.set_state_callback(Box::new(|payload| {
            debug!(state = ?payload.state, user_id = ?payload.user_id, "Session state changed");
        }));

        let state = session.bootstrap().await;
        info!(
            state = ?state,
            base_dir = %paths.base_dir().display(),
            "docstat session ready"
        );

        let gate = RequestGate::for_session(session.clone());
        Ok(Self {
            config,
            paths,
            session,
            gate,
        })
    }

    /// Gate a command the way protected views are gated.
    pub fn require(&self, require_admin: bool) -> Result<(), Box<dyn std::error::Error>> {
        match self.session.authorize(require_admin) {
            AccessDecision::Granted => Ok(()),
            AccessDecision::RedirectToLogin => Err(AuthError::NotLoggedIn.into()),
            AccessDecision::Forbidden => Err("Access denied: admin privileges required".into()),
            AccessDecision::Pending => Err("Session is still loading".into()),
        }
    }

    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.gate.clone())
    }

    pub fn poller(&self) -> StatusPoller {
        StatusPoller::with_interval(self.documents(), self.config.poll_interval())
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.gate.clone())
    }
}
