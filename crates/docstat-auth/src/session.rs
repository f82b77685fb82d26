//! Session controller using FSM-based state management.
//!
//! `SessionController` owns the single in-memory session of the process. The
//! credential itself lives in the [`TokenStore`]; the controller only caches
//! the profile of its owner and tracks the lifecycle through an explicit state
//! machine, so every transition is closed and observable.

use crate::auth_fsm::{AuthMachine, AuthMachineInput, SessionChangedPayload, SessionState};
use crate::client::AuthClient;
use crate::models::UserProfile;
use crate::navigation::{Navigator, Route};
use crate::{AuthError, AuthResult};
use chrono::{DateTime, Utc};
use docstat_storage::TokenStore;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Callback type for session state change notifications.
pub type SessionStateCallback = Box<dyn Fn(SessionChangedPayload) + Send + Sync>;

/// Outcome of a protected-view check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Bootstrap still running; show a loading indicator.
    Pending,
    /// Nobody is signed in.
    RedirectToLogin,
    /// Signed in, but the view needs the admin role.
    Forbidden,
    Granted,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub user: Option<UserProfile>,
    pub is_admin: bool,
    /// Whole minutes until the held credential expires.
    pub token_minutes_remaining: Option<i64>,
    pub token_expires_at: Option<DateTime<Utc>>,
}

/// Owner of the process-wide session.
pub struct SessionController {
    tokens: Arc<TokenStore>,
    client: AuthClient,
    navigator: Arc<dyn Navigator>,
    /// Internal FSM for tracking session transitions.
    fsm: Mutex<AuthMachine>,
    user: Mutex<Option<UserProfile>>,
    bootstrap_started: AtomicBool,
    state_callback: Mutex<Option<SessionStateCallback>>,
}

impl SessionController {
    pub fn new(tokens: Arc<TokenStore>, client: AuthClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            tokens,
            client,
            navigator,
            fsm: Mutex::new(AuthMachine::new()),
            user: Mutex::new(None),
            bootstrap_started: AtomicBool::new(false),
            state_callback: Mutex::new(None),
        }
    }

    /// Set a callback to be notified of session state changes.
    pub fn set_state_callback(&self, callback: SessionStateCallback) {
        *self.state_callback.lock() = Some(callback);
    }

    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        SessionState::from(self.fsm.lock().state())
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// False whenever nobody is signed in.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated()
            && self
                .user
                .lock()
                .as_ref()
                .map(UserProfile::is_admin)
                .unwrap_or(false)
    }

    /// Cached profile of the signed-in user.
    pub fn user(&self) -> Option<UserProfile> {
        self.user.lock().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        let user = if state.is_authenticated() {
            self.user()
        } else {
            None
        };
        SessionSnapshot {
            state,
            is_admin: user.as_ref().map(UserProfile::is_admin).unwrap_or(false),
            user,
            token_minutes_remaining: self.tokens.remaining_minutes(),
            token_expires_at: self.tokens.claims().and_then(|c| c.expires_at()),
        }
    }

    /// Decide whether a protected view may render.
    pub fn authorize(&self, require_admin: bool) -> AccessDecision {
        let state = self.state();
        if state.is_loading() {
            return AccessDecision::Pending;
        }
        if !state.is_authenticated() {
            return AccessDecision::RedirectToLogin;
        }
        if require_admin && !self.is_admin() {
            return AccessDecision::Forbidden;
        }
        AccessDecision::Granted
    }

    /// Transition the FSM and notify callback if state changed.
    fn transition(&self, input: &AuthMachineInput) -> AuthResult<SessionState> {
        let mut fsm = self.fsm.lock();
        let old_state = SessionState::from(fsm.state());

        fsm.consume(input).map_err(|_| {
            AuthError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        let new_state = SessionState::from(fsm.state());
        drop(fsm);

        if old_state != new_state {
            debug!(
                old_state = ?old_state,
                new_state = ?new_state,
                "Session state transition"
            );
            self.notify_state_change(new_state);
        }

        Ok(new_state)
    }

    /// Apply `input` and replace the cached profile while the FSM is locked.
    ///
    /// A refused input leaves the profile and the credential untouched.
    fn commit(
        &self,
        input: &AuthMachineInput,
        user: Option<UserProfile>,
        purge_credential: bool,
    ) -> AuthResult<SessionState> {
        let mut fsm = self.fsm.lock();
        let old_state = SessionState::from(fsm.state());

        fsm.consume(input).map_err(|_| {
            AuthError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                fsm.state()
            ))
        })?;

        if purge_credential {
            self.tokens.remove();
        }
        *self.user.lock() = user;

        let new_state = SessionState::from(fsm.state());
        drop(fsm);

        if old_state != new_state {
            debug!(
                old_state = ?old_state,
                new_state = ?new_state,
                "Session state transition"
            );
            self.notify_state_change(new_state);
        }

        Ok(new_state)
    }

    fn notify_state_change(&self, state: SessionState) {
        let cb = self.state_callback.lock();
        if let Some(callback) = cb.as_ref() {
            let user = self.user.lock().clone();
            callback(SessionChangedPayload {
                state,
                user_id: user.as_ref().map(|u| u.id),
                email: user.as_ref().map(|u| u.email.clone()),
                is_admin: user.as_ref().map(UserProfile::is_admin).unwrap_or(false),
            });
        }
    }

    /// Resolve the persisted credential into a session.
    ///
    /// Runs once per controller; later calls return the current state. With
    /// no valid credential no network call is made. A rejected profile fetch
    /// purges the credential and resolves to `Anonymous` without an error.
    pub async fn bootstrap(&self) -> SessionState {
        if self.bootstrap_started.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        let Some(token) = self.tokens.get() else {
            info!("No valid credential found on startup");
            self.apply(&AuthMachineInput::NoCredential);
            return self.state();
        };

        debug!("Credential found on startup, fetching profile");
        match self.client.fetch_profile(&token).await {
            // Both inputs are only accepted while still bootstrapping. A logout
            // or login that landed during the fetch owns the session now.
            Ok(profile) => {
                let user_id = profile.id;
                match self.commit(&AuthMachineInput::ProfileLoaded, Some(profile), false) {
                    Ok(_) => info!(user_id, "Session restored on startup"),
                    Err(_) => debug!(user_id, "Session moved on during startup, dropping profile"),
                }
            }
            Err(e) => match self.commit(&AuthMachineInput::ProfileRejected, None, true) {
                Ok(_) => warn!(error = %e, "Profile fetch failed on startup, credential discarded"),
                Err(_) => debug!(error = %e, "Session moved on during startup, keeping credential"),
            },
        }

        self.state()
    }

    /// Sign in with email and password.
    ///
    /// On failure the backend error is returned and the session is untouched.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<UserProfile> {
        let state = self.state();
        if state.is_loading() {
            return Err(AuthError::InvalidStateTransition(format!(
                "Cannot log in while session is {:?}",
                state
            )));
        }

        let login = self.client.request_token(email, password).await?;
        let profile = login.user;

        if TokenStore::is_expired(&login.access_token) {
            warn!(user_id = profile.id, "Backend issued an unusable credential");
            return Err(AuthError::UnusableCredential);
        }

        self.tokens.save(&login.access_token);
        self.commit(&AuthMachineInput::LoginSucceeded, Some(profile.clone()), false)?;

        info!(user_id = profile.id, "Login successful");
        self.navigator.navigate(Route::Landing);
        Ok(profile)
    }

    /// Sign out. Always succeeds.
    pub fn logout(&self) {
        self.reset(&AuthMachineInput::LogoutRequested);
        info!("Logged out");
        self.navigator.navigate(Route::Login);
    }

    /// Reset the session after the backend rejected the credential.
    pub fn force_logout(&self, reason: &str) {
        self.reset(&AuthMachineInput::CredentialRejected);
        warn!(reason = %reason, "Session reset by backend rejection");
        self.navigator.notify(reason);
        self.navigator.navigate(Route::Login);
    }

    fn reset(&self, input: &AuthMachineInput) {
        if let Err(e) = self.commit(input, None, true) {
            warn!(error = %e, "Unexpected session transition failure");
        }
    }

    /// Transition for inputs that are accepted from every reachable state.
    fn apply(&self, input: &AuthMachineInput) {
        if let Err(e) = self.transition(input) {
            warn!(error = %e, "Unexpected session transition failure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstat_storage::MemoryStore;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
        notices: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().push(route);
        }

        fn notify(&self, message: &str) {
            self.notices.lock().push(message.to_string());
        }
    }

    fn create_test_controller() -> (SessionController, Arc<RecordingNavigator>) {
        let tokens = Arc::new(TokenStore::new(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        ));
        let client = AuthClient::new("http://127.0.0.1:9/api").unwrap();
        let navigator = Arc::new(RecordingNavigator::default());
        let controller = SessionController::new(tokens, client, navigator.clone());
        (controller, navigator)
    }

    fn admin_profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 1, "first_name": "Ada", "last_name": "Admin",
            "email": "admin@example.com", "role_id": 1, "status_id": 1
        }))
        .unwrap()
    }

    fn valid_token() -> String {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;

        let exp = Utc::now().timestamp() + 3600;
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, exp));
        format!("e30.{}.sig", payload)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let (controller, _) = create_test_controller();
        assert_eq!(controller.state(), SessionState::Bootstrapping);
        assert!(controller.is_loading());
        assert!(!controller.is_authenticated());
        assert!(!controller.is_admin());
        assert_eq!(controller.authorize(false), AccessDecision::Pending);
    }

    #[tokio::test]
    async fn test_bootstrap_without_credential_skips_network() {
        let (controller, navigator) = create_test_controller();

        assert_eq!(controller.bootstrap().await, SessionState::Anonymous);
        assert!(!controller.is_loading());
        assert_eq!(controller.authorize(false), AccessDecision::RedirectToLogin);
        assert!(navigator.routes.lock().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let (controller, _) = create_test_controller();
        controller.bootstrap().await;
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();

        assert_eq!(controller.bootstrap().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_login_refused_while_bootstrapping() {
        let (controller, _) = create_test_controller();
        let result = controller.login("good@x.com", "right-pw").await;
        assert!(matches!(result, Err(AuthError::InvalidStateTransition(_))));
        assert_eq!(controller.state(), SessionState::Bootstrapping);
    }

    #[test]
    fn test_authorize_admin_views() {
        let (controller, _) = create_test_controller();
        controller.apply(&AuthMachineInput::NoCredential);

        let mut regular = admin_profile();
        regular.role = crate::Role::Regular(2);
        *controller.user.lock() = Some(regular);
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();

        assert_eq!(controller.authorize(false), AccessDecision::Granted);
        assert_eq!(controller.authorize(true), AccessDecision::Forbidden);

        *controller.user.lock() = Some(admin_profile());
        assert!(controller.is_admin());
        assert_eq!(controller.authorize(true), AccessDecision::Granted);
    }

    #[test]
    fn test_logout_clears_session_and_redirects() {
        let (controller, navigator) = create_test_controller();
        controller.apply(&AuthMachineInput::NoCredential);
        controller.token_store().save("some.credential.value");
        *controller.user.lock() = Some(admin_profile());
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();

        controller.logout();

        assert_eq!(controller.state(), SessionState::Anonymous);
        assert!(controller.user().is_none());
        assert!(!controller.is_admin());
        assert!(controller.token_store().get().is_none());
        assert_eq!(*navigator.routes.lock(), vec![Route::Login]);
        assert!(navigator.notices.lock().is_empty());
    }

    #[test]
    fn test_logout_when_anonymous_still_succeeds() {
        let (controller, navigator) = create_test_controller();
        controller.logout();
        controller.logout();

        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(navigator.routes.lock().len(), 2);
    }

    #[test]
    fn test_force_logout_notifies_once() {
        let (controller, navigator) = create_test_controller();
        controller.apply(&AuthMachineInput::NoCredential);
        *controller.user.lock() = Some(admin_profile());
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();

        controller.force_logout("Session expired. Please log in again.");

        assert_eq!(controller.state(), SessionState::Anonymous);
        assert!(controller.user().is_none());
        assert_eq!(*navigator.routes.lock(), vec![Route::Login]);
        assert_eq!(
            *navigator.notices.lock(),
            vec!["Session expired. Please log in again.".to_string()]
        );
    }

    #[test]
    fn test_refused_startup_result_leaves_session_alone() {
        let (controller, _) = create_test_controller();
        controller.apply(&AuthMachineInput::NoCredential);
        controller.token_store().save(&valid_token());
        controller
            .commit(&AuthMachineInput::LoginSucceeded, Some(admin_profile()), false)
            .unwrap();

        assert!(controller
            .commit(&AuthMachineInput::ProfileRejected, None, true)
            .is_err());
        assert!(controller
            .commit(&AuthMachineInput::ProfileLoaded, None, false)
            .is_err());

        assert_eq!(controller.state(), SessionState::Authenticated);
        assert!(controller.is_admin());
        assert!(controller.token_store().exists());
    }

    #[test]
    fn test_snapshot_hides_user_when_anonymous() {
        let (controller, _) = create_test_controller();
        controller.apply(&AuthMachineInput::NoCredential);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, SessionState::Anonymous);
        assert!(snapshot.user.is_none());
        assert!(!snapshot.is_admin);
        assert!(snapshot.token_minutes_remaining.is_none());
        assert!(snapshot.token_expires_at.is_none());
    }

    #[test]
    fn test_state_callback_invoked_on_transition() {
        let (controller, _) = create_test_controller();
        let callback_count = Arc::new(AtomicUsize::new(0));
        let admin_seen = Arc::new(AtomicBool::new(false));
        let count = callback_count.clone();
        let seen = admin_seen.clone();

        controller.set_state_callback(Box::new(move |payload| {
            count.fetch_add(1, Ordering::SeqCst);
            if payload.state == SessionState::Authenticated && payload.is_admin {
                seen.store(true, Ordering::SeqCst);
            }
        }));

        controller.apply(&AuthMachineInput::NoCredential);
        *controller.user.lock() = Some(admin_profile());
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();
        // Self-transition does not notify
        controller.transition(&AuthMachineInput::LoginSucceeded).unwrap();
        controller.logout();

        assert_eq!(callback_count.load(Ordering::SeqCst), 3);
        assert!(admin_seen.load(Ordering::SeqCst));
    }
}
