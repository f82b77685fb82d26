//! Navigation seam.
//!
//! The session controller never moves the UI itself; it asks an injected
//! [`Navigator`]. Front ends render the request, tests record it.

use std::fmt;

/// Views the session lifecycle may send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in view. Target of logout and forced logout.
    Login,
    /// Authenticated landing view. Target of a successful login.
    Landing,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Landing => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receiver of navigation side effects.
pub trait Navigator: Send + Sync {
    /// Move the user to `route`.
    fn navigate(&self, route: Route);

    /// Show a blocking notice (e.g. "session expired").
    fn notify(&self, _message: &str) {}
}

/// Navigator that discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: Route) {
        tracing::trace!(route = %route, "Navigation discarded");
    }
}
