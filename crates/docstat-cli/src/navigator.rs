//! Terminal rendering of navigation side effects.

use docstat_auth::{Navigator, Route};

/// Prints redirects as hints and notices as warnings on stderr.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigate");
        if route == Route::Login {
            eprintln!("Run `docstat login --email <EMAIL>` to sign in.");
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}
