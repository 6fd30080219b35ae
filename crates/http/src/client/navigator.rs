//! Navigation side effects requested by the session
//!
//! The session never renders anything itself. When it ends a session or
//! completes a login it asks the embedding application to move somewhere
//! (the login page, the dashboard) through this hook.

use tracing::info;

pub trait Navigator: Send + Sync {
    /// Move the application to `location`, e.g. `/login`
    fn navigate(&self, location: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, location: &str) {
        self(location);
    }
}

/// Navigator that only records the request in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, location: &str) {
        info!(location, "Navigation requested");
    }
}
