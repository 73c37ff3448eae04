// Application state for HTTP handlers
use crate::application::shell::AppShell;
use std::time::Duration;

pub struct AppState {
    pub shell: AppShell,
    /// Set when the dashboard refreshes itself; rendered pages follow suit.
    pub auto_refresh: Option<Duration>,
}
