// Process-wide session state
use super::dashboard::DashboardPayload;
use super::page::Page;
use super::theme::Theme;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub current_page: String,
    pub theme: Theme,
    pub dashboard_data: Option<DashboardPayload>,
}

impl SessionState {
    pub fn new(theme: Theme) -> Self {
        Self {
            current_page: Page::Dashboard.name().to_string(),
            theme,
            dashboard_data: None,
        }
    }

    pub fn on_dashboard(&self) -> bool {
        self.current_page == Page::Dashboard.name()
    }
}
