// Application shell - navigation, uploads, theme and page actions
use crate::application::churn_api::{ChurnApi, UploadFile};
use crate::application::dashboard_service::DashboardService;
use crate::application::toast::ToastKind;
use crate::application::view::{SharedView, View, lock_view};
use crate::domain::analytics::{
    ClusterAssignments, RetentionPlan, ScenarioOutcome, ScenarioParams, TrainingStatus,
    UploadResult,
};
use crate::domain::page::{Page, section_id, title_for};
use crate::domain::theme::{DARK_MODE_CLASS, THEME_KEY, Theme};
use crate::infrastructure::document::{
    ACTIVE_CLASS, FILE_INPUT, NAV_ITEM_CLASS, PAGE_CLASS, PAGE_TITLE, THEME_TOGGLE, UPLOAD_BUTTON,
};
use crate::util::csv::parse_csv;
use crate::util::format::format_currency;
use crate::util::storage::PreferenceStore;
use std::sync::Arc;

const UPLOAD_LABEL: &str = "Upload";
const UPLOADING_LABEL: &str = "Uploading...";

pub struct AppShell {
    api: Arc<dyn ChurnApi>,
    dashboard: Arc<DashboardService>,
    store: Arc<dyn PreferenceStore>,
    view: SharedView,
}

impl AppShell {
    pub fn new(
        api: Arc<dyn ChurnApi>,
        dashboard: Arc<DashboardService>,
        store: Arc<dyn PreferenceStore>,
        view: SharedView,
    ) -> Self {
        Self {
            api,
            dashboard,
            store,
            view,
        }
    }

    pub fn stored_theme(store: &dyn PreferenceStore) -> Theme {
        Theme::from_stored(store.get(THEME_KEY).as_deref())
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn dashboard(&self) -> &Arc<DashboardService> {
        &self.dashboard
    }

    /// Apply the persisted theme, then load the dashboard.
    pub async fn initialize(&self) {
        tracing::info!("Initializing churn dashboard...");
        {
            let mut view = lock_view(&self.view);
            let theme = view.session.theme;
            apply_theme(&mut view, theme);
        }
        self.dashboard.refresh().await;
        tracing::info!("Churn dashboard ready");
    }

    pub async fn load_page(&self, name: &str) {
        {
            let mut guard = lock_view(&self.view);
            let view: &mut View = &mut guard;

            if view.session.on_dashboard() && name != Page::Dashboard.name() {
                view.charts.destroy_all(&mut view.document);
            }

            for section in view.document.elements_with_class_mut(PAGE_CLASS) {
                section.set_class(ACTIVE_CLASS, false);
            }
            if let Some(section) = view.document.get_mut(&section_id(name)) {
                section.set_class(ACTIVE_CLASS, true);
            }

            for item in view.document.elements_with_class_mut(NAV_ITEM_CLASS) {
                item.set_class(ACTIVE_CLASS, false);
            }
            if let Some(item) = view.document.nav_item_for_mut(name) {
                item.set_class(ACTIVE_CLASS, true);
            }

            view.document.set_text(PAGE_TITLE, title_for(name));
            view.session.current_page = name.to_string();
        }

        if Page::from_name(name) == Some(Page::Dashboard) {
            self.dashboard.refresh().await;
        }
    }

    /// Upload a selected CSV file. Only the `.csv` suffix is checked.
    /// Returns the server's answer when it reports success.
    pub async fn upload_file(&self, selection: Option<UploadFile>) -> Option<UploadResult> {
        let Some(file) = selection else {
            self.toast("Please select a file", ToastKind::Warning);
            return None;
        };
        if !file.name.ends_with(".csv") {
            self.toast("Please upload a CSV file", ToastKind::Warning);
            return None;
        }

        match std::str::from_utf8(&file.contents) {
            Ok(text) => tracing::debug!("Uploading {} ({} data rows)", file.name, parse_csv(text).len()),
            Err(_) => tracing::debug!("Uploading {} (not UTF-8)", file.name),
        }

        {
            let mut view = lock_view(&self.view);
            if let Some(input) = view.document.get_mut(FILE_INPUT) {
                input.value = file.name.clone();
            }
            if let Some(button) = view.document.get_mut(UPLOAD_BUTTON) {
                button.disabled = true;
                button.text = UPLOADING_LABEL.to_string();
            }
        }

        let response = self.api.upload_dataset(file).await;

        let mut view = lock_view(&self.view);
        if let Some(button) = view.document.get_mut(UPLOAD_BUTTON) {
            button.disabled = false;
            button.text = UPLOAD_LABEL.to_string();
        }

        match response {
            Ok(result) if result.is_success() => {
                view.toasts.show(
                    format!(
                        "File uploaded successfully! {} rows, {} columns",
                        result.rows, result.columns
                    ),
                    ToastKind::Success,
                );
                if let Some(input) = view.document.get_mut(FILE_INPUT) {
                    input.value.clear();
                }
                tracing::debug!("Upload response: {:?}", result);
                Some(result)
            }
            Ok(result) => {
                tracing::warn!("Upload rejected: {}", result.message.as_deref().unwrap_or(&result.status));
                view.toasts.show("Upload failed", ToastKind::Danger);
                None
            }
            Err(_) => {
                view.toasts.show("Upload failed", ToastKind::Danger);
                None
            }
        }
    }

    /// Flip the theme, restyle the page and persist the choice.
    pub fn toggle_theme(&self) -> Theme {
        let next = {
            let mut view = lock_view(&self.view);
            let next = view.session.theme.toggled();
            view.session.theme = next;
            apply_theme(&mut view, next);
            next
        };

        if let Err(e) = self.store.set(THEME_KEY, next.as_str()) {
            tracing::error!("Failed to persist theme: {}", e);
        }
        next
    }

    pub async fn train_model(&self) -> Option<TrainingStatus> {
        match self.api.train_model().await {
            Ok(status) => {
                self.toast("Model training complete", ToastKind::Success);
                Some(status)
            }
            Err(_) => {
                self.toast("Model training failed", ToastKind::Danger);
                None
            }
        }
    }

    pub async fn cluster_customers(&self) -> Option<ClusterAssignments> {
        match self.api.cluster_customers().await {
            Ok(assignments) => {
                self.toast(
                    format!("Customers grouped into {} clusters", assignments.clusters.len()),
                    ToastKind::Success,
                );
                Some(assignments)
            }
            Err(_) => {
                self.toast("Clustering failed", ToastKind::Danger);
                None
            }
        }
    }

    pub async fn simulate_scenario(&self, params: &ScenarioParams) -> Option<ScenarioOutcome> {
        match self.api.simulate_scenario(params).await {
            Ok(outcome) => {
                self.toast(
                    format!(
                        "Predicted churn change {:+.1}%, revenue impact {}",
                        outcome.predicted_churn_change,
                        format_currency(outcome.revenue_impact)
                    ),
                    ToastKind::Info,
                );
                Some(outcome)
            }
            Err(_) => {
                self.toast("Simulation failed", ToastKind::Danger);
                None
            }
        }
    }

    pub async fn generate_retention_strategy(&self) -> Option<RetentionPlan> {
        match self.api.generate_retention_strategy().await {
            Ok(plan) => {
                self.toast(
                    format!("{} retention strategies generated", plan.strategies.len()),
                    ToastKind::Success,
                );
                Some(plan)
            }
            Err(_) => {
                self.toast("Strategy generation failed", ToastKind::Danger);
                None
            }
        }
    }

    fn toast(&self, message: impl Into<String>, kind: ToastKind) {
        lock_view(&self.view).toasts.show(message, kind);
    }
}

fn apply_theme(view: &mut View, theme: Theme) {
    view.document.set_body_class(DARK_MODE_CLASS, theme.is_dark());
    view.document.set_text(THEME_TOGGLE, theme.toggle_icon());
}
