// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
mod util;

use std::{net::SocketAddr, sync::Arc};
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::churn_api::ChurnApi;
use crate::application::dashboard_service::DashboardService;
use crate::application::shell::AppShell;
use crate::application::toast::ToastCenter;
use crate::application::view::{SharedView, View};
use crate::domain::session::SessionState;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::document::Document;
use crate::infrastructure::file_store::FilePreferenceStore;
use crate::infrastructure::http_api::HttpChurnApi;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    export, health_check, navigate, panic_response, refresh, run_action, show_page, simulate,
    toggle_theme, upload,
};
use crate::util::storage::PreferenceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Adapters (infrastructure layer)
    let preferences = FilePreferenceStore::open(&config.ui.storage_path);
    tracing::info!("Preferences stored in {}", preferences.path().display());
    let store: Arc<dyn PreferenceStore> = Arc::new(preferences);
    let api: Arc<dyn ChurnApi> = Arc::new(HttpChurnApi::new(config.api.base_url.clone()));

    // Page model, restored from the persisted theme
    let theme = AppShell::stored_theme(store.as_ref());
    let view = View::new(
        Document::churn_layout(),
        ToastCenter::new(config.ui.toast_duration()),
        SessionState::new(theme),
    )
    .into_shared();

    // Services (application layer)
    let dashboard = Arc::new(DashboardService::new(api.clone(), view.clone()));
    let shell = AppShell::new(api, dashboard.clone(), store, view.clone());
    shell.initialize().await;

    let auto_refresh = config
        .dashboard
        .auto_refresh
        .then(|| config.dashboard.refresh_interval())
        .filter(|interval| dashboard.start_auto_refresh(*interval));

    let state = Arc::new(AppState { shell, auto_refresh });
    let router = build_router(state, view, config.ui.max_upload_bytes);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Churn dashboard on http://{} (backend {})", addr, config.api.base_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>, view: SharedView, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/healthz", get(health_check))
        .route("/pages/:name", get(navigate))
        .route("/upload", post(upload).layer(DefaultBodyLimit::max(max_upload_bytes)))
        .route("/theme", post(toggle_theme))
        .route("/refresh", post(refresh))
        .route("/export", post(export))
        .route("/actions/:action", post(run_action))
        .route("/simulate", post(simulate))
        .with_state(state)
        .layer(CatchPanicLayer::custom(move |panic| panic_response(&view, panic)))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::churn_api::{ApiError, ApiResult, UploadFile};
    use crate::application::view::lock_view;
    use crate::domain::analytics::*;
    use crate::domain::dashboard::DashboardPayload;
    use crate::domain::theme::Theme;
    use crate::util::storage::MemoryPreferenceStore;
    use async_trait::async_trait;
    use axum::extract::Multipart;
    use axum::Json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const UPLOAD_LIMIT: usize = 16 * 1024 * 1024;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn serve_dashboard_with(
        api: Arc<dyn ChurnApi>,
    ) -> (String, SharedView, Arc<MemoryPreferenceStore>) {
        let store = Arc::new(MemoryPreferenceStore::new());
        let view = View::new(
            Document::churn_layout(),
            ToastCenter::default(),
            SessionState::new(Theme::Light),
        )
        .into_shared();
        let dashboard = Arc::new(DashboardService::new(api.clone(), view.clone()));
        let shell = AppShell::new(api, dashboard, store.clone(), view.clone());
        let state = Arc::new(AppState { shell, auto_refresh: None });

        let base = serve(build_router(state, view.clone(), UPLOAD_LIMIT)).await;
        (base, view, store)
    }

    async fn serve_dashboard() -> (String, SharedView, Arc<MemoryPreferenceStore>) {
        // Nothing listens on port 9; every backend call fails fast.
        serve_dashboard_with(Arc::new(HttpChurnApi::new("http://127.0.0.1:9/api"))).await
    }

    fn csv_upload(name: &str, contents: Vec<u8>) -> reqwest::multipart::Form {
        reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(contents).file_name(name.to_string()),
        )
    }

    #[tokio::test]
    async fn test_navigation_renders_requested_page() {
        let (base, view, _) = serve_dashboard().await;

        let html = reqwest::get(format!("{}/pages/upload", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains("<h1 class=\"page-title\" id=\"pageTitle\">Upload Data</h1>"));
        assert!(html.contains("id=\"upload-page\" class=\"active page\""));
        assert_eq!(lock_view(&view).session.current_page, "upload");

        let html = reqwest::get(format!("{}/?page=insights", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains(">Insights</h1>"));
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() {
        let (base, view, store) = serve_dashboard().await;
        let client = reqwest::Client::new();

        let response = client.post(format!("{}/theme", base)).send().await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert!(response.text().await.unwrap().contains("<body class=\"dark-mode\">"));
        assert_eq!(lock_view(&view).session.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_upload_without_csv_is_rejected() {
        let (base, view, _) = serve_dashboard().await;

        let response = reqwest::Client::new()
            .post(format!("{}/upload", base))
            .multipart(csv_upload("notes.txt", b"hello".to_vec()))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let view = lock_view(&view);
        assert_eq!(
            view.toasts.last().map(|t| t.message.as_str()),
            Some("Please upload a CSV file")
        );
    }

    #[tokio::test]
    async fn test_large_csv_reaches_backend_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let backend_hits = hits.clone();
        let backend = Router::new()
            .route(
                "/api/upload-data",
                post(move |mut multipart: Multipart| {
                    let hits = backend_hits.clone();
                    async move {
                        let mut size = 0;
                        while let Some(field) = multipart.next_field().await.unwrap() {
                            size += field.bytes().await.unwrap().len();
                        }
                        hits.fetch_add(1, Ordering::SeqCst);
                        Json(serde_json::json!({
                            "status": "success",
                            "rows": size / 8,
                            "columns": 2,
                            "preview": []
                        }))
                    }
                }),
            )
            .layer(DefaultBodyLimit::disable());
        let backend_url = format!("{}/api", serve(backend).await);
        let (base, view, _) = serve_dashboard_with(Arc::new(HttpChurnApi::new(backend_url))).await;

        // 3 MiB of "1234,567" rows, past axum's 2 MB default.
        let contents = b"1234,567".repeat(3 * 1024 * 1024 / 8);
        let response = reqwest::Client::new()
            .post(format!("{}/upload", base))
            .multipart(csv_upload("data.csv", contents))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let view = lock_view(&view);
        let toast = view.toasts.last().unwrap();
        assert_eq!(toast.message, "File uploaded successfully! 393216 rows, 2 columns");
    }

    #[tokio::test]
    async fn test_unknown_action_is_not_found() {
        let (base, _, _) = serve_dashboard().await;

        let response = reqwest::Client::new()
            .post(format!("{}/actions/launch-rockets", base))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    /// Panics on every dashboard fetch.
    struct PanickingApi;

    fn unavailable<T>() -> ApiResult<T> {
        Err(ApiError::Status {
            endpoint: "/test".into(),
            status: 503,
        })
    }

    #[async_trait]
    impl ChurnApi for PanickingApi {
        async fn get_dashboard_data(&self) -> ApiResult<DashboardPayload> {
            panic!("dashboard payload exploded")
        }
        async fn upload_dataset(&self, _file: UploadFile) -> ApiResult<UploadResult> {
            unavailable()
        }
        async fn train_model(&self) -> ApiResult<TrainingStatus> {
            unavailable()
        }
        async fn get_predictions(&self) -> ApiResult<Predictions> {
            unavailable()
        }
        async fn get_model_metrics(&self) -> ApiResult<ModelMetrics> {
            unavailable()
        }
        async fn get_feature_importance(&self) -> ApiResult<FeatureImportance> {
            unavailable()
        }
        async fn cluster_customers(&self) -> ApiResult<ClusterAssignments> {
            unavailable()
        }
        async fn get_cluster_summary(&self) -> ApiResult<ClusterSummary> {
            unavailable()
        }
        async fn simulate_scenario(&self, _params: &ScenarioParams) -> ApiResult<ScenarioOutcome> {
            unavailable()
        }
        async fn generate_retention_strategy(&self) -> ApiResult<RetentionPlan> {
            unavailable()
        }
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_generic_toast() {
        let (base, view, _) = serve_dashboard_with(Arc::new(PanickingApi)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/refresh", base))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let html = response.text().await.unwrap();
        assert!(html.contains("class=\"alert alert-danger\">An error occurred</div>"));

        let view = lock_view(&view);
        assert_eq!(view.document.text("kpiTotalCustomers"), Some("0"));
        assert!(view.charts.is_empty());
        assert!(view.session.dashboard_data.is_none());
    }
}
