// HTTP request handlers
use crate::application::churn_api::UploadFile;
use crate::application::view::{SharedView, lock_view, report_uncaught};
use crate::domain::analytics::ScenarioParams;
use crate::infrastructure::html::render_page;
use crate::presentation::app_state::AppState;
use crate::util::web::get_query_param;
use axum::{
    Form,
    body::Body,
    extract::{Multipart, Path, RawQuery, State},
    http::{Response, StatusCode},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SimulationForm {
    #[serde(default)]
    pub price_change: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub campaign_intervention: Option<String>,
    #[serde(default)]
    pub campaign_type: Option<String>,
}

impl From<SimulationForm> for ScenarioParams {
    fn from(form: SimulationForm) -> Self {
        Self {
            price_change: form.price_change,
            discount_percentage: form.discount_percentage,
            campaign_intervention: form.campaign_intervention.is_some(),
            campaign_type: form.campaign_type.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current page; `?page=<name>` navigates first.
pub async fn show_page(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Html<String> {
    if let Some(page) = query.as_deref().and_then(|q| get_query_param(q, "page")) {
        state.shell.load_page(&page).await;
    }
    render(&state)
}

pub async fn navigate(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Html<String> {
    state.shell.load_page(&name).await;
    render(&state)
}

pub async fn upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Redirect {
    match read_upload(multipart).await {
        Ok(selection) => {
            state.shell.upload_file(selection).await;
        }
        Err(e) => report_uncaught(state.shell.view(), &e.to_string()),
    }
    Redirect::to("/")
}

/// The `file` field, or `None` when the form was sent without a file.
async fn read_upload(mut multipart: Multipart) -> anyhow::Result<Option<UploadFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await?;
        if name.is_empty() {
            return Ok(None);
        }
        return Ok(Some(UploadFile::new(name, contents)));
    }
    Ok(None)
}

pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Redirect {
    state.shell.toggle_theme();
    Redirect::to("/")
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Redirect {
    state.shell.dashboard().refresh().await;
    Redirect::to("/")
}

pub async fn export(State(state): State<Arc<AppState>>) -> Redirect {
    state.shell.dashboard().export_dashboard();
    Redirect::to("/")
}

pub async fn run_action(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
) -> impl IntoResponse {
    match action.as_str() {
        "train-model" => {
            state.shell.train_model().await;
        }
        "cluster-users" => {
            state.shell.cluster_customers().await;
        }
        "generate-retention-strategy" => {
            state.shell.generate_retention_strategy().await;
        }
        other => {
            tracing::warn!("Unknown action: {}", other);
            return StatusCode::NOT_FOUND.into_response();
        }
    }
    Redirect::to("/").into_response()
}

pub async fn simulate(State(state): State<Arc<AppState>>, Form(form): Form<SimulationForm>) -> Redirect {
    let params = ScenarioParams::from(form);
    state.shell.simulate_scenario(&params).await;
    Redirect::to("/")
}

/// Response for a handler that panicked: raise the generic toast and send
/// the browser back to the page.
pub fn panic_response(view: &SharedView, panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string());
    report_uncaught(view, &detail);
    Redirect::to("/").into_response()
}

fn render(state: &AppState) -> Html<String> {
    let mut view = lock_view(state.shell.view());
    Html(render_page(&mut view, state.auto_refresh))
}
