use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub auto_refresh: bool,
    pub refresh_interval_ms: u64,
}

impl DashboardSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    pub toast_duration_ms: u64,
    pub storage_path: String,
    /// Largest multipart body `POST /upload` accepts.
    pub max_upload_bytes: usize,
}

impl UiSettings {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

pub const CONFIG_FILE: &str = "config/dashboard";
pub const ENV_PREFIX: &str = "CHURN_DASHBOARD";
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Defaults, then `config/dashboard.toml` if present, then
/// `CHURN_DASHBOARD__SECTION__KEY` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from(CONFIG_FILE)
}

pub fn load_app_config_from(file: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", "http://localhost:8000/api")?
        .set_default("server.bind", "127.0.0.1:3000")?
        .set_default("dashboard.auto_refresh", false)?
        .set_default("dashboard.refresh_interval_ms", 30_000)?
        .set_default("ui.toast_duration_ms", 3_000)?
        .set_default("ui.storage_path", "data/preferences.json")?
        .set_default("ui.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES)?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    if config.dashboard.refresh_interval_ms == 0 {
        anyhow::bail!("dashboard.refresh_interval_ms must be greater than zero");
    }
    if config.ui.max_upload_bytes == 0 {
        anyhow::bail!("ui.max_upload_bytes must be greater than zero");
    }
    Ok(config)
}
