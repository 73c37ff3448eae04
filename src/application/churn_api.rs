// Port for the analytics backend
use crate::domain::analytics::{
    ClusterAssignments, ClusterSummary, FeatureImportance, ModelMetrics, Predictions,
    RetentionPlan, ScenarioOutcome, ScenarioParams, TrainingStatus, UploadResult,
};
use crate::domain::dashboard::DashboardPayload;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{endpoint} returned a body that is not valid JSON: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not build upload form: {0}")]
    Form(String),
}

/// Every failure mode collapses into `Err`; callers treat it as "no data".
pub type ApiResult<T> = Result<T, ApiError>;

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub contents: bytes::Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, contents: impl Into<bytes::Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// One network request per call, no retries.
#[async_trait]
pub trait ChurnApi: Send + Sync {
    async fn get_dashboard_data(&self) -> ApiResult<DashboardPayload>;

    async fn upload_dataset(&self, file: UploadFile) -> ApiResult<UploadResult>;

    async fn train_model(&self) -> ApiResult<TrainingStatus>;

    async fn get_predictions(&self) -> ApiResult<Predictions>;

    async fn get_model_metrics(&self) -> ApiResult<ModelMetrics>;

    async fn get_feature_importance(&self) -> ApiResult<FeatureImportance>;

    async fn cluster_customers(&self) -> ApiResult<ClusterAssignments>;

    async fn get_cluster_summary(&self) -> ApiResult<ClusterSummary>;

    async fn simulate_scenario(&self, params: &ScenarioParams) -> ApiResult<ScenarioOutcome>;

    async fn generate_retention_strategy(&self) -> ApiResult<RetentionPlan>;
}
