// HTTP implementation of the analytics backend port
use crate::application::churn_api::{ApiError, ApiResult, ChurnApi, UploadFile};
use crate::domain::analytics::{
    ClusterAssignments, ClusterSummary, FeatureImportance, ModelMetrics, Predictions,
    RetentionPlan, ScenarioOutcome, ScenarioParams, TrainingStatus, UploadResult,
};
use crate::domain::dashboard::DashboardPayload;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct HttpChurnApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChurnApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let request = self.client.get(self.url(endpoint));
        self.execute(endpoint, request).await.inspect_err(|e| {
            tracing::error!("API GET error: {}", e);
        })
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(endpoint)).json(body);
        self.execute(endpoint, request).await.inspect_err(|e| {
            tracing::error!("API POST error: {}", e);
        })
    }

    async fn upload<T: DeserializeOwned>(&self, endpoint: &str, file: UploadFile) -> ApiResult<T> {
        let result = async {
            let part = Part::stream(file.contents)
                .file_name(file.name)
                .mime_str("text/csv")
                .map_err(|e| ApiError::Form(e.to_string()))?;
            let form = Form::new().part("file", part);
            let request = self.client.post(self.url(endpoint)).multipart(form);
            self.execute(endpoint, request).await
        }
        .await;

        result.inspect_err(|e| {
            tracing::error!("Upload error: {}", e);
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let transport = |source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ChurnApi for HttpChurnApi {
    async fn get_dashboard_data(&self) -> ApiResult<DashboardPayload> {
        self.get("/dashboard-data").await
    }

    async fn upload_dataset(&self, file: UploadFile) -> ApiResult<UploadResult> {
        self.upload("/upload-data", file).await
    }

    async fn train_model(&self) -> ApiResult<TrainingStatus> {
        self.post("/train-model", &json!({})).await
    }

    async fn get_predictions(&self) -> ApiResult<Predictions> {
        self.get("/predict-churn").await
    }

    async fn get_model_metrics(&self) -> ApiResult<ModelMetrics> {
        self.get("/model-metrics").await
    }

    async fn get_feature_importance(&self) -> ApiResult<FeatureImportance> {
        self.get("/feature-importance").await
    }

    async fn cluster_customers(&self) -> ApiResult<ClusterAssignments> {
        self.post("/cluster-users", &json!({})).await
    }

    async fn get_cluster_summary(&self) -> ApiResult<ClusterSummary> {
        self.get("/cluster-summary").await
    }

    async fn simulate_scenario(&self, params: &ScenarioParams) -> ApiResult<ScenarioOutcome> {
        self.post("/simulate-scenario", params).await
    }

    async fn generate_retention_strategy(&self) -> ApiResult<RetentionPlan> {
        self.post("/generate-retention-strategy", &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// What the fake backend saw.
    #[derive(Default)]
    struct Seen {
        requests: Mutex<Vec<String>>,
        bodies: Mutex<Vec<Value>>,
        uploads: Mutex<Vec<(String, String, String)>>,
    }

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/", addr)
    }

    fn backend(seen: Arc<Seen>) -> Router {
        let api = Router::new()
            .route(
                "/dashboard-data",
                get(|State(seen): State<Arc<Seen>>| async move {
                    seen.requests.lock().unwrap().push("GET /dashboard-data".into());
                    Json(serde_json::json!({
                        "total_customers": 1200,
                        "churn_rate": 18.3,
                        "at_risk_customers": 95,
                        "avg_churn_score": 3.2,
                        "churn_distribution": [{"label": "Churned", "value": 95}],
                        "retention_by_segment": [],
                        "behavior_segments": []
                    }))
                }),
            )
            .route(
                "/simulate-scenario",
                post(|State(seen): State<Arc<Seen>>, Json(body): Json<Value>| async move {
                    seen.requests.lock().unwrap().push("POST /simulate-scenario".into());
                    seen.bodies.lock().unwrap().push(body);
                    Json(serde_json::json!({"predicted_churn_change": -1.5, "revenue_impact": 2400.0}))
                }),
            )
            .route(
                "/train-model",
                post(|State(seen): State<Arc<Seen>>, Json(body): Json<Value>| async move {
                    seen.requests.lock().unwrap().push("POST /train-model".into());
                    seen.bodies.lock().unwrap().push(body);
                    Json(serde_json::json!({"status": "success"}))
                }),
            )
            .route(
                "/upload-data",
                post(|State(seen): State<Arc<Seen>>, mut multipart: Multipart| async move {
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let text = field.text().await.unwrap();
                        seen.uploads.lock().unwrap().push((name, file_name, text));
                    }
                    Json(serde_json::json!({"status": "success", "rows": 2, "columns": 2, "preview": []}))
                }),
            )
            .route("/model-metrics", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/cluster-summary", get(|| async { "not json".into_response() }))
            .with_state(seen);

        Router::new().nest("/api", api)
    }

    #[tokio::test]
    async fn test_get_dashboard_data() {
        let seen = Arc::new(Seen::default());
        let base = spawn_backend(backend(seen.clone())).await;
        let api = HttpChurnApi::new(base);

        let payload = api.get_dashboard_data().await.unwrap();

        assert_eq!(payload.total_customers, Some(1200));
        assert_eq!(payload.churn_distribution.len(), 1);
        assert_eq!(*seen.requests.lock().unwrap(), vec!["GET /dashboard-data".to_string()]);
    }

    #[tokio::test]
    async fn test_post_sends_json_bodies() {
        let seen = Arc::new(Seen::default());
        let api = HttpChurnApi::new(spawn_backend(backend(seen.clone())).await);

        api.train_model().await.unwrap();
        let params = ScenarioParams {
            price_change: 5.0,
            discount_percentage: 15.0,
            campaign_intervention: true,
            campaign_type: Some("email".into()),
        };
        let outcome = api.simulate_scenario(&params).await.unwrap();

        assert_eq!(outcome.predicted_churn_change, -1.5);
        let bodies = seen.bodies.lock().unwrap();
        assert_eq!(bodies[0], serde_json::json!({}));
        assert_eq!(bodies[1]["campaign_type"], "email");
        assert_eq!(bodies[1]["discount_percentage"], 15.0);
    }

    #[tokio::test]
    async fn test_upload_sends_single_multipart_file_field() {
        let seen = Arc::new(Seen::default());
        let api = HttpChurnApi::new(spawn_backend(backend(seen.clone())).await);

        let result = api
            .upload_dataset(UploadFile::new("data.csv", "a,b\n1,2\n3,4\n"))
            .await
            .unwrap();

        assert!(result.is_success());
        let uploads = seen.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "file");
        assert_eq!(uploads[0].1, "data.csv");
        assert_eq!(uploads[0].2, "a,b\n1,2\n3,4\n");
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let api = HttpChurnApi::new(spawn_backend(backend(Arc::new(Seen::default()))).await);

        match api.get_model_metrics().await {
            Err(ApiError::Status { status, endpoint }) => {
                assert_eq!(status, 500);
                assert_eq!(endpoint, "/model-metrics");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_failure() {
        let api = HttpChurnApi::new(spawn_backend(backend(Arc::new(Seen::default()))).await);

        assert!(matches!(
            api.get_cluster_summary().await,
            Err(ApiError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpChurnApi::new(format!("http://{}/api", addr));
        assert!(matches!(
            api.get_predictions().await,
            Err(ApiError::Transport { .. })
        ));
    }
}
