// Response and request models for the analytics backend
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a dataset upload. Only `status == "success"` counts as accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    pub status: String,
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub columns: u64,
    #[serde(default)]
    pub preview: Vec<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingStatus {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Predictions {
    #[serde(default)]
    pub predictions: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelMetrics {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1_score: f64,
    #[serde(default)]
    pub roc_auc: f64,
}

pub type FeatureImportance = Vec<Value>;

pub type ClusterSummary = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusterAssignments {
    #[serde(default)]
    pub clusters: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub price_change: f64,
    pub discount_percentage: f64,
    pub campaign_intervention: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioOutcome {
    #[serde(default)]
    pub predicted_churn_change: f64,
    #[serde(default)]
    pub revenue_impact: f64,
    #[serde(default)]
    pub scenario_comparison: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetentionPlan {
    #[serde(default)]
    pub strategies: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_result_status() {
        let ok: UploadResult =
            serde_json::from_str(r#"{"status": "success", "rows": 10, "columns": 4, "preview": []}"#).unwrap();
        assert!(ok.is_success());
        assert_eq!((ok.rows, ok.columns), (10, 4));

        let failed: UploadResult =
            serde_json::from_str(r#"{"status": "error", "message": "bad utf-8"}"#).unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.message.as_deref(), Some("bad utf-8"));
    }

    #[test]
    fn test_scenario_params_omit_missing_campaign() {
        let params = ScenarioParams {
            price_change: -5.0,
            discount_percentage: 10.0,
            campaign_intervention: true,
            campaign_type: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("campaign_type").is_none());
        assert_eq!(value["discount_percentage"], 10.0);
    }
}
