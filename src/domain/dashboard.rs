// Dashboard domain model
use serde::Deserialize;

use crate::util::format::format_number;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistributionPoint {
    pub label: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentRetention {
    pub segment: String,
    #[serde(default)]
    pub retention_rate: f64,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorSegment {
    pub segment: String,
    #[serde(default)]
    pub count: u64,
}

/// Snapshot returned by `/dashboard-data`.
///
/// Every field is optional on the wire; absent KPI values read as zero and
/// absent series read as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    pub total_customers: Option<u64>,
    #[serde(default)]
    pub churn_rate: Option<f64>,
    #[serde(default, alias = "at_risk")]
    pub at_risk_customers: Option<u64>,
    #[serde(default, alias = "avg_score")]
    pub avg_churn_score: Option<f64>,
    #[serde(default)]
    pub churn_distribution: Vec<DistributionPoint>,
    #[serde(default)]
    pub retention_by_segment: Vec<SegmentRetention>,
    #[serde(default)]
    pub behavior_segments: Vec<BehaviorSegment>,
}

impl DashboardPayload {
    pub fn kpis(&self) -> KpiValues {
        KpiValues::from_payload(self)
    }
}

/// The four KPI card texts, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiValues {
    pub total_customers: String,
    pub churn_rate: String,
    pub at_risk_customers: String,
    pub avg_churn_score: String,
}

impl KpiValues {
    pub fn from_payload(payload: &DashboardPayload) -> Self {
        let total = payload.total_customers.unwrap_or(0);
        let churn_rate = payload.churn_rate.unwrap_or(0.0);
        let at_risk = payload.at_risk_customers.unwrap_or(0);
        let avg_score = payload.avg_churn_score.unwrap_or(0.0);

        Self {
            total_customers: format_number(total as f64),
            churn_rate: format!("{:.1}%", churn_rate),
            at_risk_customers: format_number(at_risk as f64),
            avg_churn_score: format!("{:.2}", avg_score),
        }
    }

    /// Pairs of (element id, text) in card order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            (KPI_TOTAL_CUSTOMERS, self.total_customers.as_str()),
            (KPI_CHURN_RATE, self.churn_rate.as_str()),
            (KPI_AT_RISK, self.at_risk_customers.as_str()),
            (KPI_AVG_SCORE, self.avg_churn_score.as_str()),
        ]
    }
}

pub const KPI_TOTAL_CUSTOMERS: &str = "kpiTotalCustomers";
pub const KPI_CHURN_RATE: &str = "kpiChurnRate";
pub const KPI_AT_RISK: &str = "kpiAtRisk";
pub const KPI_AVG_SCORE: &str = "kpiAvgScore";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_formatting() {
        let payload = DashboardPayload {
            total_customers: Some(1200),
            churn_rate: Some(18.3),
            at_risk_customers: Some(95),
            avg_churn_score: Some(3.2),
            ..Default::default()
        };

        let kpis = payload.kpis();
        assert_eq!(kpis.total_customers, "1,200");
        assert_eq!(kpis.churn_rate, "18.3%");
        assert_eq!(kpis.at_risk_customers, "95");
        assert_eq!(kpis.avg_churn_score, "3.20");
    }

    #[test]
    fn test_kpi_rounding() {
        let payload = DashboardPayload {
            churn_rate: Some(23.456),
            avg_churn_score: Some(4.0),
            ..Default::default()
        };

        let kpis = payload.kpis();
        assert_eq!(kpis.churn_rate, "23.5%");
        assert_eq!(kpis.avg_churn_score, "4.00");
    }

    #[test]
    fn test_missing_fields_read_as_zero() {
        let payload: DashboardPayload = serde_json::from_str("{}").unwrap();
        let kpis = payload.kpis();

        assert_eq!(kpis.total_customers, "0");
        assert_eq!(kpis.churn_rate, "0.0%");
        assert_eq!(kpis.at_risk_customers, "0");
        assert_eq!(kpis.avg_churn_score, "0.00");
        assert!(payload.churn_distribution.is_empty());
    }

    #[test]
    fn test_backend_short_names() {
        let json = r#"{
            "total_customers": 40,
            "churn_rate": 12.5,
            "at_risk": 5,
            "avg_score": 0.13,
            "churn_distribution": [{"label": "Churned", "value": 5}, {"label": "Retained", "value": 35}],
            "retention_by_segment": [{"segment": "New (0-6m)", "retention_rate": 80.0, "count": 10}],
            "behavior_segments": [{"segment": "Budget", "count": 12}]
        }"#;

        let payload: DashboardPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.at_risk_customers, Some(5));
        assert_eq!(payload.avg_churn_score, Some(0.13));
        assert_eq!(payload.churn_distribution.len(), 2);
        assert_eq!(payload.retention_by_segment[0].count, Some(10));
        assert_eq!(payload.behavior_segments[0].count, 12);
    }
}
