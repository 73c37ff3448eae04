// Dashboard service - Fetches the dashboard snapshot and pushes it into the view
use crate::application::churn_api::ChurnApi;
use crate::application::toast::ToastKind;
use crate::application::view::{SharedView, View, lock_view, report_uncaught};
use crate::domain::chart::{
    ChartData, ChartKind, ChartSpec, Dataset, IndexAxis, Legend, LegendPosition, Paint,
};
use crate::domain::dashboard::{
    BehaviorSegment, DashboardPayload, DistributionPoint, SegmentRetention,
};
use crate::infrastructure::document::{BEHAVIOR_CHART, CHURN_DISTRIBUTION_CHART, RETENTION_CHART};
use futures::FutureExt;
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

const DISTRIBUTION_COLORS: [&str; 2] = ["#ef4444", "#10b981"];
const RETENTION_COLOR: &str = "#7c3aed";
const BEHAVIOR_COLORS: [&str; 4] = ["#7c3aed", "#06b6d4", "#f59e0b", "#10b981"];
const SLICE_BORDER: &str = "var(--bg-primary)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    /// The API produced no data; the view keeps what it showed before.
    Unavailable,
}

pub struct DashboardService {
    api: Arc<dyn ChurnApi>,
    view: SharedView,
    auto_refresh: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn ChurnApi>, view: SharedView) -> Self {
        Self {
            api,
            view,
            auto_refresh: Mutex::new(None),
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        tracing::debug!("Loading dashboard...");
        match self.api.get_dashboard_data().await {
            Ok(payload) => {
                let mut view = lock_view(&self.view);
                Self::apply(&mut view, &payload);
                view.session.dashboard_data = Some(payload);
                RefreshOutcome::Updated
            }
            Err(e) => {
                tracing::debug!("Dashboard left unchanged: {}", e);
                RefreshOutcome::Unavailable
            }
        }
    }

    /// Write the KPI texts and rebuild the charts whose series are non-empty.
    pub fn apply(view: &mut View, payload: &DashboardPayload) {
        for (element_id, text) in payload.kpis().fields() {
            if !view.document.set_text(element_id, text) {
                tracing::warn!("KPI element not found: {}", element_id);
            }
        }

        // Empty series skip rendering; whatever chart was there stays.
        if !payload.churn_distribution.is_empty() {
            let spec = distribution_spec(&payload.churn_distribution);
            view.charts
                .create_chart(&mut view.document, CHURN_DISTRIBUTION_CHART, ChartKind::Doughnut, spec);
        }
        if !payload.retention_by_segment.is_empty() {
            let spec = retention_spec(&payload.retention_by_segment);
            view.charts
                .create_chart(&mut view.document, RETENTION_CHART, ChartKind::Bar, spec);
        }
        if !payload.behavior_segments.is_empty() {
            let spec = behavior_spec(&payload.behavior_segments);
            view.charts
                .create_chart(&mut view.document, BEHAVIOR_CHART, ChartKind::Pie, spec);
        }
    }

    /// Refresh every `interval`. Ticks do not wait for the previous refresh
    /// to finish. Starting again replaces the running timer. A zero interval
    /// is refused and leaves any running timer alone.
    pub fn start_auto_refresh(self: &Arc<Self>, interval: Duration) -> bool {
        if interval.is_zero() {
            tracing::warn!("Auto-refresh not started: interval must be greater than zero");
            return false;
        }
        let service = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service.guarded_refresh().await;
                });
            }
        });

        let mut slot = self.auto_refresh.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        tracing::info!("Auto-refresh every {} ms", interval.as_millis());
        true
    }

    pub fn stop_auto_refresh(&self) {
        let mut slot = self.auto_refresh.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
            tracing::info!("Auto-refresh stopped");
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        let slot = self.auto_refresh.lock().unwrap_or_else(|p| p.into_inner());
        slot.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Refresh from a background task, routing panics to the global handler.
    pub async fn guarded_refresh(&self) {
        if let Err(panic) = AssertUnwindSafe(self.refresh()).catch_unwind().await {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic during dashboard refresh".to_string());
            report_uncaught(&self.view, &detail);
        }
    }

    pub fn export_dashboard(&self) {
        tracing::info!("Exporting dashboard...");
        lock_view(&self.view)
            .toasts
            .show("Dashboard export feature coming soon!", ToastKind::Info);
    }
}

fn distribution_spec(points: &[DistributionPoint]) -> ChartSpec {
    let dataset = Dataset {
        background_color: Some(Paint::PerPoint(
            DISTRIBUTION_COLORS.iter().map(|c| c.to_string()).collect(),
        )),
        border_color: Some(SLICE_BORDER.to_string()),
        border_width: Some(2),
        ..Dataset::new(points.iter().map(|p| p.value).collect())
    };

    ChartSpec::new(ChartData {
        labels: points.iter().map(|p| p.label.clone()).collect(),
        datasets: vec![dataset],
    })
}

fn retention_spec(segments: &[SegmentRetention]) -> ChartSpec {
    let dataset = Dataset {
        background_color: Some(Paint::Solid(RETENTION_COLOR.to_string())),
        border_color: Some(RETENTION_COLOR.to_string()),
        border_width: Some(1),
        ..Dataset::labeled(
            "Retention Rate (%)",
            segments.iter().map(|s| s.retention_rate).collect(),
        )
    };

    ChartSpec::new(ChartData {
        labels: segments.iter().map(|s| s.segment.clone()).collect(),
        datasets: vec![dataset],
    })
    .with_index_axis(IndexAxis::Y)
    .with_legend(Legend {
        display: true,
        position: None,
    })
    .with_scales(json!({ "x": { "beginAtZero": true, "max": 100 } }))
}

fn behavior_spec(segments: &[BehaviorSegment]) -> ChartSpec {
    let dataset = Dataset {
        background_color: Some(Paint::PerPoint(
            BEHAVIOR_COLORS.iter().map(|c| c.to_string()).collect(),
        )),
        border_color: Some(SLICE_BORDER.to_string()),
        border_width: Some(2),
        ..Dataset::new(segments.iter().map(|s| s.count as f64).collect())
    };

    ChartSpec::new(ChartData {
        labels: segments.iter().map(|s| s.segment.clone()).collect(),
        datasets: vec![dataset],
    })
    .with_legend(Legend {
        display: true,
        position: Some(LegendPosition::Right),
    })
}
