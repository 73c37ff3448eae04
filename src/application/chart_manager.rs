// Chart adapter - owns every live chart, keyed by the element it is drawn on
use crate::domain::chart::{
    ChartConfig, ChartData, ChartKind, ChartSpec, Dataset, Paint, SeriesInput, palette_color,
    palette_cycle,
};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_EXPORT_NAME: &str = "chart.json";

const LINE_FILL: &str = "rgba(124, 58, 237, 0.1)";

/// Whatever actually draws charts: mounts a config onto an element and
/// hands back an instance id that can later be redrawn or released.
pub trait ChartSurface {
    fn has_element(&self, element_id: &str) -> bool;

    fn mount(&mut self, element_id: &str, config: &ChartConfig) -> u64;

    fn release(&mut self, instance: u64);

    fn redraw(&mut self, instance: u64, config: &ChartConfig);
}

/// A live chart instance. Only the manager creates or releases these.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    instance: u64,
    element_id: String,
    config: ChartConfig,
}

impl ChartHandle {
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

/// At most one handle per element id: creating a chart on an occupied
/// element releases the old instance first.
#[derive(Debug, Default)]
pub struct ChartManager {
    charts: HashMap<String, ChartHandle>,
}

impl ChartManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_chart<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        kind: ChartKind,
        spec: ChartSpec,
    ) -> Option<&ChartHandle> {
        if !surface.has_element(element_id) {
            tracing::warn!("Chart element not found: {}", element_id);
            return None;
        }

        if let Some(previous) = self.charts.remove(element_id) {
            surface.release(previous.instance);
        }

        let config = ChartConfig::resolve(kind, spec);
        let instance = surface.mount(element_id, &config);
        tracing::debug!("Mounted {} chart on {} (instance {})", kind.as_str(), element_id, instance);

        self.charts.insert(
            element_id.to_string(),
            ChartHandle {
                instance,
                element_id: element_id.to_string(),
                config,
            },
        );
        self.charts.get(element_id)
    }

    pub fn create_line_chart<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        labels: Vec<String>,
        series: Vec<SeriesInput>,
    ) -> Option<&ChartHandle> {
        let datasets = series
            .into_iter()
            .enumerate()
            .map(|(index, s)| Dataset {
                border_color: Some(palette_color(index).to_string()),
                background_color: Some(Paint::Solid(LINE_FILL.to_string())),
                tension: Some(0.3),
                fill: Some(false),
                ..Dataset::labeled(s.label, s.data)
            })
            .collect();

        let spec = ChartSpec::new(ChartData { labels, datasets });
        self.create_chart(surface, element_id, ChartKind::Line, spec)
    }

    pub fn create_bar_chart<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        labels: Vec<String>,
        series: Vec<SeriesInput>,
    ) -> Option<&ChartHandle> {
        let datasets = series
            .into_iter()
            .enumerate()
            .map(|(index, s)| Dataset {
                background_color: Some(Paint::Solid(palette_color(index).to_string())),
                ..Dataset::labeled(s.label, s.data)
            })
            .collect();

        let spec = ChartSpec::new(ChartData { labels, datasets });
        self.create_chart(surface, element_id, ChartKind::Bar, spec)
    }

    pub fn create_pie_chart<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        labels: Vec<String>,
        data: Vec<f64>,
    ) -> Option<&ChartHandle> {
        let spec = Self::sliced_spec(labels, data);
        self.create_chart(surface, element_id, ChartKind::Pie, spec)
    }

    pub fn create_doughnut_chart<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        labels: Vec<String>,
        data: Vec<f64>,
    ) -> Option<&ChartHandle> {
        let spec = Self::sliced_spec(labels, data);
        self.create_chart(surface, element_id, ChartKind::Doughnut, spec)
    }

    fn sliced_spec(labels: Vec<String>, data: Vec<f64>) -> ChartSpec {
        let colors = palette_cycle(data.len());
        let dataset = Dataset {
            background_color: Some(Paint::PerPoint(colors)),
            ..Dataset::new(data)
        };
        ChartSpec::new(ChartData {
            labels,
            datasets: vec![dataset],
        })
    }

    /// Returns whether a chart was tracked for `element_id`.
    pub fn destroy_chart<S: ChartSurface + ?Sized>(&mut self, surface: &mut S, element_id: &str) -> bool {
        match self.charts.remove(element_id) {
            Some(handle) => {
                surface.release(handle.instance);
                true
            }
            None => false,
        }
    }

    pub fn destroy_all<S: ChartSurface + ?Sized>(&mut self, surface: &mut S) {
        for (_, handle) in self.charts.drain() {
            surface.release(handle.instance);
        }
    }

    /// Swap the values of the first dataset and redraw in place.
    pub fn update_chart_data<S: ChartSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        data: Vec<f64>,
    ) -> bool {
        let Some(handle) = self.charts.get_mut(element_id) else {
            return false;
        };
        match handle.config.data.datasets.first_mut() {
            Some(dataset) => dataset.data = data,
            None => handle.config.data.datasets.push(Dataset::new(data)),
        }
        surface.redraw(handle.instance, &handle.config);
        true
    }

    /// Write the live chart's configuration as JSON. `Ok(false)` when no
    /// chart is tracked for `element_id`.
    pub fn export_chart(&self, element_id: &str, path: &Path) -> anyhow::Result<bool> {
        let Some(handle) = self.charts.get(element_id) else {
            return Ok(false);
        };
        let json = serde_json::to_string_pretty(&handle.config)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to export chart {} to {}", element_id, path.display()))?;
        Ok(true)
    }

    pub fn get(&self, element_id: &str) -> Option<&ChartHandle> {
        self.charts.get(element_id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
