// Chart domain models, serialized in the shape Chart.js expects
use serde::Serialize;
use serde_json::Value;

pub const PALETTE: [&str; 8] = [
    "#7c3aed", "#06b6d4", "#f59e0b", "#10b981", "#ef4444", "#ec4899", "#8b5cf6", "#06b6d4",
];

/// Palette entry for series `index`, cycling once the palette is exhausted.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One palette color per slice, in slice order.
pub fn palette_cycle(count: usize) -> Vec<String> {
    (0..count).map(|i| palette_color(i).to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            label: None,
            data,
            background_color: None,
            border_color: None,
            border_width: None,
            tension: None,
            fill: None,
        }
    }

    pub fn labeled(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(data)
        }
    }
}

/// Caller-side series description for line and bar charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub label: String,
    pub data: Vec<f64>,
}

impl SeriesInput {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            display: true,
            position: Some(LegendPosition::Bottom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

/// What a caller hands the chart adapter: data plus the few options it may
/// override. Everything else gets the adapter's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub data: ChartData,
    pub maintain_aspect_ratio: Option<bool>,
    pub legend: Option<Legend>,
    pub scales: Option<Value>,
    pub index_axis: Option<IndexAxis>,
}

impl ChartSpec {
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            maintain_aspect_ratio: None,
            legend: None,
            scales: None,
            index_axis: None,
        }
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_scales(mut self, scales: Value) -> Self {
        self.scales = Some(scales);
        self
    }

    pub fn with_index_axis(mut self, axis: IndexAxis) -> Self {
        self.index_axis = Some(axis);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<IndexAxis>,
    pub plugins: Plugins,
    pub scales: Value,
}

/// Fully resolved chart configuration, handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn resolve(kind: ChartKind, spec: ChartSpec) -> Self {
        Self {
            kind,
            data: spec.data,
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: spec.maintain_aspect_ratio != Some(false),
                index_axis: spec.index_axis,
                plugins: Plugins {
                    legend: spec.legend.unwrap_or_default(),
                },
                scales: spec
                    .scales
                    .unwrap_or_else(|| Value::Object(Default::default())),
            },
        }
    }
}
