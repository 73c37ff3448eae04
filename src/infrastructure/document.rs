// In-memory page model: the elements the shell and dashboard write into
use crate::application::chart_manager::ChartSurface;
use crate::domain::chart::ChartConfig;
use crate::domain::dashboard::{KPI_AT_RISK, KPI_AVG_SCORE, KPI_CHURN_RATE, KPI_TOTAL_CUSTOMERS};
use crate::domain::page::Page;
use std::collections::{BTreeMap, BTreeSet};

pub const PAGE_CLASS: &str = "page";
pub const NAV_ITEM_CLASS: &str = "nav-item";
pub const ACTIVE_CLASS: &str = "active";

pub const PAGE_TITLE: &str = "pageTitle";
pub const THEME_TOGGLE: &str = "themeToggle";
pub const FILE_INPUT: &str = "fileInput";
pub const UPLOAD_BUTTON: &str = "uploadBtn";

pub const CHURN_DISTRIBUTION_CHART: &str = "churnDistributionChart";
pub const RETENTION_CHART: &str = "retentionChart";
pub const BEHAVIOR_CHART: &str = "behaviorChart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Section,
    NavItem,
    Heading,
    Text,
    Canvas,
    Button,
    FileInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub tag: Tag,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub data_page: Option<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: Tag) -> Self {
        Self {
            id: id.into(),
            tag,
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            disabled: false,
            data_page: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_data_page(mut self, page: &str) -> Self {
        self.data_page = Some(page.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MountedChart {
    pub element_id: String,
    pub config: ChartConfig,
}

/// Elements keep insertion order; ids are unique.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    body_classes: BTreeSet<String>,
    mounted: BTreeMap<u64, MountedChart>,
    next_instance: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full churn dashboard layout: navigation, page sections, KPI
    /// cards, chart canvases and the upload controls.
    pub fn churn_layout() -> Self {
        let mut doc = Self::new();

        for page in Page::ALL {
            let mut nav = Element::new(format!("nav-{}", page.name()), Tag::NavItem)
                .with_class(NAV_ITEM_CLASS)
                .with_text(page.title())
                .with_data_page(page.name());
            let mut section = Element::new(page.section_id(), Tag::Section).with_class(PAGE_CLASS);
            if page == Page::Dashboard {
                nav.set_class(ACTIVE_CLASS, true);
                section.set_class(ACTIVE_CLASS, true);
            }
            doc.insert(nav);
            doc.insert(section);
        }

        doc.insert(Element::new(PAGE_TITLE, Tag::Heading).with_text(Page::Dashboard.title()));
        doc.insert(Element::new(THEME_TOGGLE, Tag::Button).with_text("🌙"));

        for id in [KPI_TOTAL_CUSTOMERS, KPI_CHURN_RATE, KPI_AT_RISK, KPI_AVG_SCORE] {
            doc.insert(Element::new(id, Tag::Text).with_class("kpi-value").with_text("0"));
        }
        for id in [CHURN_DISTRIBUTION_CHART, RETENTION_CHART, BEHAVIOR_CHART] {
            doc.insert(Element::new(id, Tag::Canvas));
        }

        doc.insert(Element::new(FILE_INPUT, Tag::FileInput));
        doc.insert(Element::new(UPLOAD_BUTTON, Tag::Button).with_text("Upload"));
        doc
    }

    /// Replaces any element with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    /// Returns false when the element does not exist.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements_with_class_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements.iter_mut().filter(move |e| e.has_class(class))
    }

    pub fn nav_item_for_mut(&mut self, page_name: &str) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.data_page.as_deref() == Some(page_name))
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn set_body_class(&mut self, class: &str, on: bool) {
        if on {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    pub fn body_classes(&self) -> impl Iterator<Item = &str> {
        self.body_classes.iter().map(String::as_str)
    }

    pub fn mounted_charts(&self) -> impl Iterator<Item = &MountedChart> {
        self.mounted.values()
    }

    pub fn charts_on(&self, element_id: &str) -> Vec<&ChartConfig> {
        self.mounted
            .values()
            .filter(|m| m.element_id == element_id)
            .map(|m| &m.config)
            .collect()
    }
}

impl ChartSurface for Document {
    fn has_element(&self, element_id: &str) -> bool {
        self.contains(element_id)
    }

    fn mount(&mut self, element_id: &str, config: &ChartConfig) -> u64 {
        self.next_instance += 1;
        self.mounted.insert(
            self.next_instance,
            MountedChart {
                element_id: element_id.to_string(),
                config: config.clone(),
            },
        );
        self.next_instance
    }

    fn release(&mut self, instance: u64) {
        self.mounted.remove(&instance);
    }

    fn redraw(&mut self, instance: u64, config: &ChartConfig) {
        if let Some(mounted) = self.mounted.get_mut(&instance) {
            mounted.config = config.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_manager::ChartManager;

    #[test]
    fn test_churn_layout() {
        let doc = Document::churn_layout();

        assert!(doc.contains("dashboard-page"));
        assert!(doc.contains(RETENTION_CHART));
        assert_eq!(doc.text(PAGE_TITLE), Some("Dashboard"));
        assert!(doc.get("dashboard-page").unwrap().has_class(ACTIVE_CLASS));
        assert!(!doc.get("upload-page").unwrap().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_set_text_on_missing_element() {
        let mut doc = Document::new();
        assert!(!doc.set_text("nowhere", "x"));

        doc.insert(Element::new("here", Tag::Text));
        assert!(doc.set_text("here", "x"));
        assert_eq!(doc.text("here"), Some("x"));
    }

    #[test]
    fn test_repeated_renders_leave_one_mounted_chart() {
        let mut doc = Document::churn_layout();
        let mut charts = ChartManager::new();

        for n in 1..=4 {
            charts.create_pie_chart(&mut doc, BEHAVIOR_CHART, vec!["a".into()], vec![n as f64]);
        }

        let mounted = doc.charts_on(BEHAVIOR_CHART);
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].data.datasets[0].data, vec![4.0]);
    }
}
