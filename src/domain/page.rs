// Page (navigation section) domain model

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Upload,
    ChurnAnalysis,
    Behavior,
    Simulation,
    Strategy,
    Insights,
}

pub const DEFAULT_TITLE: &str = "Dashboard";

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Upload,
        Page::ChurnAnalysis,
        Page::Behavior,
        Page::Simulation,
        Page::Strategy,
        Page::Insights,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Upload => "upload",
            Page::ChurnAnalysis => "churn-analysis",
            Page::Behavior => "behavior",
            Page::Simulation => "simulation",
            Page::Strategy => "strategy",
            Page::Insights => "insights",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Upload => "Upload Data",
            Page::ChurnAnalysis => "Churn Analysis",
            Page::Behavior => "Behavior Analytics",
            Page::Simulation => "Simulation Studio",
            Page::Strategy => "AI Strategy",
            Page::Insights => "Insights",
        }
    }

    /// Element id of the page section.
    pub fn section_id(&self) -> String {
        section_id(self.name())
    }
}

pub fn section_id(name: &str) -> String {
    format!("{}-page", name)
}

/// Title for an arbitrary page name; unknown names fall back to the default.
pub fn title_for(name: &str) -> &'static str {
    Page::from_name(name)
        .map(|page| page.title())
        .unwrap_or(DEFAULT_TITLE)
}
