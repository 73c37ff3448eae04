// HTML rendering of the page model. Charts are drawn client-side by Chart.js
use crate::application::view::View;
use crate::domain::dashboard::{KPI_AT_RISK, KPI_AVG_SCORE, KPI_CHURN_RATE, KPI_TOTAL_CUSTOMERS};
use crate::domain::page::Page;
use crate::infrastructure::document::{
    BEHAVIOR_CHART, CHURN_DISTRIBUTION_CHART, Document, Element, FILE_INPUT,
    PAGE_CLASS, PAGE_TITLE, RETENTION_CHART, THEME_TOGGLE, Tag, UPLOAD_BUTTON,
};
use std::fmt::Write;
use std::time::Duration;

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

const KPI_CARDS: [(&str, &str); 4] = [
    (KPI_TOTAL_CUSTOMERS, "Total Customers"),
    (KPI_CHURN_RATE, "Churn Rate"),
    (KPI_AT_RISK, "At-Risk Customers"),
    (KPI_AVG_SCORE, "Avg Churn Score"),
];

const CHART_PANELS: [(&str, &str); 3] = [
    (CHURN_DISTRIBUTION_CHART, "Churn Distribution"),
    (RETENTION_CHART, "Retention by Segment"),
    (BEHAVIOR_CHART, "Behavior Segments"),
];

const STYLE: &str = r#"
:root { --bg-primary: #ffffff; --bg-secondary: #f4f4f8; --text: #1f2937; --accent: #7c3aed; }
body.dark-mode { --bg-primary: #111827; --bg-secondary: #1f2937; --text: #e5e7eb; }
* { box-sizing: border-box; }
body { margin: 0; display: flex; font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; background: var(--bg-secondary); color: var(--text); }
aside { width: 220px; min-height: 100vh; background: var(--bg-primary); padding: 16px; }
.nav-item { display: block; padding: 8px 12px; border-radius: 6px; color: inherit; text-decoration: none; }
.nav-item.active { background: var(--accent); color: #fff; }
main { flex: 1; padding: 24px; }
header { display: flex; justify-content: space-between; align-items: center; }
.page { display: none; }
.page.active { display: block; }
.kpi-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.kpi-card, .chart-panel { background: var(--bg-primary); border-radius: 8px; padding: 16px; }
.kpi-value { font-size: 28px; font-weight: 600; }
.chart-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-top: 16px; }
.toasts { position: fixed; top: 20px; right: 20px; z-index: 9999; }
.alert { padding: 10px 16px; border-radius: 6px; margin-bottom: 8px; color: #fff; }
.alert-info { background: #06b6d4; } .alert-success { background: #10b981; }
.alert-warning { background: #f59e0b; } .alert-danger { background: #ef4444; }
"#;

/// Render the whole page. `auto_refresh` adds a meta refresh while the
/// dashboard is showing.
pub fn render_page(view: &mut View, auto_refresh: Option<Duration>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let doc = &view.document;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if let Some(interval) = auto_refresh.filter(|_| view.session.on_dashboard()) {
        let _ = writeln!(
            html,
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            interval.as_secs().max(1)
        );
    }
    let _ = writeln!(html, "<title>ChurnLogic | {}</title>", escape(doc.text(PAGE_TITLE).unwrap_or("Dashboard")));
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    let _ = writeln!(html, "<script src=\"{}\"></script>", CHART_JS);
    html.push_str("</head>\n");

    let body_classes: Vec<&str> = doc.body_classes().collect();
    let _ = writeln!(html, "<body class=\"{}\">", escape(&body_classes.join(" ")));

    render_nav(&mut html, doc);

    html.push_str("<main>\n<header>\n");
    if let Some(title) = doc.get(PAGE_TITLE) {
        let _ = writeln!(html, "<h1 class=\"page-title\" id=\"{}\">{}</h1>", PAGE_TITLE, escape(&title.text));
    }
    if let Some(toggle) = doc.get(THEME_TOGGLE) {
        let _ = writeln!(
            html,
            "<form method=\"post\" action=\"/theme\"><button id=\"{}\" type=\"submit\">{}</button></form>",
            THEME_TOGGLE,
            escape(&toggle.text)
        );
    }
    html.push_str("</header>\n");

    for section in doc.elements().filter(|e| e.tag == Tag::Section && e.has_class(PAGE_CLASS)) {
        render_section(&mut html, doc, section);
    }
    html.push_str("</main>\n");

    html.push_str("<div class=\"toasts\">\n");
    for toast in view.toasts.active() {
        let _ = writeln!(
            html,
            "<div id=\"toast-{}\" class=\"alert alert-{}\">{}</div>",
            toast.id,
            toast.kind.as_str(),
            escape(&toast.message)
        );
    }
    html.push_str("</div>\n");

    render_chart_scripts(&mut html, &view.document);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_nav(html: &mut String, doc: &Document) {
    html.push_str("<aside>\n<h2>ChurnLogic</h2>\n<nav>\n");
    for item in doc.elements().filter(|e| e.tag == Tag::NavItem) {
        let page = item.data_page.as_deref().unwrap_or_default();
        let _ = writeln!(
            html,
            "<a id=\"{}\" class=\"{}\" href=\"/pages/{}\" data-page=\"{}\">{}</a>",
            escape(&item.id),
            class_list(item),
            urlencoding::encode(page),
            escape(page),
            escape(&item.text)
        );
    }
    html.push_str("</nav>\n</aside>\n");
}

fn render_section(html: &mut String, doc: &Document, section: &Element) {
    let _ = writeln!(html, "<section id=\"{}\" class=\"{}\">", escape(&section.id), class_list(section));

    let page = Page::ALL.into_iter().find(|p| p.section_id() == section.id);
    match page {
        Some(Page::Dashboard) => render_dashboard(html, doc),
        Some(Page::Upload) => render_upload(html, doc),
        Some(Page::Simulation) => render_simulation(html),
        Some(Page::Strategy) => render_strategy(html),
        Some(other) => {
            let _ = writeln!(html, "<p>{} will appear here once a dataset is uploaded.</p>", other.title());
        }
        None => {}
    }

    html.push_str("</section>\n");
}

fn render_dashboard(html: &mut String, doc: &Document) {
    html.push_str("<div class=\"kpi-grid\">\n");
    for (id, label) in KPI_CARDS {
        if let Some(value) = doc.get(id) {
            let _ = writeln!(
                html,
                "<div class=\"kpi-card\"><div class=\"kpi-label\">{}</div><div class=\"kpi-value\" id=\"{}\">{}</div></div>",
                label,
                id,
                escape(&value.text)
            );
        }
    }
    html.push_str("</div>\n<div class=\"chart-grid\">\n");
    for (id, title) in CHART_PANELS {
        if doc.contains(id) {
            let _ = writeln!(
                html,
                "<div class=\"chart-panel\"><h3>{}</h3><canvas id=\"{}\"></canvas></div>",
                title, id
            );
        }
    }
    html.push_str("</div>\n");
    html.push_str(
        "<form method=\"post\" action=\"/refresh\"><button type=\"submit\">Refresh</button></form>\n\
         <form method=\"post\" action=\"/export\"><button type=\"submit\">Export</button></form>\n",
    );
}

fn render_upload(html: &mut String, doc: &Document) {
    html.push_str("<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n");
    if doc.contains(FILE_INPUT) {
        let _ = writeln!(
            html,
            "<input type=\"file\" id=\"{}\" name=\"file\" accept=\".csv\">",
            FILE_INPUT
        );
    }
    if let Some(button) = doc.get(UPLOAD_BUTTON) {
        let _ = writeln!(
            html,
            "<button id=\"{}\" type=\"submit\"{}>{}</button>",
            UPLOAD_BUTTON,
            if button.disabled { " disabled" } else { "" },
            escape(&button.text)
        );
    }
    html.push_str("</form>\n");
}

fn render_simulation(html: &mut String) {
    html.push_str(
        "<form method=\"post\" action=\"/simulate\">\n\
         <label>Price change (%) <input type=\"number\" step=\"any\" name=\"price_change\" value=\"0\"></label>\n\
         <label>Discount (%) <input type=\"number\" step=\"any\" name=\"discount_percentage\" value=\"0\"></label>\n\
         <label>Campaign <input type=\"checkbox\" name=\"campaign_intervention\" value=\"true\"></label>\n\
         <label>Campaign type <input type=\"text\" name=\"campaign_type\"></label>\n\
         <button type=\"submit\">Simulate</button>\n\
         </form>\n",
    );
}

fn render_strategy(html: &mut String) {
    for (action, label) in [
        ("train-model", "Train Model"),
        ("cluster-users", "Cluster Customers"),
        ("generate-retention-strategy", "Generate Retention Strategy"),
    ] {
        let _ = writeln!(
            html,
            "<form method=\"post\" action=\"/actions/{}\"><button type=\"submit\">{}</button></form>",
            action, label
        );
    }
}

fn render_chart_scripts(html: &mut String, doc: &Document) {
    html.push_str("<script>\n");
    for mounted in doc.mounted_charts() {
        let config = match serde_json::to_string(&mounted.config) {
            Ok(json) => json.replace("</", "<\\/"),
            Err(e) => {
                tracing::warn!("Skipping chart {}: {}", mounted.element_id, e);
                continue;
            }
        };
        let _ = writeln!(
            html,
            "new Chart(document.getElementById(\"{}\"), {});",
            escape(&mounted.element_id),
            config
        );
    }
    html.push_str("</script>\n");
}

fn class_list(element: &Element) -> String {
    let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
    escape(&classes.join(" "))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
