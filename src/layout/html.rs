//! HTML rendering of the page tree
//!
//! Produces a single Bootstrap page. Figures are embedded as JSON and drawn
//! with Plotly.js; every callback dependency is wired to a `change` listener
//! that posts the input value to the update endpoint and redraws the output.

use super::components::{Component, Navbar, Slider, Tab};
use crate::chart::Figure;
use crate::dashboard::Dependency;
use std::collections::BTreeMap;
use std::fmt::Write;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Path the page posts callback inputs to
pub const UPDATE_PATH: &str = "/_dash-update-component";

const PAGE_SCRIPT: &str = r#"
(function() {
    function readJson(id) {
        return JSON.parse(document.getElementById(id).textContent);
    }

    const figures = readJson('figures');
    for (const [id, fig] of Object.entries(figures)) {
        Plotly.newPlot(id, fig.data, fig.layout, {responsive: true});
    }

    const updatePath = document.body.dataset.updatePath;
    // Latest request per output; older responses are dropped
    const latest = {};
    for (const dep of readJson('dependencies')) {
        for (const input of dep.inputs) {
            const el = document.getElementById(input.id);
            const shown = document.getElementById(input.id + '-value');
            if (!el) continue;
            el.addEventListener('input', () => { if (shown) shown.textContent = el.value; });
            el.addEventListener('change', async () => {
                const outputId = dep.output.id;
                const seq = (latest[outputId] || 0) + 1;
                latest[outputId] = seq;
                const res = await fetch(updatePath, {
                    method: 'POST',
                    headers: {'Content-Type': 'application/json'},
                    body: JSON.stringify({
                        output: dep.output.id + '.' + dep.output.property,
                        inputs: dep.inputs.map(i => ({
                            id: i.id,
                            property: i.property,
                            value: Number(document.getElementById(i.id).value),
                        })),
                    }),
                });
                const body = await res.json();
                if (seq !== latest[outputId]) return;
                if (!res.ok) {
                    console.error('Callback failed', body);
                    return;
                }
                const fig = body.response[outputId][dep.output.property];
                Plotly.react(outputId, fig.data, fig.layout);
            });
        }
    }

    document.querySelectorAll('button[data-bs-toggle="tab"]').forEach(btn => {
        btn.addEventListener('shown.bs.tab', () => window.dispatchEvent(new Event('resize')));
    });
})();
"#;

/// Render the full HTML document for `tree`
pub fn render_page(tree: &Component, title: &str, dependencies: &[Dependency]) -> String {
    let mut figures = BTreeMap::new();
    let mut body = String::new();
    render(tree, &mut body, &mut figures);

    let figures_json = script_json(&figures);
    let dependencies_json = script_json(&dependencies);

    let mut page = String::new();
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{css}">
    <script src="{plotly}"></script>
</head>
<body data-update-path="{update}">
{body}
<script type="application/json" id="figures">{figures_json}</script>
<script type="application/json" id="dependencies">{dependencies_json}</script>
<script src="{js}"></script>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        plotly = PLOTLY_JS,
        update = UPDATE_PATH,
        js = BOOTSTRAP_JS,
        script = PAGE_SCRIPT,
    );
    page
}

fn render<'a>(node: &'a Component, out: &mut String, figures: &mut BTreeMap<&'a str, &'a Figure>) {
    match node {
        Component::Div { children } => {
            out.push_str("<div>\n");
            render_all(children, out, figures);
            out.push_str("</div>\n");
        }
        Component::Navbar(navbar) => render_navbar(navbar, out),
        Component::Container { children } => {
            out.push_str("<div class=\"container\">\n");
            render_all(children, out, figures);
            out.push_str("</div>\n");
        }
        Component::Column {
            margin_top,
            children,
        } => {
            let _ = writeln!(out, "<div class=\"col\" style=\"margin-top: {margin_top}px\">");
            render_all(children, out, figures);
            out.push_str("</div>\n");
        }
        Component::Card { header, body } => {
            let _ = writeln!(
                out,
                "<div class=\"card\">\n<div class=\"card-header\"><h5>{}</h5></div>\n<div class=\"card-body\">",
                escape(header)
            );
            render_all(body, out, figures);
            out.push_str("</div>\n</div>\n");
        }
        Component::Tabs { id, tabs } => render_tabs(id, tabs, out, figures),
        Component::Graph { id, figure } => {
            if let Some(figure) = figure {
                figures.insert(id.as_str(), figure);
            }
            let _ = writeln!(
                out,
                "<div class=\"graph\" id=\"{}\" style=\"min-height: 450px\"></div>",
                escape(id)
            );
        }
        Component::Label { text, class_name } => {
            let _ = writeln!(
                out,
                "<label class=\"{}\" style=\"margin-top: 10px\">{}</label>",
                escape(class_name),
                escape(text)
            );
        }
        Component::Slider(slider) => render_slider(slider, out),
    }
}

fn render_all<'a>(
    nodes: &'a [Component],
    out: &mut String,
    figures: &mut BTreeMap<&'a str, &'a Figure>,
) {
    for node in nodes {
        render(node, out, figures);
    }
}

fn render_navbar(navbar: &Navbar, out: &mut String) {
    let theme = if navbar.dark { "navbar-dark" } else { "navbar-light" };
    let sticky = match navbar.sticky.as_deref() {
        Some(position) => format!(" sticky-{}", escape(position)),
        None => String::new(),
    };
    let _ = writeln!(
        out,
        "<nav class=\"navbar {theme} bg-{color}{sticky}\">\n<div class=\"container-fluid\">\n<a href=\"{href}\" style=\"text-decoration: none\"><span class=\"navbar-brand ms-2\">{brand}</span></a>\n</div>\n</nav>",
        color = escape(&navbar.color),
        href = escape(&navbar.href),
        brand = escape(&navbar.brand),
    );
}

fn render_tabs<'a>(
    id: &str,
    tabs: &'a [Tab],
    out: &mut String,
    figures: &mut BTreeMap<&'a str, &'a Figure>,
) {
    let id = escape(id);

    let _ = writeln!(out, "<ul class=\"nav nav-tabs\" id=\"{id}\" role=\"tablist\">");
    for (idx, tab) in tabs.iter().enumerate() {
        let active = if idx == 0 { " active" } else { "" };
        let _ = writeln!(
            out,
            "<li class=\"nav-item\" role=\"presentation\"><button class=\"nav-link{active}\" data-bs-toggle=\"tab\" data-bs-target=\"#{id}-pane-{idx}\" type=\"button\" role=\"tab\">{}</button></li>",
            escape(&tab.label)
        );
    }
    out.push_str("</ul>\n<div class=\"tab-content\">\n");

    for (idx, tab) in tabs.iter().enumerate() {
        let active = if idx == 0 { " show active" } else { "" };
        let _ = writeln!(
            out,
            "<div class=\"tab-pane fade{active}\" id=\"{id}-pane-{idx}\" role=\"tabpanel\">"
        );
        render_all(&tab.children, out, figures);
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
}

fn render_slider(slider: &Slider, out: &mut String) {
    let id = escape(&slider.id);
    let step = slider.step.unwrap_or(1);

    let _ = writeln!(
        out,
        "<div class=\"d-flex align-items-center gap-3\">\n<input type=\"range\" class=\"form-range\" id=\"{id}\" min=\"{}\" max=\"{}\" value=\"{}\" step=\"{step}\" list=\"{id}-marks\">\n<output id=\"{id}-value\">{}</output>\n</div>",
        slider.min, slider.max, slider.value, slider.value
    );

    let _ = writeln!(out, "<datalist id=\"{id}-marks\">");
    for (position, label) in &slider.marks {
        let _ = writeln!(
            out,
            "<option value=\"{position}\" label=\"{}\"></option>",
            escape(label)
        );
    }
    out.push_str("</datalist>\n");
}

/// JSON safe to embed inside a `<script>` element
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{self, DashboardCharts};
    use crate::data::CaseTable;
    use crate::layout::compose;

    const SAMPLE: &str = "age_group,gender,outcome,episode_date,date_since_first_case
20-29,FEMALE,ACTIVE,2020-01-21,0
60-69,MALE,FATAL,2020-01-24,3
20-29,MALE,ACTIVE,2020-01-28,7";

    fn page() -> String {
        let table = CaseTable::from_csv_str(SAMPLE).unwrap();
        let charts = DashboardCharts::build(&table);
        let tree = compose::compose(&table, &charts);
        render_page(&tree, "Dashboard", &dashboard::dependencies())
    }

    #[test]
    fn test_page_contains_layout() {
        let html = page();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Toronto COVID-19 - Number of Cases"));
        assert!(html.contains("Toronto COVID-19 - Outcomes"));
        assert!(html.contains("id=\"toronto_case_by_age\""));
        assert!(html.contains("id=\"date-slider\" min=\"0\" max=\"7\" value=\"7\""));
        assert!(html.contains("<option value=\"5\" label=\"5\"></option>"));
        assert!(html.contains("sticky-top"));
    }

    #[test]
    fn test_figures_embedded() {
        let html = page();
        let start = html.find("id=\"figures\">").unwrap() + "id=\"figures\">".len();
        let end = start + html[start..].find("</script>").unwrap();
        let figures: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();

        for id in ["toronto_case_by_age", "toronto_case_by_gender", "toronto_outcome_by_age"] {
            assert!(figures.get(id).is_some(), "figure {id} missing");
        }
    }

    #[test]
    fn test_slider_without_step_moves_by_one() {
        let html = page();
        assert!(html.contains("value=\"7\" step=\"1\" list=\"date-slider-marks\""));
    }

    #[test]
    fn test_callback_ignores_stale_responses() {
        let html = page();
        let guard = html.find("if (seq !== latest[outputId]) return;").unwrap();
        let redraw = html.find("Plotly.react(outputId").unwrap();
        assert!(guard < redraw);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let json = script_json(&vec!["</script>"]);
        assert!(!json.contains("</script>"));
    }
}
