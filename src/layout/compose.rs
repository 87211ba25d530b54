//! Page composition
//!
//! Builds the one static page tree: a navigation bar, a "Number of Cases"
//! card with a slider, and an "Outcomes" card.

use super::components::{Component, Navbar, Slider, Tab};
use crate::dashboard::DashboardCharts;
use crate::data::CaseTable;

pub const BRAND: &str = "Team-3 COVID-19 Dashboard";
pub const BRAND_HREF: &str = "https://github.com/tenley8/Team-3";

pub const CASES_CARD_TITLE: &str = "Toronto COVID-19 - Number of Cases";
pub const OUTCOMES_CARD_TITLE: &str = "Toronto COVID-19 - Outcomes";
pub const SLIDER_LABEL: &str = "Select Date Since the First Case";

pub const CASES_TABS_ID: &str = "tabs1";
pub const OUTCOMES_TABS_ID: &str = "tabs2";
pub const CASE_BY_AGE_ID: &str = "toronto_case_by_age";
pub const CASE_BY_GENDER_ID: &str = "toronto_case_by_gender";
pub const OUTCOME_BY_AGE_ID: &str = "toronto_outcome_by_age";
pub const DATE_SLIDER_ID: &str = "date-slider";

/// Distance between slider tick marks, in days
pub const SLIDER_MARK_EVERY: i64 = 5;

/// Compose the page tree for `table`
pub fn compose(table: &CaseTable, charts: &DashboardCharts) -> Component {
    Component::Div {
        children: vec![navbar(), body(table, charts)],
    }
}

fn navbar() -> Component {
    Component::Navbar(Navbar {
        brand: BRAND.to_string(),
        href: BRAND_HREF.to_string(),
        color: "dark".to_string(),
        dark: true,
        sticky: Some("top".to_string()),
    })
}

fn body(table: &CaseTable, charts: &DashboardCharts) -> Component {
    Component::Container {
        children: vec![
            Component::Column {
                margin_top: 20,
                children: vec![cases_card(table, charts)],
            },
            Component::Column {
                margin_top: 20,
                children: vec![outcomes_card(charts)],
            },
        ],
    }
}

fn cases_card(table: &CaseTable, charts: &DashboardCharts) -> Component {
    let (min, max) = table.offset_range().unwrap_or((0, 0));

    Component::Card {
        header: CASES_CARD_TITLE.to_string(),
        body: vec![
            Component::Tabs {
                id: CASES_TABS_ID.to_string(),
                tabs: vec![
                    Tab::new(
                        "Age Group",
                        vec![Component::Graph {
                            id: CASE_BY_AGE_ID.to_string(),
                            figure: Some(charts.case_by_age.clone()),
                        }],
                    ),
                    Tab::new(
                        "Gender",
                        vec![Component::Graph {
                            id: CASE_BY_GENDER_ID.to_string(),
                            figure: Some(charts.case_by_gender.clone()),
                        }],
                    ),
                ],
            },
            Component::Label {
                text: SLIDER_LABEL.to_string(),
                class_name: "lead".to_string(),
            },
            Component::Slider(Slider::over(DATE_SLIDER_ID, min, max, SLIDER_MARK_EVERY)),
        ],
    }
}

fn outcomes_card(charts: &DashboardCharts) -> Component {
    Component::Card {
        header: OUTCOMES_CARD_TITLE.to_string(),
        body: vec![Component::Tabs {
            id: OUTCOMES_TABS_ID.to_string(),
            tabs: vec![
                Tab::new(
                    "Age Group",
                    vec![Component::Graph {
                        id: OUTCOME_BY_AGE_ID.to_string(),
                        figure: Some(charts.outcome_by_age.clone()),
                    }],
                ),
                // No per-gender outcome chart yet; the tab renders empty.
                Tab::empty("Gender"),
            ],
        }],
    }
}
