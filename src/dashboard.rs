//! Dashboard
//!
//! Ties the loaded table, the precomputed figures and the page tree together,
//! and holds the single reactive callback: re-filtering the table by day
//! offset and rebuilding the age-group histogram.
//!
//! Everything here is built once at startup and only read afterwards, so a
//! [`Dashboard`] can be shared between requests behind an `Arc` without locks.

use crate::chart::{build_histogram, Figure, HistogramSpec};
use crate::data::CaseTable;
use crate::layout::{self, Component, CASE_BY_AGE_ID, DATE_SLIDER_ID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Redraw animation for callback-produced figures, in milliseconds
pub const TRANSITION_MS: u64 = 500;

/// Figures computed from the full table at startup
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    /// Initial content of the reactive "Age Group" graph
    pub case_by_age: Figure,
    pub case_by_gender: Figure,
    pub outcome_by_age: Figure,
}

impl DashboardCharts {
    pub fn build(table: &CaseTable) -> Self {
        Self {
            case_by_age: build_histogram(table.records(), &HistogramSpec::by_age()),
            case_by_gender: build_histogram(table.records(), &HistogramSpec::by_gender()),
            outcome_by_age: build_histogram(table.records(), &HistogramSpec::age_outcome()),
        }
    }
}

/// Rebuild the age-group histogram from cases reported on or before `offset`.
///
/// An offset below the first case gives an empty chart.
pub fn update_case_by_age(table: &CaseTable, offset: i64) -> Figure {
    let filtered = table.filter_through(offset);
    tracing::debug!(offset, rows = filtered.len(), "Rebuilding case-by-age figure");

    build_histogram(filtered, &HistogramSpec::by_age()).with_transition(TRANSITION_MS)
}

/// A component property, e.g. `date-slider.value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub id: String,
    pub property: String,
}

impl PropertyRef {
    pub fn new(id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.property)
    }
}

/// Callback wiring: when any input changes, the output is recomputed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub output: PropertyRef,
    pub inputs: Vec<PropertyRef>,
}

/// Every callback the page wires up
pub fn dependencies() -> Vec<Dependency> {
    vec![Dependency {
        output: PropertyRef::new(CASE_BY_AGE_ID, "figure"),
        inputs: vec![PropertyRef::new(DATE_SLIDER_ID, "value")],
    }]
}

/// Process-wide dashboard state
#[derive(Debug)]
pub struct Dashboard {
    table: CaseTable,
    charts: DashboardCharts,
    layout: Component,
}

impl Dashboard {
    /// Precompute figures and compose the page for `table`
    pub fn new(table: CaseTable) -> Self {
        let charts = DashboardCharts::build(&table);
        let layout = layout::compose(&table, &charts);

        tracing::info!(
            records = table.len(),
            offset_range = ?table.offset_range(),
            "Dashboard ready"
        );

        Self {
            table,
            charts,
            layout,
        }
    }

    pub fn table(&self) -> &CaseTable {
        &self.table
    }

    pub fn charts(&self) -> &DashboardCharts {
        &self.charts
    }

    pub fn layout(&self) -> &Component {
        &self.layout
    }

    /// Run the slider callback
    pub fn update_case_by_age(&self, offset: i64) -> Figure {
        update_case_by_age(&self.table, offset)
    }

    /// Render the page as HTML
    pub fn render_page(&self, title: &str) -> String {
        layout::render_page(&self.layout, title, &dependencies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "age_group,gender,outcome,episode_date,date_since_first_case
20-29,FEMALE,Active,2020-01-21,0
60-69,MALE,Fatal,2020-01-24,3
20-29,MALE,Active,2020-01-28,7";

    fn table() -> CaseTable {
        CaseTable::from_csv_str(SCENARIO).unwrap()
    }

    #[test]
    fn test_slider_at_three() {
        let figure = update_case_by_age(&table(), 3);

        assert_eq!(figure.total(), 2);
        assert_eq!(figure.count_for("20-29"), 1);
        assert_eq!(figure.count_for("60-69"), 1);
        assert_eq!(figure.categories(), vec!["20-29", "60-69"]);
    }

    #[test]
    fn test_slider_at_zero() {
        let figure = update_case_by_age(&table(), 0);

        assert_eq!(figure.total(), 1);
        assert_eq!(figure.count_for("20-29"), 1);
        assert_eq!(figure.categories(), vec!["20-29"]);
    }

    #[test]
    fn test_below_minimum_is_empty_chart() {
        let figure = update_case_by_age(&table(), -1);

        assert!(figure.is_empty());
        assert_eq!(figure.total(), 0);
        assert_eq!(figure.layout.transition.unwrap().duration, TRANSITION_MS);
    }

    #[test]
    fn test_max_offset_matches_load_time_chart() {
        let table = table();
        let charts = DashboardCharts::build(&table);
        let (_, max) = table.offset_range().unwrap();

        let figure = update_case_by_age(&table, max);

        assert_eq!(table.filter_through(max).len(), table.len());
        assert_eq!(figure.data, charts.case_by_age.data);
        assert_eq!(figure.layout.xaxis, charts.case_by_age.layout.xaxis);
    }

    #[test]
    fn test_counts_monotonic_in_offset() {
        let table = table();
        let totals: Vec<u64> = (-1..=8).map(|d| update_case_by_age(&table, d).total()).collect();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_static_charts_unchanged_by_callback() {
        let dashboard = Dashboard::new(table());
        let before = dashboard.charts().clone();

        for d in [-5, 0, 3, 7, 100] {
            let _ = dashboard.update_case_by_age(d);
        }

        assert_eq!(dashboard.charts(), &before);
    }

    #[test]
    fn test_dependencies() {
        let deps = dependencies();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].output.to_string(), "toronto_case_by_age.figure");
        assert_eq!(deps[0].inputs[0].to_string(), "date-slider.value");
    }
}
