//! Histogram construction
//!
//! Counts records per category (and per series when the spec has a color
//! column) and lays the result out as bar traces. Works the same for the
//! full table and for any filtered view of it, including an empty one.

use super::figure::{Axis, BarTrace, CategoryOrder, Figure, Layout, Legend, Title, SERIES_COLORS};
use super::spec::{HistogramSpec, Orientation};
use crate::data::{age_rank, CaseRecord, Field, AGE_ORDER};
use std::collections::HashMap;

/// Build a count histogram from `records`
pub fn build_histogram<'a, I>(records: I, spec: &HistogramSpec) -> Figure
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut counts: HashMap<(Option<&'a str>, &'a str), u64> = HashMap::new();
    let mut categories: Vec<&'a str> = Vec::new();
    let mut series: Vec<&'a str> = Vec::new();

    for record in records {
        let category = record.get(spec.category);
        let name = spec.color.map(|field| record.get(field));

        if !categories.contains(&category) {
            categories.push(category);
        }
        if let Some(name) = name {
            if !series.contains(&name) {
                series.push(name);
            }
        }
        *counts.entry((name, category)).or_insert(0) += 1;
    }

    categories.sort_by(|a, b| spec.category.compare(a, b));

    let data = match spec.color {
        None => vec![trace(None, &categories, &counts, spec.orientation, 0)],
        Some(field) => {
            series.sort_by(|a, b| field.compare(a, b));
            series
                .iter()
                .enumerate()
                .map(|(idx, name)| trace(Some(*name), &categories, &counts, spec.orientation, idx))
                .collect()
        }
    };

    Figure {
        data,
        layout: layout(spec, &categories),
    }
}

/// One series; categories this series never hits are left out
fn trace<'a>(
    name: Option<&'a str>,
    categories: &[&'a str],
    counts: &HashMap<(Option<&'a str>, &'a str), u64>,
    orientation: Orientation,
    index: usize,
) -> BarTrace {
    let (categories, counts): (Vec<String>, Vec<u64>) = categories
        .iter()
        .filter_map(|category| {
            counts
                .get(&(name, *category))
                .map(|n| (category.to_string(), *n))
        })
        .unzip();

    BarTrace {
        name: name.map(str::to_string),
        categories,
        counts,
        orientation,
        color: SERIES_COLORS[index % SERIES_COLORS.len()],
    }
}

fn layout(spec: &HistogramSpec, present: &[&str]) -> Layout {
    let mut category_axis = Axis::titled(spec.category.column());
    match spec.category {
        Field::AgeGroup => {
            let mut order: Vec<String> = AGE_ORDER.iter().map(|s| s.to_string()).collect();
            order.extend(
                present
                    .iter()
                    .filter(|c| age_rank(c).is_none())
                    .map(|c| c.to_string()),
            );
            category_axis.categoryorder = Some(CategoryOrder::Array);
            category_axis.categoryarray = Some(order);
        }
        _ => {
            category_axis.categoryorder = Some(CategoryOrder::CategoryAscending);
        }
    }
    let count_axis = Axis::titled("count");

    let (xaxis, yaxis) = match spec.orientation {
        Orientation::Vertical => (category_axis, count_axis),
        Orientation::Horizontal => (count_axis, category_axis),
    };

    Layout {
        barmode: spec.bar_mode,
        xaxis,
        yaxis,
        legend: spec.color.map(|field| Legend {
            title: Title {
                text: field.column().to_string(),
            },
        }),
        transition: None,
        orientation: spec.orientation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(age_group: &str, gender: &str, outcome: &str, offset: i64) -> CaseRecord {
        CaseRecord {
            age_group: age_group.to_string(),
            gender: gender.to_string(),
            outcome: outcome.to_string(),
            episode_date: NaiveDate::from_ymd_opt(2020, 1, 21).unwrap()
                + chrono::Duration::days(offset),
            date_since_first_case: offset,
        }
    }

    fn sample() -> Vec<CaseRecord> {
        vec![
            record("90+", "FEMALE", "FATAL", 0),
            record("20-29", "MALE", "ACTIVE", 1),
            record("19 and younger", "FEMALE", "RESOLVED", 2),
            record("20-29", "FEMALE", "RESOLVED", 3),
            record("60-69", "MALE", "FATAL", 4),
        ]
    }

    #[test]
    fn test_by_age_counts_and_order() {
        let records = sample();
        let figure = build_histogram(&records, &HistogramSpec::by_age());

        assert_eq!(figure.data.len(), 1);
        let trace = &figure.data[0];
        assert_eq!(trace.categories, vec!["19 and younger", "20-29", "60-69", "90+"]);
        assert_eq!(trace.counts, vec![1, 2, 1, 1]);
        assert_eq!(figure.total(), 5);

        let axis = figure.layout.category_axis();
        assert_eq!(axis.categoryorder, Some(CategoryOrder::Array));
        assert_eq!(
            axis.categoryarray.as_deref().unwrap(),
            AGE_ORDER.map(String::from).as_slice()
        );
    }

    #[test]
    fn test_by_gender_ascending() {
        let records = sample();
        let figure = build_histogram(&records, &HistogramSpec::by_gender());

        assert_eq!(figure.data[0].categories, vec!["FEMALE", "MALE"]);
        assert_eq!(figure.count_for("FEMALE"), 3);
        assert_eq!(figure.count_for("MALE"), 2);
        assert_eq!(
            figure.layout.xaxis.categoryorder,
            Some(CategoryOrder::CategoryAscending)
        );
        assert!(figure.layout.xaxis.categoryarray.is_none());
    }

    #[test]
    fn test_age_outcome_series() {
        let records = sample();
        let figure = build_histogram(&records, &HistogramSpec::age_outcome());

        let names: Vec<_> = figure.data.iter().map(|t| t.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["ACTIVE", "FATAL", "RESOLVED"]);

        let fatal = &figure.data[1];
        assert_eq!(fatal.categories, vec!["60-69", "90+"]);
        assert_eq!(fatal.orientation, Orientation::Horizontal);
        assert_ne!(figure.data[0].color, fatal.color);

        assert_eq!(figure.count_for("20-29"), 2);
        assert_eq!(figure.layout.yaxis.title.text, "age_group");
        assert_eq!(figure.layout.xaxis.title.text, "count");
        assert_eq!(figure.layout.legend.as_ref().unwrap().title.text, "outcome");

        let yaxis = &figure.layout.yaxis;
        assert_eq!(yaxis.categoryorder, Some(CategoryOrder::Array));
        assert_eq!(
            yaxis.categoryarray.as_deref().unwrap(),
            AGE_ORDER.map(String::from).as_slice()
        );
        assert!(figure.layout.xaxis.categoryarray.is_none());
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<CaseRecord> = Vec::new();

        let figure = build_histogram(&records, &HistogramSpec::by_age());
        assert_eq!(figure.data.len(), 1);
        assert!(figure.is_empty());
        assert_eq!(figure.total(), 0);
        assert_eq!(
            figure.layout.category_axis().categoryarray.as_ref().unwrap().len(),
            9
        );

        let figure = build_histogram(&records, &HistogramSpec::age_outcome());
        assert!(figure.data.is_empty());
        assert!(figure.is_empty());
    }

    #[test]
    fn test_unknown_age_label_appended() {
        let records = vec![record("", "MALE", "ACTIVE", 0), record("30-39", "MALE", "ACTIVE", 0)];
        let figure = build_histogram(&records, &HistogramSpec::by_age());

        assert_eq!(figure.data[0].categories, vec!["30-39", ""]);
        let order = figure.layout.xaxis.categoryarray.as_ref().unwrap();
        assert_eq!(order.len(), 10);
        assert_eq!(order[9], "");
    }

    #[test]
    fn test_figure_json_shape() {
        let records = sample();
        let figure = build_histogram(&records, &HistogramSpec::by_age());
        let value = serde_json::to_value(&figure).unwrap();

        assert_eq!(value["data"][0]["type"], "bar");
        assert_eq!(value["layout"]["xaxis"]["categoryorder"], "array");
        assert_eq!(value["layout"]["barmode"], "relative");
        assert_eq!(value["layout"]["xaxis"]["categoryarray"][0], "19 and younger");
    }
}
