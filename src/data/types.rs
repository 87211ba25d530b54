//! Core data types for the case table
//!
//! - `CaseRecord`: one reported case
//! - `Field`: the categorical columns charts can bucket or color by
//! - `AGE_ORDER`: the youngest-to-oldest age-group ordering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Age-group labels in youngest-to-oldest order
pub const AGE_ORDER: [&str; 9] = [
    "19 and younger",
    "20-29",
    "30-39",
    "40-49",
    "50-59",
    "60-69",
    "70-79",
    "80-89",
    "90+",
];

/// Position of an age-group label in [`AGE_ORDER`], if it is one of the nine bins
pub fn age_rank(label: &str) -> Option<usize> {
    AGE_ORDER.iter().position(|known| *known == label)
}

/// Compare two age-group labels.
///
/// Known bins come first in youngest-to-oldest order. Anything else sorts
/// after them, alphabetically.
pub fn compare_age_labels(a: &str, b: &str) -> Ordering {
    match (age_rank(a), age_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort age-group labels in place using [`compare_age_labels`]
pub fn sort_age_labels<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by(|a, b| compare_age_labels(a.as_ref(), b.as_ref()));
}

/// A single reported case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    /// One of the nine age bins (see [`AGE_ORDER`])
    pub age_group: String,
    pub gender: String,
    /// e.g. ACTIVE, RESOLVED, FATAL
    pub outcome: String,
    pub episode_date: NaiveDate,
    /// Day offset from the first case in the dataset
    pub date_since_first_case: i64,
}

impl CaseRecord {
    /// Value of a categorical column
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::AgeGroup => &self.age_group,
            Field::Gender => &self.gender,
            Field::Outcome => &self.outcome,
        }
    }
}

/// A CSV row before the episode date is parsed
#[derive(Debug, Deserialize)]
pub(crate) struct RawCaseRow {
    pub age_group: String,
    pub gender: String,
    pub outcome: String,
    pub episode_date: String,
    pub date_since_first_case: i64,
}

/// Categorical columns of a case record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AgeGroup,
    Gender,
    Outcome,
}

impl Field {
    /// Column name in the CSV
    pub fn column(&self) -> &'static str {
        match self {
            Field::AgeGroup => "age_group",
            Field::Gender => "gender",
            Field::Outcome => "outcome",
        }
    }

    /// Compare two values of this column for axis ordering
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Field::AgeGroup => compare_age_labels(a, b),
            _ => a.cmp(b),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
