//! Histogram specifications
//!
//! A spec says which column to bucket by, which column (if any) splits the
//! buckets into colored series, and how the bars are laid out. The
//! aggregation is always a record count.

use crate::data::Field;
use serde::{Deserialize, Serialize};

/// Bar direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Categories along x, counts along y
    #[default]
    #[serde(rename = "v")]
    Vertical,
    /// Categories along y, counts along x
    #[serde(rename = "h")]
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "v",
            Orientation::Horizontal => "h",
        }
    }
}

/// How series sharing a category are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Relative,
    Group,
}

/// Count histogram over one categorical column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSpec {
    /// Column whose values become the bars
    pub category: Field,
    /// Column whose values split each bar into series
    pub color: Option<Field>,
    pub orientation: Orientation,
    pub bar_mode: BarMode,
}

impl HistogramSpec {
    /// Count records per value of `category`
    pub fn count_by(category: Field) -> Self {
        Self {
            category,
            color: None,
            orientation: Orientation::Vertical,
            bar_mode: BarMode::Relative,
        }
    }

    /// Builder method: split bars into one series per value of `field`
    pub fn color(mut self, field: Field) -> Self {
        self.color = Some(field);
        self
    }

    /// Builder method: draw bars horizontally
    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    /// Builder method: set the bar mode
    pub fn bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = mode;
        self
    }

    /// Cases per age group
    pub fn by_age() -> Self {
        Self::count_by(Field::AgeGroup)
    }

    /// Cases per gender
    pub fn by_gender() -> Self {
        Self::count_by(Field::Gender)
    }

    /// Cases per age group, one grouped horizontal series per outcome
    pub fn age_outcome() -> Self {
        Self::count_by(Field::AgeGroup)
            .color(Field::Outcome)
            .horizontal()
            .bar_mode(BarMode::Group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_specs() {
        let age = HistogramSpec::by_age();
        assert_eq!(age.category, Field::AgeGroup);
        assert_eq!(age.color, None);
        assert_eq!(age.orientation, Orientation::Vertical);

        let outcome = HistogramSpec::age_outcome();
        assert_eq!(outcome.category, Field::AgeGroup);
        assert_eq!(outcome.color, Some(Field::Outcome));
        assert_eq!(outcome.orientation, Orientation::Horizontal);
        assert_eq!(outcome.bar_mode, BarMode::Group);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Orientation::Horizontal).unwrap(), "\"h\"");
        assert_eq!(serde_json::to_string(&BarMode::Group).unwrap(), "\"group\"");
    }
}
