//! Figure description
//!
//! Serializes to the JSON shape Plotly.js accepts for `Plotly.react`:
//! `{"data": [...traces], "layout": {...}}`.

use super::spec::{BarMode, Orientation};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Trace colors, in assignment order
pub const SERIES_COLORS: [&str; 6] = [
    "#636EFA", // Blue (primary)
    "#EF553B", // Red
    "#00CC96", // Green
    "#AB63FA", // Purple
    "#FFA15A", // Orange
    "#19D3F3", // Cyan
];

/// A renderable chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

impl Figure {
    /// Builder method: animate redraws over `duration_ms`
    pub fn with_transition(mut self, duration_ms: u64) -> Self {
        self.layout.transition = Some(Transition {
            duration: duration_ms,
        });
        self
    }

    /// Total count for a category, summed over all series
    pub fn count_for(&self, category: &str) -> u64 {
        self.data.iter().map(|t| t.count_for(category)).sum()
    }

    /// Total count across every bar
    pub fn total(&self) -> u64 {
        self.data.iter().flat_map(|t| t.counts.iter()).sum()
    }

    /// Categories with at least one bar, in axis order
    pub fn categories(&self) -> Vec<&str> {
        let order = self.layout.category_axis().categoryarray.as_deref();
        let mut seen: Vec<&str> = Vec::new();
        for trace in &self.data {
            for category in &trace.categories {
                if !seen.contains(&category.as_str()) {
                    seen.push(category);
                }
            }
        }
        if let Some(order) = order {
            seen.sort_by_key(|c| {
                order
                    .iter()
                    .position(|o| o.as_str() == *c)
                    .unwrap_or(usize::MAX)
            });
        }
        seen
    }

    /// True when no trace has any bar
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|t| t.categories.is_empty())
    }
}

/// One bar series
#[derive(Debug, Clone, PartialEq)]
pub struct BarTrace {
    /// Legend label; `None` for single-series charts
    pub name: Option<String>,
    pub categories: Vec<String>,
    /// Count per category, parallel to `categories`
    pub counts: Vec<u64>,
    pub orientation: Orientation,
    pub color: &'static str,
}

impl BarTrace {
    pub fn count_for(&self, category: &str) -> u64 {
        self.categories
            .iter()
            .zip(&self.counts)
            .filter(|(c, _)| c.as_str() == category)
            .map(|(_, n)| *n)
            .sum()
    }
}

#[derive(Serialize)]
struct Marker {
    color: &'static str,
}

impl Serialize for BarTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BarTrace", 6)?;
        state.serialize_field("type", "bar")?;
        match &self.name {
            Some(name) => state.serialize_field("name", name)?,
            None => state.skip_field("name")?,
        }
        match self.orientation {
            Orientation::Vertical => {
                state.serialize_field("x", &self.categories)?;
                state.serialize_field("y", &self.counts)?;
            }
            Orientation::Horizontal => {
                state.serialize_field("x", &self.counts)?;
                state.serialize_field("y", &self.categories)?;
            }
        }
        state.serialize_field("orientation", self.orientation.as_str())?;
        state.serialize_field("marker", &Marker { color: self.color })?;
        state.end()
    }
}

/// Chart layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub barmode: BarMode,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(skip)]
    pub orientation: Orientation,
}

impl Layout {
    /// The axis carrying categories
    pub fn category_axis(&self) -> &Axis {
        match self.orientation {
            Orientation::Vertical => &self.xaxis,
            Orientation::Horizontal => &self.yaxis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryOrder {
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "category ascending")]
    CategoryAscending,
}

/// Axis settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<CategoryOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title { text: text.into() },
            categoryorder: None,
            categoryarray: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Milliseconds
    pub duration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trace(orientation: Orientation) -> BarTrace {
        BarTrace {
            name: None,
            categories: vec!["20-29".to_string(), "60-69".to_string()],
            counts: vec![2, 1],
            orientation,
            color: SERIES_COLORS[0],
        }
    }

    #[test]
    fn test_vertical_trace_json() {
        let value = serde_json::to_value(trace(Orientation::Vertical)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "bar",
                "x": ["20-29", "60-69"],
                "y": [2, 1],
                "orientation": "v",
                "marker": {"color": "#636EFA"}
            })
        );
    }

    #[test]
    fn test_horizontal_trace_swaps_axes() {
        let mut t = trace(Orientation::Horizontal);
        t.name = Some("FATAL".to_string());
        let value = serde_json::to_value(t).unwrap();
        assert_eq!(value["name"], "FATAL");
        assert_eq!(value["x"], json!([2, 1]));
        assert_eq!(value["y"], json!(["20-29", "60-69"]));
    }

    #[test]
    fn test_transition_serialized_only_when_set() {
        let figure = Figure {
            data: vec![trace(Orientation::Vertical)],
            layout: Layout {
                barmode: BarMode::Relative,
                xaxis: Axis::titled("age_group"),
                yaxis: Axis::titled("count"),
                legend: None,
                transition: None,
                orientation: Orientation::Vertical,
            },
        };
        let value = serde_json::to_value(&figure).unwrap();
        assert!(value["layout"].get("transition").is_none());

        let value = serde_json::to_value(figure.with_transition(500)).unwrap();
        assert_eq!(value["layout"]["transition"]["duration"], 500);
    }
}
