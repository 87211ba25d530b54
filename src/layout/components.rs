//! UI component tree
//!
//! A serializable description of the page. The tree has no behavior of its
//! own: it is rendered to HTML by [`super::html`] and sent verbatim as JSON by
//! the layout endpoint.

use crate::chart::Figure;
use serde::Serialize;
use std::collections::BTreeMap;

/// A node in the page tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    /// Plain wrapper
    Div { children: Vec<Component> },
    /// Top navigation bar with a linked brand
    Navbar(Navbar),
    /// Centered page body
    Container { children: Vec<Component> },
    /// Column with a top margin in pixels
    Column {
        margin_top: u32,
        children: Vec<Component>,
    },
    /// Card with a header title and a body
    Card { header: String, body: Vec<Component> },
    /// Tab strip; the first tab starts selected
    Tabs { id: String, tabs: Vec<Tab> },
    /// Chart placeholder; `figure` is `None` until a callback fills it
    Graph {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        figure: Option<Figure>,
    },
    /// Text label
    Label { text: String, class_name: String },
    Slider(Slider),
}

impl Component {
    /// Find a node carrying `id`, searching depth-first
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    /// Identifier of this node, if it has one
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Tabs { id, .. } | Component::Graph { id, .. } => Some(id.as_str()),
            Component::Slider(slider) => Some(slider.id.as_str()),
            _ => None,
        }
    }

    /// Direct children, flattening tab contents
    pub fn children(&self) -> Vec<&Component> {
        match self {
            Component::Div { children }
            | Component::Container { children }
            | Component::Column { children, .. } => children.iter().collect(),
            Component::Card { body, .. } => body.iter().collect(),
            Component::Tabs { tabs, .. } => tabs.iter().flat_map(|t| t.children.iter()).collect(),
            Component::Navbar(_)
            | Component::Graph { .. }
            | Component::Label { .. }
            | Component::Slider(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navbar {
    pub brand: String,
    pub href: String,
    /// Bootstrap color name, e.g. "dark"
    pub color: String,
    pub dark: bool,
    /// "top" keeps the bar pinned while scrolling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    pub children: Vec<Component>,
}

impl Tab {
    pub fn new(label: impl Into<String>, children: Vec<Component>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// A tab with nothing in it
    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

/// Integer range slider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slider {
    pub id: String,
    pub min: i64,
    pub max: i64,
    pub value: i64,
    /// Tick labels keyed by position
    pub marks: BTreeMap<i64, String>,
    /// Increment between selectable values; `None` renders as a step of 1
    pub step: Option<i64>,
}

impl Slider {
    /// Slider over `min..=max` starting at `max`, with a mark every `mark_every`
    /// units from 0 up to (not including) `max`
    pub fn over(id: impl Into<String>, min: i64, max: i64, mark_every: i64) -> Self {
        let marks = if mark_every > 0 {
            (0..max)
                .step_by(mark_every as usize)
                .map(|d| (d, d.to_string()))
                .collect()
        } else {
            BTreeMap::new()
        };

        Self {
            id: id.into(),
            min,
            max,
            value: max,
            marks,
            step: None,
        }
    }
}
