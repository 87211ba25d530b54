//! Chart Builder
//!
//! Turns case records into count histograms described as Plotly-compatible
//! figures. Three fixed views are used by the dashboard:
//!
//! - [`HistogramSpec::by_age`]: cases per age group
//! - [`HistogramSpec::by_gender`]: cases per gender
//! - [`HistogramSpec::age_outcome`]: cases per age group split by outcome

pub mod builder;
pub mod figure;
pub mod spec;

pub use builder::build_histogram;
pub use figure::{Axis, BarTrace, CategoryOrder, Figure, Layout, Legend, Title, Transition};
pub use spec::{BarMode, HistogramSpec, Orientation};
