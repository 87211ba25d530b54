//! Layout Composer
//!
//! Declarative page description for the dashboard.
//!
//! - [`compose`]: builds the component tree once at startup
//! - [`render_page`]: renders the tree to an HTML document

pub mod components;
pub mod compose;
pub mod html;

pub use components::{Component, Navbar, Slider, Tab};
pub use compose::{
    compose, CASE_BY_AGE_ID, CASE_BY_GENDER_ID, DATE_SLIDER_ID, OUTCOME_BY_AGE_ID,
};
pub use html::{render_page, UPDATE_PATH};
