//! # Toronto COVID-19 Dashboard
//!
//! An interactive dashboard over Toronto COVID-19 case records. The case CSV
//! is loaded once, three count histograms are precomputed, and a single page
//! with a "days since first case" slider is served over HTTP.
//!
//! ## Modules
//!
//! - [`data`]: CSV loader and the immutable case table
//! - [`chart`]: count histograms as Plotly-compatible figures
//! - [`layout`]: page tree composition and HTML rendering
//! - [`dashboard`]: shared dashboard state and the slider callback
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toronto_covid::{update_case_by_age, CaseTable};
//!
//! let table = CaseTable::load("toronto_data.csv".as_ref())?;
//!
//! // Cases reported in the first 30 days, by age group
//! let figure = update_case_by_age(&table, 30);
//! println!("{} cases", figure.total());
//! # Ok::<(), toronto_covid::LoadError>(())
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod layout;

// Re-export top-level types for convenience
pub use data::{CaseRecord, CaseTable, Field, LoadError, LoadResult, AGE_ORDER};

pub use chart::{build_histogram, Figure, HistogramSpec};

pub use layout::{compose, render_page, Component};

pub use dashboard::{update_case_by_age, Dashboard, DashboardCharts, Dependency};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoadReport, LogFormat};
