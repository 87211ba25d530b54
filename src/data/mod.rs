//! Case data
//!
//! Loads the Toronto case CSV into an immutable in-memory table.
//!
//! ## Components
//!
//! - **CaseTable**: the loaded records plus filtering helpers
//! - **CaseRecord**: one reported case
//! - **AGE_ORDER**: the fixed youngest-to-oldest age-group ordering

pub mod error;
pub mod loader;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{parse_episode_date, CaseTable, REQUIRED_COLUMNS};
pub use types::{age_rank, compare_age_labels, sort_age_labels, CaseRecord, Field, AGE_ORDER};
