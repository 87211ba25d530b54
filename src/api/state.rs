//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded table, precomputed figures and page tree (read-only)
    pub dashboard: Arc<Dashboard>,
    /// Rendered dashboard page
    pub page: Arc<str>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state for `dashboard`, rendering the page once up front
    pub fn new(dashboard: Dashboard, config: &ServerConfig) -> Self {
        let page: Arc<str> = dashboard.render_page(&config.title).into();

        Self {
            dashboard: Arc::new(dashboard),
            page,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
