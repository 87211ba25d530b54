//! Page Routes
//!
//! - GET / - The dashboard page
//! - GET /_dash-layout - The page tree as JSON
//! - GET /_dash-dependencies - Callback wiring as JSON

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::{self, Dependency};
use crate::layout::Component;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

/// GET /_dash-layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Component> {
    Json(state.dashboard.layout().clone())
}

/// GET /_dash-dependencies
pub async fn dependencies() -> Json<Vec<Dependency>> {
    Json(dashboard::dependencies())
}
