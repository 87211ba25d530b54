//! Callback Routes
//!
//! - POST /_dash-update-component - Recompute a callback output
//!
//! The only wired callback is `date-slider.value -> toronto_case_by_age.figure`.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{InputValue, UpdateRequest, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard;
use crate::layout::{CASE_BY_AGE_ID, DATE_SLIDER_ID};

/// POST /_dash-update-component
pub async fn update_component(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let dependency = dashboard::dependencies()
        .into_iter()
        .find(|d| d.output.to_string() == req.output)
        .ok_or_else(|| ApiError::Validation(format!("Unknown callback output '{}'", req.output)))?;

    let slider = find_input(&req.inputs, DATE_SLIDER_ID, "value")?;
    let offset = parse_offset(&slider.value)?;

    let figure = state.dashboard.update_case_by_age(offset);

    tracing::debug!(
        output = %dependency.output,
        offset,
        bars = figure.total(),
        "Callback completed"
    );

    Ok(Json(UpdateResponse::figure(
        CASE_BY_AGE_ID,
        dependency.output.property,
        figure,
    )))
}

fn find_input<'a>(inputs: &'a [InputValue], id: &str, property: &str) -> ApiResult<&'a InputValue> {
    inputs
        .iter()
        .find(|i| i.id == id && i.property == property)
        .ok_or_else(|| ApiError::Validation(format!("Missing input {}.{}", id, property)))
}

/// Slider values arrive as JSON numbers; fractional values round down.
fn parse_offset(value: &serde_json::Value) -> ApiResult<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.is_finite() => Ok(f.floor() as i64),
        _ => Err(ApiError::Validation(format!(
            "Slider value must be a number, got {}",
            value
        ))),
    }
}
