//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::chart::Figure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================
// CALLBACK DTOs
// ============================================

/// Callback request: the output to recompute and the current input values
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Output property in `id.property` form, e.g. `toronto_case_by_age.figure`
    pub output: String,
    /// Current values of the callback inputs
    #[serde(default)]
    pub inputs: Vec<InputValue>,
}

/// Value of one input property
#[derive(Debug, Deserialize)]
pub struct InputValue {
    pub id: String,
    pub property: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Callback response: new property values keyed by component id
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub response: BTreeMap<String, BTreeMap<String, Figure>>,
}

impl UpdateResponse {
    /// Response carrying a single figure
    pub fn figure(id: impl Into<String>, property: impl Into<String>, figure: Figure) -> Self {
        let mut props = BTreeMap::new();
        props.insert(property.into(), figure);

        let mut response = BTreeMap::new();
        response.insert(id.into(), props);

        Self { response }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "empty"
    pub status: String,
    /// Number of loaded case records
    pub records: usize,
    /// Smallest and largest day offset in the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_range: Option<[i64; 2]>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Version string
    pub version: String,
}
