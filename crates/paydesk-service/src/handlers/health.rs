//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Currencies accepted for charging.
    pub accepted_currencies: Vec<String>,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "paydesk".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        accepted_currencies: state
            .payment_service
            .accepted_currencies()
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}
