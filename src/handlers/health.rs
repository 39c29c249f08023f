//! Health check handler

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::{database, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    /// `ok` or `unavailable`
    pub status: String,
    pub database: String,
}

/// GET /api/health
///
/// Reports whether the relational store answers. Responds `503` when it does not.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthCheckResponse>) {
    let reachable = match state.connection().await {
        Ok(mut conn) => database::ping(&mut conn).await.is_ok(),
        Err(_) => false,
    };

    if reachable {
        (
            StatusCode::OK,
            Json(HealthCheckResponse {
                status: "ok".to_string(),
                database: "ok".to_string(),
            }),
        )
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthCheckResponse {
                status: "unavailable".to_string(),
                database: "unreachable".to_string(),
            }),
        )
    }
}
