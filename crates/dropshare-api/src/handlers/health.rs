//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, BackendHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let storage = BackendHealth {
        provider: state.storage.provider_type().to_string(),
        healthy: state.storage.health_check().await.unwrap_or(false),
    };
    let database = BackendHealth {
        provider: state.store.provider_type().to_string(),
        healthy: state.store.health_check().await.unwrap_or(false),
    };

    let status = if storage.healthy && database.healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
        database,
    }))
}
