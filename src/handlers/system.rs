use axum::extract::State;
use chrono::Utc;
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(
        "Customer API",
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health (public)",
                "auth": "/api/auth/register, /api/auth/login, /api/auth/logout (public)",
                "profile": "/api/auth/profile (bearer token)",
                "customers": "/api/customers[/:id] (bearer token)",
            }
        }),
    )
}

/// GET /health - 200 while storage answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    match DatabaseManager::health_check(state.pool()).await {
        Ok(()) => Ok(ApiResponse::success(
            "Service healthy",
            json!({
                "status": "ok",
                "database": "ok",
                "timestamp": Utc::now(),
            }),
        )),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}
