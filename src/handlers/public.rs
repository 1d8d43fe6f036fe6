use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::database::Store;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Employee Forms API",
            "version": version,
            "description": "Employee records validated against runtime-defined form templates",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "forms": "/api/forms[/:id[/fields]] (protected)",
                "employees": "/api/employees[/:id] (protected)",
                "statistics": "/api/employees/statistics (protected)",
            }
        }
    }))
}

/// GET /health - store health probe
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let backend = state.store.backend_name();

    if let Err(e) = state.store.health_check().await {
        tracing::error!("Health check failed for {} store: {}", backend, e);
        return Err(ApiError::service_unavailable(format!("{} store unavailable", backend)));
    }

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "store": backend
    })))
}
