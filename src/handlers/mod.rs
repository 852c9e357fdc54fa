//! # HTTP Handlers
//!
//! Thin axum adapters over the service layer: extract, validate, delegate,
//! translate. One module per entity plus the root/health endpoints here.

pub mod clients;
pub mod properties;
pub mod transactions;

use axum::{Json, extract::State, http::StatusCode};

use crate::db;
use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;

/// Service information endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "service"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Health check backed by a store ping
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 500, description = "Store unreachable", body = ApiError)
    ),
    tag = "service"
)]
pub async fn health(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    db::health_check(&state.db).await.map_err(ApiError::from)?;

    Ok(StatusCode::OK)
}

/// JSON 404 for routes that match nothing.
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "The requested resource was not found")
}

#[cfg(test)]
pub(crate) mod testing {
    use serde_json::Value;

    use crate::server::AppState;
    use crate::services::testing::setup_test_db;

    /// Full router over a fresh in-memory store.
    pub async fn setup_test_app() -> axum::Router {
        let db = setup_test_db().await;
        crate::server::create_app(AppState::new(db))
    }

    pub async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
