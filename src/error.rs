//! # Error Handling
//!
//! This module provides unified error handling for the Realty API: a single
//! [`ApiError`] response type and the mappers that translate store, body and
//! validation failures into it. Every fault leaving the service boundary is
//! serialized as `{ statusCode, message, errors? }`.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry;

/// Unified API error response structure.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip)]
    pub status: StatusCode,
    /// HTTP status code, repeated in the body for clients that drop headers
    pub status_code: u16,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation messages (only present for validation failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message.
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            status_code: status.as_u16(),
            message: message.into(),
            errors: None,
        }
    }

    /// Create a 404 error for an id-keyed lookup miss.
    pub fn not_found(resource: &str, id: i32) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{} with id {} was not found", resource, id),
        )
    }

    /// Create a 400 validation error carrying per-field messages.
    pub fn validation(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            message: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self)).into_response()
    }
}

// Error mappers for common sources

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!(
            trace_id = ?telemetry::current_trace_id(),
            "Internal error: {:?}",
            error
        );

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal server error occurred",
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid query string: {}", rejection.body_text()),
        )
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation(crate::validation::field_errors(&errors))
    }
}

/// Maps store errors to the boundary taxonomy: a missed id-keyed lookup is 404,
/// everything else (constraint violations, lost connections, malformed queries)
/// is a generic 500 whose detail is logged but never exposed.
impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        match error {
            sea_orm::DbErr::RecordNotFound(record) => Self::new(
                StatusCode::NOT_FOUND,
                format!("Record not found: {}", record),
            ),
            other => {
                tracing::error!(
                    trace_id = ?telemetry::current_trace_id(),
                    "Database error: {:?}",
                    other
                );
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred",
                )
            }
        }
    }
}
