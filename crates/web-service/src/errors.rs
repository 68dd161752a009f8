//! Service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Error
//! messages returned to clients are short and generic; driver-level details
//! are logged server-side only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Service error type.
///
/// Maps to HTTP status codes:
/// - NotConfigured: 503 Service Unavailable (capability gap, not a fault)
/// - Database, Cache, UserQuery: 500 Internal Server Error (probe/query failure)
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("User query error: {0}")]
    UserQuery(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotConfigured(_) => 503,
            AppError::Database(_) | AppError::Cache(_) | AppError::UserQuery(_) => 500,
            AppError::Internal => 500,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotConfigured(capability) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} not configured", capability),
            ),
            AppError::Database(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "web.db", error = %err, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database connection failed".to_string(),
                )
            }
            AppError::Cache(err) => {
                tracing::error!(target: "web.cache", error = %err, "Redis operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Redis operation failed".to_string(),
                )
            }
            AppError::UserQuery(err) => {
                tracing::error!(target: "web.db", error = %err, "User query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve users".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Convert sqlx errors to AppError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}
