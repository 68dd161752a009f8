//! User listing handler.

use crate::errors::AppError;
use crate::models::UsersResponse;
use crate::observability::metrics::{record_business_operation, record_error};
use crate::repositories;
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use std::time::Instant;

/// Handler for `GET /api/users`.
///
/// Returns the newest 100 users from the relational store, with timing.
#[tracing::instrument(skip_all, name = "web.users.list")]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersResponse>, AppError> {
    let Some(pool) = &state.pool else {
        return Err(AppError::NotConfigured("Database"));
    };

    let started = Instant::now();
    let users = repositories::users::list_users(pool).await.map_err(|e| {
        record_error("get_users_error");
        record_business_operation("get_users", "error");
        AppError::UserQuery(e.to_string())
    })?;
    let elapsed = started.elapsed();

    record_business_operation("get_users", "success");

    Ok(Json(UsersResponse {
        status: "success",
        count: users.len(),
        data: users,
        response_time_ms: elapsed.as_millis() as u64,
    }))
}
