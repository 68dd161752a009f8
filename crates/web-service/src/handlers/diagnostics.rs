//! Dependency diagnostic handlers.
//!
//! Explicit probe endpoints for the optional integrations. An unconfigured
//! dependency answers 503 (a capability gap, not a fault); a configured
//! dependency that fails the probe answers 500 and is counted in the error
//! metrics.

use crate::errors::AppError;
use crate::models::{DbTestData, DbTestResponse, RedisTestData, RedisTestResponse};
use crate::observability::metrics::{record_business_operation, record_error};
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::Row;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Database diagnostic handler for `GET /api/db/test`.
///
/// Runs a timed round trip through the pool and reports the server clock
/// and version.
#[tracing::instrument(skip_all, name = "web.db.test")]
pub async fn db_test(State(state): State<Arc<AppState>>) -> Result<Json<DbTestResponse>, AppError> {
    let Some(pool) = &state.pool else {
        return Err(AppError::NotConfigured("Database"));
    };

    let started = Instant::now();
    let row = sqlx::query("SELECT NOW() AS current_time, version() AS postgres_version")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            record_error("database_test_error");
            record_business_operation("database_test", "error");
            AppError::Database(e.to_string())
        })?;
    let elapsed = started.elapsed();

    let current_time: DateTime<Utc> = row.try_get("current_time").map_err(|e| {
        record_error("database_test_error");
        AppError::Database(e.to_string())
    })?;
    let postgres_version: String = row.try_get("postgres_version").map_err(|e| {
        record_error("database_test_error");
        AppError::Database(e.to_string())
    })?;

    record_business_operation("database_test", "success");

    Ok(Json(DbTestResponse {
        status: "success",
        data: DbTestData {
            current_time,
            postgres_version,
        },
        response_time_ms: elapsed.as_millis() as u64,
    }))
}

/// Cache diagnostic handler for `GET /api/redis/test`.
///
/// Round-trips a fresh key: set with a 60 second TTL, read it back, delete
/// it, and report whether the retrieved value matched.
#[tracing::instrument(skip_all, name = "web.redis.test")]
pub async fn redis_test(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RedisTestResponse>, AppError> {
    let Some(cache) = &state.cache else {
        return Err(AppError::NotConfigured("Redis"));
    };

    let test_key = format!("test:{}", Uuid::new_v4());
    let test_value = format!("test_value_{}", Uuid::new_v4().simple());

    let started = Instant::now();
    let round_trip = async {
        cache.set_ex(&test_key, &test_value, 60).await?;
        let retrieved = cache.get(&test_key).await?;
        cache.del(&test_key).await?;
        Ok::<_, redis::RedisError>(retrieved)
    };

    let retrieved_value = round_trip.await.map_err(|e| {
        record_error("redis_test_error");
        record_business_operation("redis_test", "error");
        AppError::Cache(e.to_string())
    })?;
    let elapsed = started.elapsed();

    record_business_operation("redis_test", "success");

    let matched = retrieved_value.as_deref() == Some(test_value.as_str());

    Ok(Json(RedisTestResponse {
        status: "success",
        data: RedisTestData {
            test_key,
            test_value,
            retrieved_value,
            matched,
        },
        response_time_ms: elapsed.as_millis() as u64,
    }))
}
