//! Dependency health aggregation handler.
//!
//! Probes every configured dependency with a cheap liveness call under its
//! own timeout and folds the results into one report. Overall status maps
//! to the HTTP status code: 200 when healthy, 503 when any configured
//! dependency is unhealthy. Unconfigured dependencies are omitted entirely
//! and cannot degrade the service.

use crate::cache::CacheClient;
use crate::models::{HealthReport, ServiceHealth};
use crate::observability::metrics::{record_business_operation, record_error};
use crate::routes::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Health check handler.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "uptime_seconds": 12.3,
///   "services": {
///     "database": { "status": "healthy", "response_time_ms": 4 },
///     "redis": { "status": "healthy", "response_time_ms": 1 }
///   }
/// }
/// ```
#[tracing::instrument(skip_all, name = "web.health.check")]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let budget = state.config.probe_timeout;

    let (database, redis) = tokio::join!(
        probe_database(state.pool.as_ref(), budget),
        probe_cache(state.cache.as_ref(), budget),
    );

    let mut services = BTreeMap::new();

    if let Some(result) = database {
        if !result.status.is_healthy() {
            tracing::warn!(error = ?result.error, "Database health probe failed");
            record_error("database_health_check");
        }
        services.insert("database".to_string(), result);
    }

    if let Some(result) = redis {
        if !result.status.is_healthy() {
            tracing::warn!(error = ?result.error, "Redis health probe failed");
            record_error("redis_health_check");
        }
        services.insert("redis".to_string(), result);
    }

    let report = HealthReport::new(state.uptime_seconds(), services);
    record_business_operation("health_check", report.status.as_str());

    let status_code = if report.status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(report))
}

/// Probe the database with a trivial query. Returns `None` when no pool is
/// configured.
async fn probe_database(pool: Option<&PgPool>, budget: Duration) -> Option<ServiceHealth> {
    let pool = pool?;
    let started = Instant::now();

    let result = match tokio::time::timeout(budget, sqlx::query("SELECT 1").fetch_one(pool)).await {
        Ok(Ok(_)) => ServiceHealth::healthy(started.elapsed()),
        Ok(Err(e)) => ServiceHealth::unhealthy(e.to_string()),
        Err(_) => ServiceHealth::unhealthy(probe_timeout_message(budget)),
    };

    Some(result)
}

/// Probe the cache with a PING. Returns `None` when no client is configured.
async fn probe_cache(cache: Option<&CacheClient>, budget: Duration) -> Option<ServiceHealth> {
    let cache = cache?;
    let started = Instant::now();

    let result = match tokio::time::timeout(budget, cache.ping()).await {
        Ok(Ok(())) => ServiceHealth::healthy(started.elapsed()),
        Ok(Err(e)) => ServiceHealth::unhealthy(e.to_string()),
        Err(_) => ServiceHealth::unhealthy(probe_timeout_message(budget)),
    };

    Some(result)
}

fn probe_timeout_message(budget: Duration) -> String {
    format!("probe timed out after {}ms", budget.as_millis())
}
