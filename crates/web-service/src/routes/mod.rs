//! HTTP routes for the web service.
//!
//! Defines the Axum router and application state.

use crate::cache::CacheClient;
use crate::config::Config;
use crate::handlers;
use crate::middleware::{http_metrics_middleware, unmatched_method_to_404};
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
///
/// Built once in `main` and injected everywhere; there is no ambient global
/// connection state. Absent integrations are `None` and their routes answer
/// 503.
pub struct AppState {
    /// Database connection pool, when `DATABASE_URL` is configured.
    pub pool: Option<PgPool>,

    /// Cache client, when `REDIS_URL` is configured and reachable.
    pub cache: Option<CacheClient>,

    /// Service configuration.
    pub config: Config,

    /// Process start instant, for uptime reporting.
    started_at: Instant,

    /// Requests currently in flight.
    active_requests: AtomicU64,
}

impl AppState {
    pub fn new(config: Config, pool: Option<PgPool>, cache: Option<CacheClient>) -> Self {
        AppState {
            pool,
            cache,
            config,
            started_at: Instant::now(),
            active_requests: AtomicU64::new(0),
        }
    }

    /// Seconds since the state was constructed.
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Number of requests currently in flight.
    pub fn active_requests(&self) -> u64 {
        self.active_requests.load(Ordering::Relaxed)
    }

    pub(crate) fn request_started(&self) {
        self.active_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn request_finished(&self) {
        self.active_requests.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/` - Service banner
/// - `/health` - Dependency health aggregation (200 healthy / 503 unhealthy)
/// - `/metrics` - Prometheus scrape endpoint
/// - `/api/status`, `/api/info` - Service metadata
/// - `/api/db/test`, `/api/redis/test` - Dependency diagnostics
/// - `/api/users` - Relational-store listing
/// - TraceLayer for request logging
/// - 30 second request timeout
/// - HTTP metrics middleware recording every response
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let api_routes = Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        .route("/api/status", get(handlers::api_status))
        .route("/api/info", get(handlers::api_info))
        .route("/api/db/test", get(handlers::db_test))
        .route("/api/redis/test", get(handlers::redis_test))
        .route("/api/users", get(handlers::list_users))
        .with_state(state.clone());

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Merge routes and apply global middleware layers
    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    // 3. unmatched_method_to_404 - Method+path match as one unit
    // 4. http_metrics_middleware - Record ALL responses (outermost)
    api_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::map_response(unmatched_method_to_404))
        .layer(middleware::from_fn_with_state(
            state,
            http_metrics_middleware,
        ))
}
