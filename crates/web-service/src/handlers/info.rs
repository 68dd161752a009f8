//! Service banner and metadata handlers.

use crate::models::{ApiInfoResponse, BannerResponse, RuntimeMetrics, StatusResponse, FEATURES};
use crate::observability::metrics::record_business_operation;
use crate::routes::AppState;
use crate::SERVICE_NAME;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use std::sync::Arc;

/// Banner cache key and time-to-live.
const BANNER_CACHE_KEY: &str = "home_info";
const BANNER_CACHE_TTL_SECONDS: u64 = 300;

/// Service banner handler for `GET /`.
///
/// The rendered banner is also written into the cache (when one is
/// configured) with a short TTL so sibling consumers can read it without
/// hitting this service. The write is best-effort and never fails the
/// request.
#[tracing::instrument(skip_all, name = "web.home")]
pub async fn home(State(state): State<Arc<AppState>>) -> Json<BannerResponse> {
    let banner = BannerResponse {
        message: "Production Observability Demo",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: Utc::now(),
        features: FEATURES,
        metrics: RuntimeMetrics {
            active_connections: state.active_requests(),
            uptime_seconds: state.uptime_seconds(),
        },
    };

    if let Some(cache) = &state.cache {
        match serde_json::to_string(&banner) {
            Ok(serialized) => {
                if let Err(e) = cache
                    .set_ex(BANNER_CACHE_KEY, &serialized, BANNER_CACHE_TTL_SECONDS)
                    .await
                {
                    tracing::debug!(target: "web.cache", error = %e, "Banner cache write failed");
                }
            }
            Err(e) => {
                tracing::debug!(target: "web.cache", error = %e, "Banner serialization failed");
            }
        }
    }

    record_business_operation("home_page_view", "success");

    Json(banner)
}

/// Status handler for `GET /api/status`.
pub async fn api_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "API is running",
        service: SERVICE_NAME,
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Metadata handler for `GET /api/info`.
#[tracing::instrument(skip_all, name = "web.api.info")]
pub async fn api_info(State(state): State<Arc<AppState>>) -> Json<ApiInfoResponse> {
    record_business_operation("api_info_request", "success");

    Json(ApiInfoResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        features: FEATURES,
        uptime_seconds: state.uptime_seconds(),
    })
}
