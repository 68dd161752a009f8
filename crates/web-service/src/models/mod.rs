//! Response data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Feature list reported by the banner and info endpoints.
pub const FEATURES: &[&str] = &[
    "Production HTTP Server",
    "PostgreSQL Integration",
    "Redis Caching",
    "Prometheus Metrics",
    "Distributed Tracing (OTLP)",
    "Graceful Shutdown",
];

/// Health status of the service or one of its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Result of probing a single dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Probe outcome ("healthy" or "unhealthy").
    pub status: HealthStatus,

    /// Probe round-trip time in milliseconds (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,

    /// Short failure message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// A successful probe with its measured round-trip time.
    pub fn healthy(elapsed: Duration) -> Self {
        ServiceHealth {
            status: HealthStatus::Healthy,
            response_time_ms: Some(elapsed.as_millis() as u64),
            error: None,
        }
    }

    /// A failed probe with a short error message.
    pub fn unhealthy(error: String) -> Self {
        ServiceHealth {
            status: HealthStatus::Unhealthy,
            response_time_ms: None,
            error: Some(error),
        }
    }
}

/// Point-in-time health report returned by `/health`.
///
/// Overall status is unhealthy iff at least one probed dependency is
/// unhealthy. Dependencies that are not configured contribute no entry and
/// cannot degrade the overall status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: f64,
    pub services: BTreeMap<String, ServiceHealth>,
}

impl HealthReport {
    /// Build a report from per-dependency probe results, computing the
    /// overall status.
    pub fn new(uptime_seconds: f64, services: BTreeMap<String, ServiceHealth>) -> Self {
        let status = if services.values().any(|s| !s.status.is_healthy()) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        HealthReport {
            status,
            timestamp: Utc::now(),
            uptime_seconds,
            services,
        }
    }
}

/// Runtime numbers included in the banner.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeMetrics {
    pub active_connections: u64,
    pub uptime_seconds: f64,
}

/// Service banner returned by `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
    pub features: &'static [&'static str],
    pub metrics: RuntimeMetrics,
}

/// Response for `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// Service metadata returned by `GET /api/info`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub features: &'static [&'static str],
    pub uptime_seconds: f64,
}

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response for `GET /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub status: &'static str,
    pub data: Vec<User>,
    pub count: usize,
    pub response_time_ms: u64,
}

/// Diagnostic payload for `GET /api/db/test`.
#[derive(Debug, Clone, Serialize)]
pub struct DbTestData {
    pub current_time: DateTime<Utc>,
    pub postgres_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DbTestResponse {
    pub status: &'static str,
    pub data: DbTestData,
    pub response_time_ms: u64,
}

/// Diagnostic payload for `GET /api/redis/test`.
#[derive(Debug, Clone, Serialize)]
pub struct RedisTestData {
    pub test_key: String,
    pub test_value: String,
    pub retrieved_value: Option<String>,
    #[serde(rename = "match")]
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedisTestResponse {
    pub status: &'static str,
    pub data: RedisTestData,
    pub response_time_ms: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_no_services_is_healthy() {
        let report = HealthReport::new(1.5, BTreeMap::new());

        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.services.is_empty());
    }

    #[test]
    fn test_report_all_healthy() {
        let mut services = BTreeMap::new();
        services.insert(
            "database".to_string(),
            ServiceHealth::healthy(Duration::from_millis(4)),
        );
        services.insert(
            "redis".to_string(),
            ServiceHealth::healthy(Duration::from_millis(1)),
        );

        let report = HealthReport::new(10.0, services);

        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.services.len(), 2);
    }

    #[test]
    fn test_single_unhealthy_dependency_flips_overall_status() {
        let mut services = BTreeMap::new();
        services.insert(
            "database".to_string(),
            ServiceHealth::healthy(Duration::from_millis(4)),
        );
        services.insert(
            "redis".to_string(),
            ServiceHealth::unhealthy("connection refused".to_string()),
        );

        let report = HealthReport::new(10.0, services);

        assert_eq!(report.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_service_health_constructors() {
        let healthy = ServiceHealth::healthy(Duration::from_millis(12));
        assert_eq!(healthy.status, HealthStatus::Healthy);
        assert_eq!(healthy.response_time_ms, Some(12));
        assert!(healthy.error.is_none());

        let unhealthy = ServiceHealth::unhealthy("timed out".to_string());
        assert_eq!(unhealthy.status, HealthStatus::Unhealthy);
        assert!(unhealthy.response_time_ms.is_none());
        assert_eq!(unhealthy.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_health_report_serialization() {
        let mut services = BTreeMap::new();
        services.insert(
            "database".to_string(),
            ServiceHealth::healthy(Duration::from_millis(3)),
        );

        let report = HealthReport::new(42.0, services);
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"database\""));
        assert!(json.contains("\"response_time_ms\":3"));
        // Error field is omitted on success
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_unhealthy_service_serialization() {
        let unhealthy = ServiceHealth::unhealthy("connection refused".to_string());
        let json = serde_json::to_string(&unhealthy).unwrap();

        assert!(json.contains("\"status\":\"unhealthy\""));
        assert!(json.contains("\"error\":\"connection refused\""));
        assert!(!json.contains("response_time_ms"));
    }

    #[test]
    fn test_redis_test_data_renames_match_field() {
        let data = RedisTestData {
            test_key: "test:abc".to_string(),
            test_value: "v".to_string(),
            retrieved_value: Some("v".to_string()),
            matched: true,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"match\":true"));
        assert!(!json.contains("matched"));
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(HealthStatus::Healthy.as_str(), "healthy");
        assert_eq!(HealthStatus::Unhealthy.as_str(), "unhealthy");
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Unhealthy.is_healthy());
    }
}
