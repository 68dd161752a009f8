//! Observability demo web service library.
//!
//! A production-shaped HTTP service that exposes health, status, and metrics
//! endpoints, with optional PostgreSQL and Redis integrations. Every request
//! is timed and recorded into Prometheus-style series; spans are exported
//! over OTLP when an exporter endpoint is configured.
//!
//! # Architecture
//!
//! Handlers stay thin and delegate to repositories and the cache client:
//!
//! ```text
//! routes/mod.rs -> middleware/*.rs -> handlers/*.rs -> repositories/ | cache/
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Request observability middleware
//! - `models` - Response data models
//! - `observability` - Metrics definitions and telemetry bootstrap
//! - `cache` - Redis cache client with retry policy
//! - `repositories` - Database access
//! - `routes` - Axum router setup and application state
//! - `tasks` - Background runtime-metrics sampler

pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod tasks;

/// Service name reported in banners and attached to exported traces.
pub const SERVICE_NAME: &str = "web-service";
