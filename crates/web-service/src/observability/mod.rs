//! Observability for the web service.
//!
//! Provides metric definitions, the Prometheus recorder bootstrap, and the
//! tracing/telemetry initialization.

pub mod metrics;
pub mod telemetry;
