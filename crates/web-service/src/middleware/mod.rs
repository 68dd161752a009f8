//! Middleware for the web service.
//!
//! # Components
//!
//! - `http_metrics` - Request observability middleware (timing, counters,
//!   histogram, trace span, in-flight gauge)

pub mod http_metrics;

pub use http_metrics::{http_metrics_middleware, unmatched_method_to_404};
