//! HTTP request handlers for the web service.

pub mod diagnostics;
pub mod health;
pub mod info;
pub mod metrics;
pub mod users;

pub use diagnostics::{db_test, redis_test};
pub use health::health_check;
pub use info::{api_info, api_status, home};
pub use metrics::metrics_handler;
pub use users::list_users;
