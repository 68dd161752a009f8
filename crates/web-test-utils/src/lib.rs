//! # Web Service Test Utilities
//!
//! Shared test utilities for the web service.
//!
//! This crate provides:
//! - Server test harness (`TestServer` for E2E tests)
//! - Metric exposition parsing helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use web_test_utils::TestServer;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestServer::spawn().await?;
//!     let client = reqwest::Client::new();
//!
//!     let response = client
//!         .get(format!("{}/health", server.url()))
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod metrics;
pub mod server_harness;

// Re-export commonly used items
pub use metrics::counter_value;
pub use server_harness::*;
