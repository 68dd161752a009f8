//! Database access for the web service.
//!
//! Repositories own the SQL; handlers stay thin.

pub mod users;
