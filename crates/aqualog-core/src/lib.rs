//! Aqualog Core Library
//!
//! Shared functionality for the Aqualog water usage tracker:
//! - Database access and migrations (users, usage log, audit log)
//! - Password hashing for the user store
//! - Usage insights engine (windowed totals, trends, alerts, recommendations)

pub mod auth;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;

pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use insights::{summarize_usage, SummaryResult};
