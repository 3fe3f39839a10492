//! Usage Insights - derived analytics over a user's usage log
//!
//! The engine is a pure function of three inputs: the user's full usage log,
//! their goal profile, and the current instant supplied by the caller. It
//! produces a [`SummaryResult`] with:
//!
//! - **Totals** for today, the trailing 7 days and the trailing 30 days
//! - **Weekly trend** - one point per day for the last 7 days
//! - **Monthly trend** - four trailing 7-day rollups
//! - **Category breakdown** - all-time liters per category
//! - **Recent entries** - the six most recent log entries
//! - **Alerts** and **recommendations** derived from ordered rule tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aqualog_core::insights::summarize_usage;
//!
//! let entries = db.list_usage_for_user(&user.id)?;
//! let summary = summarize_usage(&entries, &(&user).into(), chrono::Utc::now());
//! ```

pub mod dates;
pub mod rules;
pub mod summary;
pub mod types;

pub use dates::{effective_date, normalize_date};
pub use summary::summarize_usage;
pub use types::{
    AlertKind, CategoryShare, DailyUsagePoint, Progress, RecentEntry, SummaryResult, Totals,
    UsageAlert, WeeklyUsagePoint,
};
