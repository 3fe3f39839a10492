//! Output types for the insights engine
//!
//! Everything here is a derived value: recomputed on every call, never
//! persisted. Keys serialize in camelCase for direct use as a response body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete usage summary for one user at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub totals: Totals,
    pub progress: Progress,
    /// Seven daily points, oldest first
    pub weekly_trend: Vec<DailyUsagePoint>,
    /// Four weekly rollups, oldest first
    pub monthly_trend: Vec<WeeklyUsagePoint>,
    pub category_breakdown: Vec<CategoryShare>,
    /// Up to six entries, most recent first
    pub recent_entries: Vec<RecentEntry>,
    pub alerts: Vec<UsageAlert>,
    /// Never empty
    pub recommendations: Vec<String>,
}

/// Rounded liter totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub today: i64,
    pub week: i64,
    pub month: i64,
    pub goal: i64,
}

/// Progress toward today's goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 0..=200
    pub percentage: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsagePoint {
    /// Three-letter weekday (Sun..Sat)
    pub day: String,
    pub usage: i64,
    /// `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyUsagePoint {
    /// "Week 1" (oldest) through "Week 4" (current)
    pub label: String,
    pub usage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub value: i64,
    /// 0..=100
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub id: String,
    pub liters: Option<f64>,
    pub category: String,
    pub notes: String,
    /// Normalized day, or the raw stored text when it cannot be normalized
    pub date: Option<String>,
}

/// Kind of derived alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Success,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Warning => "warning",
            AlertKind::Success => "success",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived, ephemeral alert
///
/// `read` is always `false` on output. Read state lives only in the consumer
/// and is never fed back into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub date: String,
    pub read: bool,
}
