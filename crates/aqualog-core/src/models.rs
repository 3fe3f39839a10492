//! Domain models for Aqualog
//!
//! API-facing models serialize with camelCase keys (`userId`, `dailyGoal`,
//! `createdAt`) to match the JSON contract of the web UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Daily goal assigned when a user registers without one (liters)
pub const DEFAULT_DAILY_GOAL: i64 = 2000;

/// Theme assigned when a user registers without one
pub const DEFAULT_THEME: &str = "light";

/// A registered user, without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Daily consumption goal in liters (0 disables goal-based alerts)
    pub daily_goal: i64,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "lenient_goal")]
    pub daily_goal: Option<i64>,
    pub theme: Option<String>,
}

/// Partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub daily_goal: Option<i64>,
    pub theme: Option<String>,
}

/// The part of a user the insights engine needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoalProfile {
    pub id: String,
    pub daily_goal: i64,
}

impl From<&User> for UserGoalProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            daily_goal: user.daily_goal,
        }
    }
}

/// A single logged water usage event
///
/// Records may be malformed: `date` and `created_at` are kept as the raw text
/// the store holds, and `liters` is `None` when missing or non-numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_liters")]
    pub liters: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UsageEntry {
    /// Quantity with missing, non-numeric and non-finite values counted as zero
    pub fn liters_or_zero(&self) -> f64 {
        self.liters.filter(|l| l.is_finite()).unwrap_or(0.0)
    }
}

/// Request to log a usage event
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUsageEntry {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_liters")]
    pub liters: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

/// Partial usage update; absent and blank fields are left untouched
///
/// `liters` is `Some(None)` when the key is present but not a number, so the
/// store can reject it instead of keeping the old value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageUpdate {
    pub date: Option<String>,
    #[serde(default, deserialize_with = "present_liters")]
    pub liters: Option<Option<f64>>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Filter for listing usage entries
#[derive(Debug, Clone, Default)]
pub struct UsageFilter {
    pub user_id: Option<String>,
    /// Inclusive lower bound, compared as `YYYY-MM-DD` text
    pub start_date: Option<String>,
    /// Inclusive upper bound, compared as `YYYY-MM-DD` text
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Accept numbers and numeric strings; anything else becomes `None`
fn lenient_liters<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Like [`lenient_liters`], but keeps "sent but unparseable" distinct from null
fn present_liters<'de, D>(deserializer: D) -> std::result::Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value))
}

/// Goals arrive as numbers or numeric strings; fractions round, junk becomes `None`
fn lenient_goal<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|goal| goal.is_finite())
        .map(|goal| goal.round() as i64))
}
