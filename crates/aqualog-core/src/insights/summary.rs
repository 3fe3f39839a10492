//! Usage summary - turns a raw usage log into windowed analytics

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{UsageEntry, UserGoalProfile};

use super::dates::{day_key, effective_date, effective_instant};
use super::rules::{derive_alerts, derive_recommendations, UsageSnapshot};
use super::types::{
    CategoryShare, DailyUsagePoint, Progress, RecentEntry, SummaryResult, Totals, WeeklyUsagePoint,
};

/// Days in the weekly trend and weekly total (including today)
pub const WEEK_DAYS: i64 = 7;

/// Days in the monthly total (including today)
pub const MONTH_DAYS: i64 = 30;

/// Number of rollup periods in the monthly trend
pub const ROLLUP_PERIODS: i64 = 4;

/// Maximum entries in `recent_entries`
pub const RECENT_LIMIT: usize = 6;

/// Progress percentage cap
pub const MAX_PROGRESS_PERCENT: f64 = 200.0;

/// Liters accumulated over valid-dated entries
#[derive(Debug, Default)]
struct Accumulated {
    today: f64,
    week: f64,
    month: f64,
    by_day: BTreeMap<NaiveDate, f64>,
    by_category: BTreeMap<String, f64>,
}

/// Round a liter sum for output
fn whole(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Build the usage summary for one user at `now`
///
/// Pure: reads `entries` and `profile`, returns a fresh value. Entries whose
/// date cannot be resolved are left out of every aggregate but still appear
/// in `recent_entries`. Missing or non-numeric quantities count as zero.
pub fn summarize_usage(
    entries: &[UsageEntry],
    profile: &UserGoalProfile,
    now: DateTime<Utc>,
) -> SummaryResult {
    let today = now.date_naive();
    let today_key = day_key(today);
    let acc = accumulate(entries, today);

    let goal = profile.daily_goal;
    let totals = Totals {
        today: whole(acc.today),
        week: whole(acc.week),
        month: whole(acc.month),
        goal,
    };

    let progress = Progress {
        percentage: if goal > 0 {
            whole((acc.today / goal as f64 * 100.0).min(MAX_PROGRESS_PERCENT))
        } else {
            0
        },
        remaining: goal.saturating_sub(totals.today).max(0),
    };

    let snapshot = UsageSnapshot {
        today: acc.today,
        week: acc.week,
        goal: goal as f64,
    };

    let summary = SummaryResult {
        totals,
        progress,
        weekly_trend: weekly_trend(&acc.by_day, today),
        monthly_trend: monthly_trend(&acc.by_day, today),
        category_breakdown: category_breakdown(&acc.by_category),
        recent_entries: recent_entries(entries),
        alerts: derive_alerts(&snapshot, &today_key),
        recommendations: derive_recommendations(&snapshot),
    };

    tracing::debug!(
        user = %profile.id,
        entries = entries.len(),
        days = acc.by_day.len(),
        alerts = summary.alerts.len(),
        "Usage summary computed"
    );

    summary
}

/// Single pass over entries with a resolvable date
fn accumulate(entries: &[UsageEntry], today: NaiveDate) -> Accumulated {
    let week_start = today - Duration::days(WEEK_DAYS - 1);
    let month_start = today - Duration::days(MONTH_DAYS - 1);
    let mut acc = Accumulated::default();

    for entry in entries {
        let Some(day) = effective_date(entry) else {
            continue;
        };
        let liters = entry.liters_or_zero();

        if day == today {
            acc.today += liters;
        }
        if day >= week_start && day <= today {
            acc.week += liters;
        }
        if day >= month_start && day <= today {
            acc.month += liters;
        }

        *acc.by_day.entry(day).or_insert(0.0) += liters;
        *acc.by_category.entry(entry.category.clone()).or_insert(0.0) += liters;
    }

    acc
}

/// One point per day from `today - 6` through `today`
fn weekly_trend(by_day: &BTreeMap<NaiveDate, f64>, today: NaiveDate) -> Vec<DailyUsagePoint> {
    (0..WEEK_DAYS)
        .rev()
        .map(|days_back| {
            let day = today - Duration::days(days_back);
            DailyUsagePoint {
                day: day.format("%a").to_string(),
                usage: whole(by_day.get(&day).copied().unwrap_or(0.0)),
                date: day_key(day),
            }
        })
        .collect()
}

/// Four trailing 7-day windows ending at `today - 21`, `- 14`, `- 7` and `today`
fn monthly_trend(by_day: &BTreeMap<NaiveDate, f64>, today: NaiveDate) -> Vec<WeeklyUsagePoint> {
    (0..ROLLUP_PERIODS)
        .rev()
        .map(|periods_back| {
            let period_end = today - Duration::days(periods_back * WEEK_DAYS);
            let period_start = period_end - Duration::days(WEEK_DAYS - 1);
            let total: f64 = by_day.range(period_start..=period_end).map(|(_, l)| l).sum();
            WeeklyUsagePoint {
                label: format!("Week {}", ROLLUP_PERIODS - periods_back),
                usage: whole(total),
            }
        })
        .collect()
}

fn category_breakdown(by_category: &BTreeMap<String, f64>) -> Vec<CategoryShare> {
    let total: f64 = by_category.values().sum();
    let divisor = if total == 0.0 || !total.is_finite() {
        1.0
    } else {
        total
    };

    by_category
        .iter()
        .map(|(category, value)| CategoryShare {
            category: category.clone(),
            value: whole(*value),
            percentage: whole(value / divisor * 100.0),
        })
        .collect()
}

/// Most recent entries first; entries without a usable date sort last
fn recent_entries(entries: &[UsageEntry]) -> Vec<RecentEntry> {
    let mut ranked: Vec<&UsageEntry> = entries.iter().collect();
    ranked.sort_by_key(|entry| Reverse(effective_instant(entry)));

    ranked
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|entry| RecentEntry {
            id: entry.id.clone(),
            liters: entry.liters,
            category: entry.category.clone(),
            notes: entry.notes.clone().unwrap_or_default(),
            date: effective_date(entry).map(day_key).or_else(|| {
                entry
                    .date
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .or_else(|| entry.created_at.clone())
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::AlertKind;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap()
    }

    fn profile(goal: i64) -> UserGoalProfile {
        UserGoalProfile {
            id: "user-1".to_string(),
            daily_goal: goal,
        }
    }

    fn entry(id: &str, date: &str, liters: f64, category: &str) -> UsageEntry {
        UsageEntry {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            date: Some(date.to_string()),
            liters: Some(liters),
            category: category.to_string(),
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_log() {
        let summary = summarize_usage(&[], &profile(2000), now());

        assert_eq!(
            summary.totals,
            Totals {
                today: 0,
                week: 0,
                month: 0,
                goal: 2000
            }
        );
        assert_eq!(summary.progress.percentage, 0);
        assert_eq!(summary.progress.remaining, 2000);
        assert_eq!(summary.weekly_trend.len(), 7);
        assert!(summary.weekly_trend.iter().all(|p| p.usage == 0));
        assert_eq!(summary.monthly_trend.len(), 4);
        assert!(summary.monthly_trend.iter().all(|p| p.usage == 0));
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.recent_entries.is_empty());
        assert!(summary.alerts.is_empty());
        assert_eq!(summary.recommendations.len(), 1);
    }

    #[test]
    fn test_window_boundaries() {
        let entries = vec![
            entry("today", "2024-01-10", 10.0, "drinking"),
            entry("week-edge", "2024-01-04", 20.0, "drinking"),
            entry("outside-week", "2024-01-03", 40.0, "drinking"),
            entry("month-edge", "2023-12-12", 80.0, "drinking"),
            entry("outside-month", "2023-12-11", 160.0, "drinking"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.totals.today, 10);
        assert_eq!(summary.totals.week, 30);
        assert_eq!(summary.totals.month, 150);
    }

    #[test]
    fn test_future_entries_only_count_toward_categories() {
        let entries = vec![entry("future", "2024-01-11", 50.0, "garden")];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.totals.week, 0);
        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].value, 50);
    }

    #[test]
    fn test_weekly_trend_shape() {
        let summary = summarize_usage(&[], &profile(2000), now());
        let trend = &summary.weekly_trend;

        assert_eq!(trend[0].date, "2024-01-04");
        assert_eq!(trend[0].day, "Thu");
        assert_eq!(trend[6].date, "2024-01-10");
        assert_eq!(trend[6].day, "Wed");
    }

    #[test]
    fn test_accumulate_then_round() {
        let entries = vec![
            entry("a", "2024-01-09", 100.4, "shower"),
            entry("b", "2024-01-09", 100.4, "shower"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        let point = summary
            .weekly_trend
            .iter()
            .find(|p| p.date == "2024-01-09")
            .unwrap();
        assert_eq!(point.usage, 201);
        assert_eq!(summary.totals.week, 201);
    }

    #[test]
    fn test_monthly_trend_periods() {
        let entries = vec![
            entry("w4", "2024-01-10", 1.0, "drinking"),
            entry("w4-start", "2024-01-04", 2.0, "drinking"),
            entry("w3", "2024-01-03", 4.0, "drinking"),
            entry("w2", "2023-12-27", 8.0, "drinking"),
            entry("w1", "2023-12-14", 16.0, "drinking"),
            entry("older", "2023-12-13", 32.0, "drinking"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        let labels: Vec<&str> = summary
            .monthly_trend
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Week 1", "Week 2", "Week 3", "Week 4"]);

        let usage: Vec<i64> = summary.monthly_trend.iter().map(|p| p.usage).collect();
        assert_eq!(usage, vec![16, 8, 4, 3]);
    }

    #[test]
    fn test_bad_date_excluded_bad_quantity_zeroed() {
        let mut bad_date = entry("bad-date", "sometime", 500.0, "laundry");
        bad_date.created_at = Some("never".to_string());
        let mut bad_quantity = entry("bad-qty", "2024-01-10", 0.0, "dishes");
        bad_quantity.liters = None;

        let entries = vec![bad_date, bad_quantity, entry("ok", "2024-01-10", 100.0, "drinking")];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.totals.today, 100);
        assert_eq!(summary.totals.month, 100);

        let categories: Vec<&str> = summary
            .category_breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(categories, vec!["dishes", "drinking"]);
        assert_eq!(summary.category_breakdown[0].value, 0);
        assert_eq!(summary.category_breakdown[0].percentage, 0);

        // Still listed as a recent entry, with its raw date
        let listed = summary
            .recent_entries
            .iter()
            .find(|e| e.id == "bad-date")
            .unwrap();
        assert_eq!(listed.date.as_deref(), Some("sometime"));
    }

    #[test]
    fn test_created_at_fallback() {
        let mut e = entry("fallback", "", 75.0, "shower");
        e.date = None;
        e.created_at = Some("2024-01-10T06:00:00Z".to_string());
        let summary = summarize_usage(&[e], &profile(2000), now());

        assert_eq!(summary.totals.today, 75);
        assert_eq!(summary.recent_entries[0].date.as_deref(), Some("2024-01-10"));
    }

    #[test]
    fn test_category_percentages() {
        let entries = vec![
            entry("a", "2024-01-10", 100.0, "shower"),
            entry("b", "2024-01-09", 100.0, "drinking"),
            entry("c", "2024-01-08", 100.0, "garden"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        let sum: i64 = summary
            .category_breakdown
            .iter()
            .map(|c| c.percentage)
            .sum();
        assert!((sum - 100).abs() <= summary.category_breakdown.len() as i64);
        assert!(summary
            .category_breakdown
            .iter()
            .all(|c| c.percentage == 33));
    }

    #[test]
    fn test_all_zero_categories_do_not_divide_by_zero() {
        let entries = vec![entry("a", "2024-01-10", 0.0, "shower")];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].percentage, 0);
    }

    #[test]
    fn test_recent_entries_cap_and_order() {
        let entries: Vec<UsageEntry> = (1..=10)
            .map(|d| entry(&format!("e{}", d), &format!("2024-01-{:02}", d), 1.0, "drinking"))
            .collect();
        let summary = summarize_usage(&entries, &profile(2000), now());

        let ids: Vec<&str> = summary
            .recent_entries
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e10", "e9", "e8", "e7", "e6", "e5"]);
    }

    #[test]
    fn test_recent_entries_undated_sort_last() {
        let mut undated = entry("undated", "garbage", 1.0, "drinking");
        undated.created_at = None;
        let entries = vec![
            undated,
            entry("old", "2020-05-01", 1.0, "drinking"),
            entry("new", "2024-01-10", 1.0, "drinking"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        let ids: Vec<&str> = summary
            .recent_entries
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
        assert_eq!(summary.recent_entries[0].notes, "");
    }

    #[test]
    fn test_progress_capped() {
        let entries = vec![entry("a", "2024-01-10", 5000.0, "garden")];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.progress.percentage, 200);
        assert_eq!(summary.progress.remaining, 0);
    }

    #[test]
    fn test_progress_zero_goal() {
        let entries = vec![entry("a", "2024-01-10", 500.0, "garden")];
        let summary = summarize_usage(&entries, &profile(0), now());

        assert_eq!(summary.progress.percentage, 0);
        assert_eq!(summary.progress.remaining, 0);
        assert!(summary
            .alerts
            .iter()
            .all(|a| a.id != "alert-2024-01-10-goal"));
    }

    #[test]
    fn test_goal_and_weekly_alerts() {
        let mut entries = vec![entry("today", "2024-01-10", 2500.0, "garden")];
        entries.push(entry("earlier", "2024-01-08", 12500.0, "garden"));
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.totals.today, 2500);
        assert_eq!(summary.totals.week, 15000);
        assert_eq!(summary.alerts.len(), 2);
        assert!(summary.alerts.iter().all(|a| a.kind == AlertKind::Warning));
        assert_eq!(summary.recommendations.len(), 2);
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let mut drained = entry("drained", "2024-01-10", 0.0, "leak");
        drained.liters = Some(-1e300);
        let summary = summarize_usage(&[drained], &profile(2000), now());

        assert_eq!(summary.totals.today, i64::MIN);
        assert_eq!(summary.progress.remaining, i64::MAX);
        assert!(summary.alerts.is_empty());

        let flooded = entry("flooded", "2024-01-10", 1e300, "leak");
        let summary = summarize_usage(&[flooded], &profile(2000), now());

        assert_eq!(summary.totals.today, i64::MAX);
        assert_eq!(summary.progress.percentage, 200);
        assert_eq!(summary.progress.remaining, 0);
    }

    #[test]
    fn test_success_alert() {
        let entries = vec![
            entry("today", "2024-01-10", 500.0, "drinking"),
            entry("earlier", "2024-01-07", 2500.0, "shower"),
        ];
        let summary = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(summary.alerts.len(), 1);
        assert_eq!(summary.alerts[0].kind, AlertKind::Success);
        assert_eq!(summary.alerts[0].id, "alert-2024-01-10-success");
        assert_eq!(summary.progress.percentage, 25);
        assert_eq!(summary.progress.remaining, 1500);
    }

    #[test]
    fn test_inputs_unchanged() {
        let entries = vec![entry("a", "2024-01-10", 1.0, "drinking")];
        let before = entries.clone();
        let first = summarize_usage(&entries, &profile(2000), now());
        let second = summarize_usage(&entries, &profile(2000), now());

        assert_eq!(entries, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_camel_case() {
        let summary = summarize_usage(&[], &profile(2000), now());
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("weeklyTrend").is_some());
        assert!(json.get("monthlyTrend").is_some());
        assert!(json.get("categoryBreakdown").is_some());
        assert!(json.get("recentEntries").is_some());
        assert_eq!(json["totals"]["goal"], 2000);
    }
}
