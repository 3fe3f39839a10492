//! Summary and alert command implementations

use anyhow::Result;
use aqualog_core::db::Database;
use aqualog_core::insights::{summarize_usage, AlertKind, SummaryResult, UsageAlert};

use super::resolve_user;

/// Width of the text bar charts
const BAR_WIDTH: usize = 30;

/// Compute a user's summary as of now
pub fn summary_for(db: &Database, user: &str) -> Result<(String, SummaryResult)> {
    let user = resolve_user(db, user)?;
    let entries = db.list_usage_for_user(&user.id)?;
    let profile = db
        .get_goal_profile(&user.id)?
        .ok_or_else(|| anyhow::anyhow!("User not found: {}", user.email))?;
    let summary = summarize_usage(&entries, &profile, chrono::Utc::now());
    Ok((user.email, summary))
}

/// Text bar scaled against `max`, at least one cell for any positive value
pub fn bar(value: i64, max: i64) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let cells = (value as f64 / max as f64 * BAR_WIDTH as f64).ceil() as usize;
    "█".repeat(cells.clamp(1, BAR_WIDTH))
}

fn alert_icon(alert: &UsageAlert) -> &'static str {
    match alert.kind {
        AlertKind::Warning => "⚠️ ",
        AlertKind::Success => "✅",
    }
}

pub fn cmd_summary(db: &Database, user: &str, json: bool) -> Result<()> {
    let (email, summary) = summary_for(db, user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let totals = &summary.totals;
    println!();
    println!("💧 Water usage for {}", email);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Today:       {:>8} L   (goal {} L)", totals.today, totals.goal);
    println!("   Last 7 days: {:>8} L", totals.week);
    println!("   Last 30 days:{:>8} L", totals.month);
    println!(
        "   Progress:    {:>7}%   ({} L remaining)",
        summary.progress.percentage, summary.progress.remaining
    );

    println!();
    println!("   📅 This week");
    let week_max = summary.weekly_trend.iter().map(|p| p.usage).max().unwrap_or(0);
    for point in &summary.weekly_trend {
        println!(
            "   {} {}  {:>7} L  {}",
            point.day,
            point.date,
            point.usage,
            bar(point.usage, week_max)
        );
    }

    println!();
    println!("   📆 Last four weeks");
    let month_max = summary.monthly_trend.iter().map(|p| p.usage).max().unwrap_or(0);
    for point in &summary.monthly_trend {
        println!(
            "   {:<7} {:>8} L  {}",
            point.label,
            point.usage,
            bar(point.usage, month_max)
        );
    }

    if !summary.category_breakdown.is_empty() {
        println!();
        println!("   🏷️  By category");
        for share in &summary.category_breakdown {
            println!(
                "   {:<14} {:>8} L  {:>3}%",
                share.category, share.value, share.percentage
            );
        }
    }

    if !summary.recent_entries.is_empty() {
        println!();
        println!("   🕒 Recent entries");
        for entry in &summary.recent_entries {
            let liters = entry
                .liters
                .map(|l| format!("{:.1}", l))
                .unwrap_or_else(|| "?".to_string());
            println!(
                "   {:<10}  {:>8} L  {}",
                entry.date.as_deref().unwrap_or("-"),
                liters,
                entry.category
            );
        }
    }

    if !summary.alerts.is_empty() {
        println!();
        println!("   🔔 Alerts");
        for alert in &summary.alerts {
            println!("   {} {}", alert_icon(alert), alert.message);
        }
    }

    println!();
    println!("   💡 Recommendations");
    for rec in &summary.recommendations {
        println!("   • {}", rec);
    }

    Ok(())
}

pub fn cmd_alerts(db: &Database, user: &str) -> Result<()> {
    let (email, summary) = summary_for(db, user)?;

    if summary.alerts.is_empty() {
        println!("No alerts for {} today.", email);
        return Ok(());
    }

    println!();
    println!("🔔 Alerts for {}", email);
    for alert in &summary.alerts {
        println!("   {} [{}] {}", alert_icon(alert), alert.date, alert.message);
    }

    Ok(())
}
