//! Usage log command implementations

use anyhow::Result;
use aqualog_core::db::Database;
use aqualog_core::models::{NewUsageEntry, UsageFilter};

use super::{resolve_user, truncate};

pub fn cmd_usage_list(
    db: &Database,
    user: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    limit: i64,
) -> Result<()> {
    let user_id = match user {
        Some(u) => Some(resolve_user(db, u)?.id),
        None => None,
    };

    let filter = UsageFilter::new()
        .user_id(user_id)
        .start_date(from.map(String::from))
        .end_date(to.map(String::from))
        .limit(Some(limit));
    let entries = db.list_usage(&filter)?;

    if entries.is_empty() {
        println!("No usage entries found.");
        return Ok(());
    }

    println!();
    println!("💧 Usage log");
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in &entries {
        let liters = entry
            .liters
            .map(|l| format!("{:>8.1} L", l))
            .unwrap_or_else(|| format!("{:>10}", "?"));
        println!(
            "   {:<10}  {}  {:<12}  {:<30}  {}",
            entry.date.as_deref().unwrap_or("-"),
            liters,
            truncate(&entry.category, 12),
            truncate(entry.notes.as_deref().unwrap_or(""), 30),
            entry.id
        );
    }
    println!();
    println!("   {} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });

    Ok(())
}

pub fn cmd_usage_add(
    db: &Database,
    user: &str,
    liters: f64,
    category: &str,
    date: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let owner = resolve_user(db, user)?;
    let date = date
        .map(String::from)
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let entry = db.insert_usage(&NewUsageEntry {
        user_id: owner.id,
        date,
        liters: Some(liters),
        category: category.to_string(),
        notes: notes.unwrap_or_default().to_string(),
    })?;

    println!(
        "✅ Logged {} L of {} on {}",
        liters,
        entry.category,
        entry.date.as_deref().unwrap_or("-")
    );
    println!("   ID: {}", entry.id);

    Ok(())
}

pub fn cmd_usage_delete(db: &Database, id: &str) -> Result<()> {
    db.delete_usage(id)?;
    println!("🗑️  Deleted usage entry {}", id);
    Ok(())
}
