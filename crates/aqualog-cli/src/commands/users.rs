//! User management command implementations

use anyhow::Result;
use aqualog_core::db::Database;
use aqualog_core::models::{NewUser, UserUpdate};

use super::{resolve_user, truncate};

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users found. Add one with 'aqualog users add'.");
        return Ok(());
    }

    println!();
    println!("👤 Users");
    println!("   ─────────────────────────────────────────────────────────────");
    for user in &users {
        println!(
            "   {:<36}  {:<24}  {:<28}  goal {:>6} L",
            user.id,
            truncate(&user.name, 24),
            truncate(&user.email, 28),
            user.daily_goal
        );
    }
    println!();
    println!("   {} user(s)", users.len());

    Ok(())
}

pub fn cmd_users_add(
    db: &Database,
    name: &str,
    email: &str,
    password: &str,
    goal: Option<i64>,
) -> Result<()> {
    let user = db.create_user(&NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        daily_goal: goal,
        theme: None,
    })?;

    println!("✅ Registered {} <{}>", user.name, user.email);
    println!("   ID: {}", user.id);
    println!("   Daily goal: {} L", user.daily_goal);

    Ok(())
}

pub fn cmd_users_goal(db: &Database, user: &str, liters: i64) -> Result<()> {
    let existing = resolve_user(db, user)?;

    let updated = db.update_user(
        &existing.id,
        &UserUpdate {
            daily_goal: Some(liters),
            ..Default::default()
        },
    )?;

    println!(
        "🎯 Daily goal for {}: {} L → {} L",
        updated.email, existing.daily_goal, updated.daily_goal
    );
    if updated.daily_goal == 0 {
        println!("   Goal alerts are disabled while the goal is 0");
    }

    Ok(())
}

pub fn cmd_users_delete(db: &Database, user: &str) -> Result<()> {
    let existing = resolve_user(db, user)?;
    let entries = db.list_usage_for_user(&existing.id)?.len();

    db.delete_user(&existing.id)?;

    println!(
        "🗑️  Deleted {} and {} usage entr{}",
        existing.email,
        entries,
        if entries == 1 { "y" } else { "ies" }
    );

    Ok(())
}
