//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use aqualog_core::db::Database;
use aqualog_core::insights::AlertKind;
use aqualog_core::models::UsageFilter;

use crate::commands::{self, bar, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// Register a test user, returning its id
fn create_test_user(db: &Database, email: &str) -> String {
    commands::cmd_users_add(db, "Test", email, "hunter22", Some(100)).unwrap();
    db.get_user_by_email(email).unwrap().unwrap().id
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

// ========== Core Command Tests ==========

#[test]
fn test_open_db_and_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aqualog.db");

    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path, true).unwrap();
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_resolve_user_by_id_or_email() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");

    assert_eq!(commands::resolve_user(&db, &id).unwrap().id, id);
    assert_eq!(
        commands::resolve_user(&db, "ROBIN@example.com").unwrap().id,
        id
    );

    let err = commands::resolve_user(&db, "ghost@example.com").unwrap_err();
    assert!(err.to_string().contains("User not found"));
}

// ========== Users Command Tests ==========

#[test]
fn test_cmd_users_list() {
    let db = setup_test_db();
    assert!(commands::cmd_users_list(&db).is_ok());

    create_test_user(&db, "robin@example.com");
    assert!(commands::cmd_users_list(&db).is_ok());
}

#[test]
fn test_cmd_users_add_duplicate() {
    let db = setup_test_db();
    create_test_user(&db, "robin@example.com");

    let result = commands::cmd_users_add(&db, "Other", "robin@example.com", "pw", None);
    assert!(result.is_err());
    assert_eq!(db.list_users().unwrap().len(), 1);
}

#[test]
fn test_cmd_users_goal() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");

    commands::cmd_users_goal(&db, "robin@example.com", 1800).unwrap();
    assert_eq!(db.get_user(&id).unwrap().unwrap().daily_goal, 1800);

    assert!(commands::cmd_users_goal(&db, &id, -1).is_err());
    assert!(commands::cmd_users_goal(&db, "ghost@example.com", 10).is_err());
}

#[test]
fn test_cmd_users_delete() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");
    commands::cmd_usage_add(&db, &id, 10.0, "shower", None, None).unwrap();

    commands::cmd_users_delete(&db, "robin@example.com").unwrap();

    assert!(db.get_user(&id).unwrap().is_none());
    assert!(db.list_usage(&UsageFilter::new()).unwrap().is_empty());
}

// ========== Usage Command Tests ==========

#[test]
fn test_cmd_usage_add_defaults_to_today() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");

    commands::cmd_usage_add(&db, "robin@example.com", 12.5, "kitchen", None, Some("dishes"))
        .unwrap();

    let entries = db.list_usage_for_user(&id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date.as_deref(), Some(today().as_str()));
    assert_eq!(entries[0].liters, Some(12.5));
    assert_eq!(entries[0].notes.as_deref(), Some("dishes"));
}

#[test]
fn test_cmd_usage_add_validation() {
    let db = setup_test_db();
    create_test_user(&db, "robin@example.com");

    assert!(commands::cmd_usage_add(&db, "robin@example.com", -1.0, "kitchen", None, None).is_err());
    assert!(commands::cmd_usage_add(&db, "robin@example.com", 1.0, "", None, None).is_err());
    assert!(commands::cmd_usage_add(&db, "ghost@example.com", 1.0, "kitchen", None, None).is_err());
}

#[test]
fn test_cmd_usage_list_and_delete() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");
    commands::cmd_usage_add(&db, &id, 10.0, "shower", Some("2024-01-10"), None).unwrap();

    assert!(commands::cmd_usage_list(&db, None, None, None, 20).is_ok());
    assert!(commands::cmd_usage_list(
        &db,
        Some("robin@example.com"),
        Some("2024-01-01"),
        Some("2024-01-31"),
        5
    )
    .is_ok());
    assert!(commands::cmd_usage_list(&db, Some("ghost@example.com"), None, None, 5).is_err());

    let entry_id = db.list_usage_for_user(&id).unwrap()[0].id.clone();
    commands::cmd_usage_delete(&db, &entry_id).unwrap();
    assert!(db.get_usage(&entry_id).unwrap().is_none());
    assert!(commands::cmd_usage_delete(&db, &entry_id).is_err());
}

// ========== Insights Command Tests ==========

#[test]
fn test_summary_for_user() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");
    commands::cmd_usage_add(&db, &id, 150.0, "garden", None, None).unwrap();

    let (email, summary) = commands::summary_for(&db, &id).unwrap();
    assert_eq!(email, "robin@example.com");
    assert_eq!(summary.totals.today, 150);
    assert_eq!(summary.totals.goal, 100);
    assert_eq!(summary.progress.percentage, 150);
    assert_eq!(summary.alerts[0].kind, AlertKind::Warning);

    assert!(commands::cmd_summary(&db, &id, false).is_ok());
    assert!(commands::cmd_summary(&db, "robin@example.com", true).is_ok());
    assert!(commands::cmd_summary(&db, "ghost@example.com", false).is_err());
}

#[test]
fn test_cmd_alerts() {
    let db = setup_test_db();
    let id = create_test_user(&db, "robin@example.com");

    // No usage yet: no alerts
    assert!(commands::cmd_alerts(&db, &id).is_ok());

    commands::cmd_usage_add(&db, &id, 50.0, "drinking", None, None).unwrap();
    let (_, summary) = commands::summary_for(&db, &id).unwrap();
    assert_eq!(summary.alerts.len(), 1);
    assert_eq!(summary.alerts[0].kind, AlertKind::Success);
    assert!(commands::cmd_alerts(&db, &id).is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer string", 10), "a longe...");
    assert_eq!(truncate("💧💧💧💧💧", 4), "💧...");
}

#[test]
fn test_bar_scaling() {
    assert_eq!(bar(0, 100), "");
    assert_eq!(bar(5, 0), "");
    assert_eq!(bar(100, 100).chars().count(), 30);
    assert_eq!(bar(50, 100).chars().count(), 15);
    assert_eq!(bar(1, 1000).chars().count(), 1);
    assert_eq!(bar(i64::MAX, i64::MAX).chars().count(), 30);
    assert_eq!(bar(i64::MAX - 1, i64::MAX).chars().count(), 30);
}
