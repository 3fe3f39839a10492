//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_user` - Look a user up by ID or email
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use aqualog_core::db::Database;
use aqualog_core::models::User;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Find a user by ID or email, failing with a readable message
pub fn resolve_user(db: &Database, user: &str) -> Result<User> {
    db.find_user(user)?
        .ok_or_else(|| anyhow::anyhow!("User not found: {}", user))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    println!("   Schema ready in {}", db.path());

    if !db.is_encrypted() {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a user: aqualog users add --name Robin --email robin@example.com --password ...");
    println!("  2. Log usage: aqualog usage add --user robin@example.com --liters 45 --category shower");
    println!("  3. Start web UI: aqualog serve");

    Ok(())
}
