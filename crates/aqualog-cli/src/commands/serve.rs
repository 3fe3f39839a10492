//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Aqualog web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse API keys from environment (comma-separated)
    let api_keys = aqualog_server::parse_api_keys(
        &std::env::var(aqualog_server::API_KEYS_ENV).unwrap_or_default(),
    );

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!(
            "   🔒 Authentication: no API keys configured, set {} to allow access",
            aqualog_server::API_KEYS_ENV
        );
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            api_keys.len(),
            aqualog_server::API_KEYS_ENV
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = aqualog_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("Static directory path must be valid UTF-8"))
        .transpose()?;
    aqualog_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}
