//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aqualog - Track household water usage against a daily goal
#[derive(Parser)]
#[command(name = "aqualog")]
#[command(about = "Self-hosted water usage tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "aqualog.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set AQUALOG_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        #[arg(long)]
        no_auth: bool,

        /// Directory of static UI files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Manage users (list, add, goal, delete)
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Manage the usage log (list, add, delete)
    Usage {
        #[command(subcommand)]
        action: Option<UsageAction>,
    },

    /// Show a user's usage summary as of now
    Summary {
        /// User ID or email
        #[arg(short, long)]
        user: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's current alerts
    Alerts {
        /// User ID or email
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List all users
    List,

    /// Register a user
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Daily goal in liters (default 2000)
        #[arg(long)]
        goal: Option<i64>,
    },

    /// Set a user's daily goal
    Goal {
        /// User ID or email
        user: String,

        /// Daily goal in liters (0 disables goal alerts)
        liters: i64,
    },

    /// Delete a user and their usage log
    Delete {
        /// User ID or email
        user: String,
    },
}

#[derive(Subcommand)]
pub enum UsageAction {
    /// List usage entries, newest first
    List {
        /// User ID or email
        #[arg(short, long)]
        user: Option<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of entries
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Log a usage event
    Add {
        /// User ID or email
        #[arg(short, long)]
        user: String,

        /// Liters used
        #[arg(long)]
        liters: f64,

        /// Category (shower, garden, kitchen, ...)
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a usage entry
    Delete {
        /// Entry ID
        id: String,
    },
}
