//! Aqualog CLI - Water usage tracker
//!
//! Usage:
//!   aqualog init                          Initialize database
//!   aqualog users add --name .. --email ..  Register a user
//!   aqualog usage add --user .. --liters ..  Log water usage
//!   aqualog summary --user robin@example.com Show usage insights
//!   aqualog serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(UsersAction::List) => commands::cmd_users_list(&db),
                Some(UsersAction::Add {
                    name,
                    email,
                    password,
                    goal,
                }) => commands::cmd_users_add(&db, &name, &email, &password, goal),
                Some(UsersAction::Goal { user, liters }) => {
                    commands::cmd_users_goal(&db, &user, liters)
                }
                Some(UsersAction::Delete { user }) => commands::cmd_users_delete(&db, &user),
            }
        }
        Commands::Usage { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_usage_list(&db, None, None, None, 20),
                Some(UsageAction::List {
                    user,
                    from,
                    to,
                    limit,
                }) => commands::cmd_usage_list(
                    &db,
                    user.as_deref(),
                    from.as_deref(),
                    to.as_deref(),
                    limit,
                ),
                Some(UsageAction::Add {
                    user,
                    liters,
                    category,
                    date,
                    notes,
                }) => commands::cmd_usage_add(
                    &db,
                    &user,
                    liters,
                    &category,
                    date.as_deref(),
                    notes.as_deref(),
                ),
                Some(UsageAction::Delete { id }) => commands::cmd_usage_delete(&db, &id),
            }
        }
        Commands::Summary { user, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, &user, json)
        }
        Commands::Alerts { user } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_alerts(&db, &user)
        }
    }
}
