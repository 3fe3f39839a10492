//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, resolve_user)
//! - `insights` - Summary and alert commands
//! - `serve` - Web server command
//! - `usage` - Usage log commands (list, add, delete)
//! - `users` - User management commands (list, add, goal, delete)

pub mod core;
pub mod insights;
pub mod serve;
pub mod usage;
pub mod users;

// Re-export command functions for main.rs
pub use self::core::*;
pub use insights::*;
pub use serve::*;
pub use usage::*;
pub use users::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
