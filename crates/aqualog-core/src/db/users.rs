//! User store operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{now_timestamp, parse_datetime, Database};
use crate::auth::{hash_password, verify_password};
use crate::error::{Error, Result};
use crate::models::{
    NewUser, User, UserGoalProfile, UserUpdate, DEFAULT_DAILY_GOAL, DEFAULT_THEME,
};

const USER_COLUMNS: &str = "id, name, email, daily_goal, theme, created_at, updated_at";

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(5)?;
    let updated_at_str: Option<String> = row.get(6)?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        daily_goal: row.get(3)?,
        theme: row.get(4)?,
        created_at: parse_datetime(&created_at_str),
        updated_at: updated_at_str.as_deref().map(parse_datetime),
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Database {
    /// Register a user
    ///
    /// A missing or non-positive goal falls back to [`DEFAULT_DAILY_GOAL`].
    pub fn create_user(&self, new_user: &NewUser) -> Result<User> {
        let name = new_user.name.trim();
        let email = normalize_email(&new_user.email);
        if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(Error::InvalidData(
                "Name, email, and password are required.".to_string(),
            ));
        }

        if self.get_user_by_email(&email)?.is_some() {
            return Err(Error::Conflict(
                "A user with that email already exists.".to_string(),
            ));
        }

        let daily_goal = new_user
            .daily_goal
            .filter(|goal| *goal > 0)
            .unwrap_or(DEFAULT_DAILY_GOAL);
        let theme = new_user
            .theme
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_THEME);
        let password_hash = hash_password(&new_user.password)?;
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = now_timestamp();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO users (id, name, email, password_hash, daily_goal, theme, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![id, name, email, password_hash, daily_goal, theme, created_at],
        )?;

        info!(user_id = %id, "Registered user");

        self.get_user(&id)?
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))
    }

    /// Get a user by ID
    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Get a user by email (case-insensitive)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
                params![normalize_email(email)],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Resolve a user from either an ID or an email address
    pub fn find_user(&self, id_or_email: &str) -> Result<Option<User>> {
        if let Some(user) = self.get_user(id_or_email)? {
            return Ok(Some(user));
        }
        if id_or_email.contains('@') {
            return self.get_user_by_email(id_or_email);
        }
        Ok(None)
    }

    /// List all users, oldest first
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY created_at, email",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Apply a partial update to a user
    pub fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User> {
        let existing = self
            .get_user(id)?
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;

        let email = match update.email.as_deref().map(normalize_email) {
            Some(email) if email.is_empty() => {
                return Err(Error::InvalidData("Email cannot be empty.".to_string()));
            }
            Some(email) if email != existing.email => {
                if self.get_user_by_email(&email)?.is_some() {
                    return Err(Error::Conflict(
                        "Another user already uses that email.".to_string(),
                    ));
                }
                email
            }
            _ => existing.email.clone(),
        };

        let name = match update.name.as_deref().map(str::trim) {
            Some("") => return Err(Error::InvalidData("Name cannot be empty.".to_string())),
            Some(name) => name.to_string(),
            None => existing.name.clone(),
        };

        let daily_goal = match update.daily_goal {
            Some(goal) if goal < 0 => {
                return Err(Error::InvalidData(
                    "dailyGoal must be a non-negative number.".to_string(),
                ));
            }
            Some(goal) => goal,
            None => existing.daily_goal,
        };

        let password_hash = match update.password.as_deref() {
            Some("") => return Err(Error::InvalidData("Password cannot be empty.".to_string())),
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let theme = update.theme.clone().unwrap_or(existing.theme);
        let updated_at = now_timestamp();

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE users
            SET name = ?, email = ?, daily_goal = ?, theme = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![name, email, daily_goal, theme, updated_at, id],
        )?;

        if let Some(password_hash) = password_hash {
            conn.execute(
                "UPDATE users SET password_hash = ? WHERE id = ?",
                params![password_hash, id],
            )?;
        }

        self.get_user(id)?
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))
    }

    /// Delete a user and all of their usage entries
    pub fn delete_user(&self, id: &str) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let entries = tx.execute("DELETE FROM usage_entries WHERE user_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM users WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound("User not found.".to_string()));
        }

        tx.commit()?;
        info!(user_id = %id, entries, "Deleted user");
        Ok(())
    }

    /// Check an email/password pair and return the matching user
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(Error::InvalidData(
                "Email and password are required.".to_string(),
            ));
        }

        let conn = self.conn()?;
        let stored: Option<(String, String)> = conn
            .query_row(
                "SELECT id, password_hash FROM users WHERE email = ?",
                params![email],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let invalid = || Error::Unauthorized("Invalid credentials.".to_string());
        let (id, password_hash) = stored.ok_or_else(invalid)?;
        if !verify_password(password, &password_hash) {
            return Err(invalid());
        }

        self.get_user(&id)?.ok_or_else(invalid)
    }

    /// The goal profile the insights engine reads for a user
    pub fn get_goal_profile(&self, user_id: &str) -> Result<Option<UserGoalProfile>> {
        Ok(self.get_user(user_id)?.as_ref().map(UserGoalProfile::from))
    }
}
