//! Usage log operations

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{now_timestamp, Database};
use crate::error::{Error, Result};
use crate::models::{NewUsageEntry, UsageEntry, UsageFilter, UsageUpdate};

const USAGE_COLUMNS: &str = "id, user_id, date, liters, category, notes, created_at, updated_at";

/// Read a liters cell leniently: rows written outside this crate may hold text
fn liters_from_value(value: Value) -> Option<f64> {
    match value {
        Value::Real(v) => Some(v),
        Value::Integer(v) => Some(v as f64),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<UsageEntry> {
    let liters: Value = row.get(3)?;
    let notes: Option<String> = row.get(5)?;

    Ok(UsageEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        liters: liters_from_value(liters),
        category: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        notes,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn validate_liters(liters: Option<f64>) -> Result<f64> {
    match liters {
        Some(l) if l.is_finite() && l >= 0.0 => Ok(l),
        _ => Err(Error::InvalidData(
            "liters must be a positive number.".to_string(),
        )),
    }
}

/// Trimmed value, or `None` when missing or blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Database {
    /// Log a usage event for an existing user
    pub fn insert_usage(&self, new_entry: &NewUsageEntry) -> Result<UsageEntry> {
        let user_id = new_entry.user_id.trim();
        let date = new_entry.date.trim();
        let category = new_entry.category.trim();
        if user_id.is_empty() || date.is_empty() || new_entry.liters.is_none() || category.is_empty()
        {
            return Err(Error::InvalidData(
                "userId, date, liters, and category are required.".to_string(),
            ));
        }
        let liters = validate_liters(new_entry.liters)?;

        if self.get_user(user_id)?.is_none() {
            return Err(Error::NotFound("User not found.".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let created_at = now_timestamp();

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO usage_entries (id, user_id, date, liters, category, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![id, user_id, date, liters, category, new_entry.notes, created_at],
        )?;

        debug!(entry_id = %id, user_id, liters, category, "Logged usage");

        self.get_usage(&id)?
            .ok_or_else(|| Error::NotFound("Usage entry not found.".to_string()))
    }

    /// Get a usage entry by ID
    pub fn get_usage(&self, id: &str) -> Result<Option<UsageEntry>> {
        let conn = self.conn()?;
        let entry = conn
            .query_row(
                &format!("SELECT {} FROM usage_entries WHERE id = ?", USAGE_COLUMNS),
                params![id],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// List usage entries matching a filter, newest date first
    pub fn list_usage(&self, filter: &UsageFilter) -> Result<Vec<UsageEntry>> {
        let conn = self.conn()?;
        let filter_result = filter.build();

        let sql = format!(
            "SELECT {} FROM usage_entries {} ORDER BY date DESC, created_at DESC {}",
            USAGE_COLUMNS, filter_result.where_clause, filter_result.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            filter_result.params.iter().map(|p| p.as_ref()).collect();

        let entries = stmt
            .query_map(params_refs.as_slice(), row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Every usage entry a user has logged, for the insights engine
    pub fn list_usage_for_user(&self, user_id: &str) -> Result<Vec<UsageEntry>> {
        self.list_usage(&UsageFilter::new().user_id(Some(user_id.to_string())))
    }

    /// Apply a partial update to a usage entry
    pub fn update_usage(&self, id: &str, update: &UsageUpdate) -> Result<UsageEntry> {
        let existing = self
            .get_usage(id)?
            .ok_or_else(|| Error::NotFound("Usage entry not found.".to_string()))?;

        let liters = match update.liters {
            Some(sent) => Some(validate_liters(sent)?),
            None => existing.liters,
        };
        let date = non_blank(update.date.as_deref())
            .map(str::to_string)
            .or(existing.date);
        let category = non_blank(update.category.as_deref())
            .map(str::to_string)
            .unwrap_or(existing.category);
        let notes = update.notes.clone().or(existing.notes);
        let updated_at = now_timestamp();

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE usage_entries
            SET date = ?, liters = ?, category = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![date, liters, category, notes.unwrap_or_default(), updated_at, id],
        )?;

        self.get_usage(id)?
            .ok_or_else(|| Error::NotFound("Usage entry not found.".to_string()))
    }

    /// Delete a usage entry
    pub fn delete_usage(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM usage_entries WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound("Usage entry not found.".to_string()));
        }
        info!(entry_id = %id, "Deleted usage entry");
        Ok(())
    }
}
