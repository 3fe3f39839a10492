//! Usage filter builder for constructing dynamic SQL queries

use crate::models::UsageFilter;

/// Result of building a filter - contains SQL components and parameters
pub(crate) struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// LIMIT clause including "LIMIT" keyword (empty if unlimited)
    pub limit_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl UsageFilter {
    /// Create an empty filter (all users, all dates, no limit)
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one user
    pub fn user_id(mut self, id: Option<String>) -> Self {
        self.user_id = id;
        self
    }

    /// Inclusive lower date bound
    pub fn start_date(mut self, date: Option<String>) -> Self {
        self.start_date = date;
        self
    }

    /// Inclusive upper date bound
    pub fn end_date(mut self, date: Option<String>) -> Self {
        self.end_date = date;
        self
    }

    /// Maximum number of rows
    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    /// Build the filter components
    ///
    /// Date bounds compare the stored `date` text, so they only match rows
    /// holding `YYYY-MM-DD` values.
    pub(crate) fn build(&self) -> FilterResult {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref user_id) = self.user_id {
            conditions.push("user_id = ?");
            params.push(Box::new(user_id.clone()));
        }
        if let Some(ref start) = self.start_date {
            conditions.push("date >= ?");
            params.push(Box::new(start.clone()));
        }
        if let Some(ref end) = self.end_date {
            conditions.push("date <= ?");
            params.push(Box::new(end.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match self.limit {
            Some(limit) if limit >= 0 => {
                params.push(Box::new(limit));
                "LIMIT ?"
            }
            _ => "",
        };

        FilterResult {
            where_clause,
            limit_clause,
            params,
        }
    }
}
