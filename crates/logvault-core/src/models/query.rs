use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::log_level::LogLevel;
use crate::config::defaults::DEFAULT_QUERY_LIMIT;
use crate::errors::{LogVaultError, LogVaultResult};

/// Caller-facing query parameters shared by query and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Inclusive first day.
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day.
    pub end_date: Option<NaiveDate>,
    pub level: Option<LogLevel>,
    pub component: Option<String>,
    /// Raw user id. Hashed before it reaches the store.
    pub user_id: Option<String>,
    pub limit: usize,
    pub decrypt: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            level: None,
            component: None,
            user_id: None,
            limit: DEFAULT_QUERY_LIMIT,
            decrypt: false,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn decrypt(mut self, decrypt: bool) -> Self {
        self.decrypt = decrypt;
        self
    }

    /// Parse a `YYYY-MM-DD` day.
    pub fn parse_date(raw: &str) -> LogVaultResult<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| LogVaultError::InvalidDate {
            value: raw.to_string(),
        })
    }
}

/// Store-level filter: bounds resolved, user id already hashed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogFilter {
    /// `timestamp >= start`.
    pub start: Option<DateTime<Utc>>,
    /// `timestamp < end_exclusive`.
    pub end_exclusive: Option<DateTime<Utc>>,
    pub level: Option<LogLevel>,
    pub component: Option<String>,
    pub user_id_hash: Option<String>,
    pub limit: usize,
}
