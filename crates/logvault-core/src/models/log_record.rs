use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::log_level::LogLevel;
use super::timestamp::serde_canonical;
use crate::constants::DEFAULT_COMPONENT;

/// Opaque per-record metadata, keys kept sorted.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One ingested event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Store row id. `None` until persisted.
    pub id: Option<i64>,
    /// UUID v4 assigned at write time.
    pub log_id: String,
    #[serde(with = "serde_canonical")]
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    /// SHA-256 digest of the caller's user id, never the raw value.
    pub user_id_hash: Option<String>,
    /// Plaintext, or ciphertext when `encrypted` is set.
    pub message: String,
    pub encrypted: bool,
    pub metadata: Metadata,
}

impl LogRecord {
    /// A fresh, unpersisted record stamped with a new id and the current time.
    pub fn new(level: LogLevel, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            log_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            component: component.into(),
            user_id_hash: None,
            message: message.into(),
            encrypted: false,
            metadata: Metadata::new(),
        }
    }

    /// A record in the default component.
    pub fn general(level: LogLevel, message: impl Into<String>) -> Self {
        Self::new(level, DEFAULT_COMPONENT, message)
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_user_hash(mut self, user_id_hash: impl Into<String>) -> Self {
        self.user_id_hash = Some(user_id_hash.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
