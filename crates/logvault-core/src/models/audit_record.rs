use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::serde_canonical;

/// Logical identity of whoever touched the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditActor {
    Api,
    System,
}

impl AuditActor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditActor::Api => "API",
            AuditActor::System => "SYSTEM",
        }
    }
}

impl FromStr for AuditActor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "API" => Ok(AuditActor::Api),
            "SYSTEM" => Ok(AuditActor::System),
            other => Err(format!("unknown audit actor: {other}")),
        }
    }
}

/// Operations recorded in the access audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Query,
    Archive,
    Delete,
    Export,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Query => "QUERY",
            AuditAction::Archive => "ARCHIVE",
            AuditAction::Delete => "DELETE",
            AuditAction::Export => "EXPORT",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUERY" => Ok(AuditAction::Query),
            "ARCHIVE" => Ok(AuditAction::Archive),
            "DELETE" => Ok(AuditAction::Delete),
            "EXPORT" => Ok(AuditAction::Export),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

/// One entry of the append-only access audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessAuditRecord {
    pub id: Option<i64>,
    #[serde(with = "serde_canonical")]
    pub timestamp: DateTime<Utc>,
    pub actor: AuditActor,
    pub action: AuditAction,
    pub details: String,
}

impl AccessAuditRecord {
    pub fn new(actor: AuditActor, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp: Utc::now(),
            actor,
            action,
            details: details.into(),
        }
    }
}
