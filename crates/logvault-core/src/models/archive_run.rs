use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress of one copy-then-delete archive move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveRunStatus {
    /// Marker written, archive copy not yet finalized.
    Started,
    /// Archive file holds the records; active rows not yet deleted.
    Copied,
    /// Both phases done.
    Completed,
}

impl ArchiveRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveRunStatus::Started => "started",
            ArchiveRunStatus::Copied => "copied",
            ArchiveRunStatus::Completed => "completed",
        }
    }
}

impl FromStr for ArchiveRunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(ArchiveRunStatus::Started),
            "copied" => Ok(ArchiveRunStatus::Copied),
            "completed" => Ok(ArchiveRunStatus::Completed),
            other => Err(format!("unknown archive run status: {other}")),
        }
    }
}

/// Marker row for one archive tick that found work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRun {
    pub id: i64,
    pub archive_file: String,
    pub cutoff: DateTime<Utc>,
    pub record_count: usize,
    pub status: ArchiveRunStatus,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
