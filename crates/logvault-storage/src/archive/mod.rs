//! Dated archive stores: file naming, staging snapshots, pruning, and merge.

pub mod store;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use logvault_core::constants::{
    ARCHIVE_DATE_FORMAT, ARCHIVE_FILE_EXTENSION, ARCHIVE_FILE_PREFIX, ARCHIVE_STAGING_SUFFIX,
};

pub use store::{archived_logs, merge_into, prune_to_cutoff, snapshot, PrunedArchive};

/// `logs_archive_<YYYYMMDD>.db`
pub fn archive_file_name(date: NaiveDate) -> String {
    format!(
        "{ARCHIVE_FILE_PREFIX}{}.{ARCHIVE_FILE_EXTENSION}",
        date.format(ARCHIVE_DATE_FORMAT)
    )
}

/// Where the archive for `date` lives inside `archive_dir`.
pub fn archive_path(archive_dir: &Path, date: NaiveDate) -> PathBuf {
    archive_dir.join(archive_file_name(date))
}

/// The in-progress copy that becomes `archive` once pruned.
pub fn staging_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(ARCHIVE_STAGING_SUFFIX);
    PathBuf::from(name)
}

/// True when `file_name` has the archive prefix and extension, whatever
/// sits between them.
pub fn is_archive_file_name(file_name: &str) -> bool {
    file_name.starts_with(ARCHIVE_FILE_PREFIX)
        && file_name.ends_with(&format!(".{ARCHIVE_FILE_EXTENSION}"))
}

/// Date embedded in an archive file name, if it is one and the date parses.
pub fn parse_archive_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name
        .strip_prefix(ARCHIVE_FILE_PREFIX)?
        .strip_suffix(&format!(".{ARCHIVE_FILE_EXTENSION}"))?;
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, ARCHIVE_DATE_FORMAT).ok()
}

/// `-wal` and `-shm` files SQLite may leave next to `db_file`.
pub fn sidecar_paths(db_file: &Path) -> [PathBuf; 2] {
    ["-wal", "-shm"].map(|suffix| {
        let mut name = db_file.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    })
}
