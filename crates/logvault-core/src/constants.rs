/// logvault version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata key under which the digest of `sensitive_data` is stored.
pub const SENSITIVE_DATA_HASH_KEY: &str = "sensitive_data_hash";

/// Message returned in place of a ciphertext that cannot be decrypted.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[encrypted message]";

/// Marker prefix carried by every ciphertext message.
pub const CIPHERTEXT_PREFIX: &str = "lv1:";

/// Archive store file names: `logs_archive_<YYYYMMDD>.db`.
pub const ARCHIVE_FILE_PREFIX: &str = "logs_archive_";
pub const ARCHIVE_FILE_EXTENSION: &str = "db";
pub const ARCHIVE_DATE_FORMAT: &str = "%Y%m%d";

/// Suffix of the staging copy written before an archive is finalized.
pub const ARCHIVE_STAGING_SUFFIX: &str = ".partial";

/// Prefix for CSV columns flattened out of `metadata`.
pub const CSV_METADATA_PREFIX: &str = "metadata_";

/// Default component tag when the caller supplies none.
pub const DEFAULT_COMPONENT: &str = "general";
