//! One-way digests for identifying values.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of `raw`. Same input, same digest.
pub fn hash_identifier(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    format!("{digest:x}")
}

/// Digest of an optional identifier; empty input hashes to nothing.
pub fn hash_optional(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.is_empty()).map(hash_identifier)
}
