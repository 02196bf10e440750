//! # logvault-privacy
//!
//! Anonymization and encryption for log records.
//! SHA-256 digests for user ids and sensitive values; AES-256-GCM for
//! message bodies, with the key persisted in a side file next to the store.

pub mod cipher;
pub mod engine;
pub mod hashing;
pub mod key_store;

pub use cipher::MessageCipher;
pub use engine::PrivacyEngine;
pub use hashing::hash_identifier;
pub use key_store::KeyStore;
