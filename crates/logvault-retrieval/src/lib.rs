//! # logvault-retrieval
//!
//! The query engine: turns caller-facing [`QueryParams`] into a store
//! filter, audits every call, and optionally decrypts message bodies.
//!
//! [`QueryParams`]: logvault_core::models::QueryParams

pub mod engine;
pub mod filter;

pub use engine::QueryEngine;
