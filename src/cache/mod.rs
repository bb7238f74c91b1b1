//! Cache module - Persistent documentation cache
//!
//! Provides:
//! - Store document and entry types
//! - Package fingerprinting for bulk invalidation
//! - The file-backed `CacheStore` with LFU eviction
//! - Store health checks

pub mod config;
pub mod doctor;
pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod meta;
pub mod store;
