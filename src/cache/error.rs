//! Cache error types
//!
//! Only the write side can fail. Read failures are recovered inside the store
//! by starting over with an empty document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by cache persistence
#[derive(Error, Debug)]
pub enum CacheError {
    /// Parent directory of the store could not be created
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temporary file could not be written or renamed into place
    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized
    #[error("failed to serialize cache document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a store file was discarded on load
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("cache file does not exist")]
    Missing,

    #[error("cache file is unreadable: {0}")]
    Unreadable(#[source] std::io::Error),

    #[error("cache file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("schema version mismatch: found {found:?}, expected {expected:?}")]
    SchemaMismatch {
        found: Option<String>,
        expected: &'static str,
    },

    #[error("cache document has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Convenience Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
