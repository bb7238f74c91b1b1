//! Package enumeration and environment sync
//!
//! Package lists come either as a JSON array of `[name, version]` pairs or as
//! freeze-style lines (`name==version`).

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::cache::store::CacheStore;

/// Static regex for a pinned requirement line
/// Format: name==version, name[extra]==version
pub static FREEZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._\-]*)(?:\[[^\]]*\])?\s*==\s*([^\s;#]+)")
        .expect("Invalid FREEZE_RE regex")
});

/// Errors while enumerating packages
#[derive(Error, Debug)]
pub enum EnumerateError {
    #[error("failed to read package list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected `name==version`, got {text:?}")]
    BadLine { line: usize, text: String },

    #[error("invalid JSON package list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Produces the (name, version) pairs of the current environment
pub trait PackageEnumerator {
    fn packages(&self) -> Result<Vec<(String, String)>, EnumerateError>;
}

/// Where a package list is read from
#[derive(Debug, Clone)]
enum ListSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// Package list in JSON-pairs or freeze format
#[derive(Debug, Clone)]
pub struct FreezeList {
    source: ListSource,
}

impl FreezeList {
    /// Parse from in-memory text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: ListSource::Text(text.into()),
        }
    }

    /// Read from a file, or from stdin when the path is `-`
    pub fn from_path(path: &Path) -> Self {
        let source = if path == Path::new("-") {
            ListSource::Stdin
        } else {
            ListSource::File(path.to_path_buf())
        };
        Self { source }
    }

    fn read(&self) -> Result<String, EnumerateError> {
        match &self.source {
            ListSource::Text(text) => Ok(text.clone()),
            ListSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| EnumerateError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
            ListSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| EnumerateError::Read {
                        path: "<stdin>".to_string(),
                        source,
                    })?;
                Ok(text)
            }
        }
    }
}

impl PackageEnumerator for FreezeList {
    fn packages(&self) -> Result<Vec<(String, String)>, EnumerateError> {
        parse_package_list(&self.read()?)
    }
}

/// Parse a package list in either supported format
pub fn parse_package_list(text: &str) -> Result<Vec<(String, String)>, EnumerateError> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    let mut packages = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        // Blank lines, comments and pip options (-e, --index-url, ...)
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }

        // Direct URL installs carry no version
        if line.contains(" @ ") {
            debug!(line = idx + 1, "skipping direct URL requirement");
            continue;
        }

        let caps = FREEZE_RE.captures(line).ok_or_else(|| EnumerateError::BadLine {
            line: idx + 1,
            text: line.to_string(),
        })?;
        packages.push((caps[1].to_string(), caps[2].to_string()));
    }

    Ok(packages)
}

/// Outcome of registering the current environment
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub fingerprint: String,
    pub package_count: usize,
    /// Entries dropped because the fingerprint changed
    pub evicted: u64,
}

/// Enumerate packages, register them with the cache and persist it
pub fn sync_environment<E: PackageEnumerator + ?Sized>(
    cache: &mut CacheStore,
    enumerator: &E,
) -> Result<SyncReport> {
    let packages = enumerator
        .packages()
        .context("Failed to enumerate packages")?;

    let before = cache.stats().evictions;
    let fingerprint = cache.refresh_packages(&packages);
    cache.save().context("Failed to save cache")?;

    Ok(SyncReport {
        fingerprint,
        package_count: packages.len(),
        evicted: cache.stats().evictions - before,
    })
}
