//! Doctor - Store health checking
//!
//! Reports on the store file without repairing it.

use colored::Colorize;
use serde::Serialize;

use crate::cache::config::StoreConfig;
use crate::cache::error::LoadFailure;
use crate::cache::store::read_document;
use crate::core::paths::{normalize_path, temp_path};

/// Result of a single health check
#[derive(Debug, Clone, Serialize)]
pub struct CheckStatus {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl CheckStatus {
    fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            ok,
            detail: detail.into(),
        }
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        let status = if self.ok {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        format!("{} {} - {}", status, self.name, self.detail)
    }
}

/// Run all checks against the configured store
pub fn check_store(config: &StoreConfig) -> Vec<CheckStatus> {
    let path = &config.path;
    let mut checks = Vec::new();

    let loaded = read_document(path);

    checks.push(match &loaded {
        Err(LoadFailure::Missing) => CheckStatus::new(
            "store_file",
            true,
            format!("{} not found (cold cache)", normalize_path(path)),
        ),
        Err(LoadFailure::Unreadable(e)) => CheckStatus::new(
            "store_file",
            false,
            format!("{} is unreadable: {}", normalize_path(path), e),
        ),
        _ => CheckStatus::new("store_file", true, format!("found: {}", normalize_path(path))),
    });

    match &loaded {
        Ok(doc) => {
            checks.push(CheckStatus::new(
                "store_format",
                true,
                format!("schema version {}", doc.schema_version),
            ));

            let count = doc.entries.len();
            checks.push(CheckStatus::new(
                "capacity",
                count <= config.max_entries,
                format!("{} / {} entries", count, config.max_entries),
            ));

            checks.push(CheckStatus::new(
                "stats",
                true,
                format!(
                    "entries: {}, packages: {}, hits: {}, misses: {}, evictions: {}",
                    count,
                    doc.packages.len(),
                    doc.stats.hits,
                    doc.stats.misses,
                    doc.stats.evictions
                ),
            ));
        }
        Err(LoadFailure::Missing) | Err(LoadFailure::Unreadable(_)) => {}
        Err(reason) => {
            checks.push(CheckStatus::new(
                "store_format",
                false,
                format!("{} (will be reset on next use)", reason),
            ));
        }
    }

    let tmp = temp_path(path);
    checks.push(if tmp.exists() {
        CheckStatus::new(
            "leftover_temp",
            false,
            format!("{} left by an interrupted save", normalize_path(&tmp)),
        )
    } else {
        CheckStatus::new("leftover_temp", true, "none")
    });

    checks
}
