//! Persisted cache document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cache::entry::Entry;
use crate::core::util::now;

/// Current document schema version. Any other value resets the cache.
pub const SCHEMA_VERSION: &str = "2";

/// Fingerprint of the package environment the entries were cached against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub fingerprint: Option<String>,
    pub package_count: usize,
    pub fingerprinted_at: Option<DateTime<Utc>>,
}

/// A registered package version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub version: String,
    pub registered_at: DateTime<Utc>,
}

/// Running lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub hits: u64,
    pub misses: u64,
    /// Entries removed by LFU eviction or bulk invalidation
    pub evictions: u64,
}

/// The whole cache document stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub schema_version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub environment: Environment,
    pub packages: BTreeMap<String, PackageRecord>,
    pub entries: BTreeMap<String, Entry>,
    pub stats: Counters,
}

impl StoreDocument {
    /// A fresh, empty document at the current schema version
    pub fn empty() -> Self {
        let created = now();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            created_at: created,
            updated_at: created,
            environment: Environment::default(),
            packages: BTreeMap::new(),
            entries: BTreeMap::new(),
            stats: Counters::default(),
        }
    }

    /// Registered version of a package
    pub fn package_version(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(|p| p.version.as_str())
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self::empty()
    }
}
