//! Cache store - lazily loaded, explicitly flushed documentation cache
//!
//! Entries are invalidated two ways:
//! - in bulk, when the package fingerprint changes in `refresh_packages`
//! - one at a time, when `get` finds an entry cached against an older
//!   version of its owning package
//!
//! Capacity is bounded by least-frequently-used eviction.

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::cache::config::StoreConfig;
use crate::cache::entry::{Entry, Payload};
use crate::cache::error::{CacheError, LoadFailure, Result};
use crate::cache::fingerprint::compute_fingerprint;
use crate::cache::meta::{PackageRecord, StoreDocument, SCHEMA_VERSION};
use crate::core::paths::temp_path;
use crate::core::util::now;

/// Read-only view of the cache counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entry_count: usize,
    pub package_count: usize,
    pub hit_rate: f64,
}

/// Read and validate a store document without any recovery
pub fn read_document(path: &Path) -> std::result::Result<StoreDocument, LoadFailure> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(LoadFailure::Missing),
        Err(e) => return Err(LoadFailure::Unreadable(e)),
    };

    let value: serde_json::Value = serde_json::from_str(&content).map_err(LoadFailure::Malformed)?;

    let found = value.get("schema_version").and_then(|v| v.as_str());
    if found != Some(SCHEMA_VERSION) {
        return Err(LoadFailure::SchemaMismatch {
            found: found.map(str::to_string),
            expected: SCHEMA_VERSION,
        });
    }

    serde_json::from_value(value).map_err(LoadFailure::Shape)
}

fn read_or_empty(path: &Path) -> StoreDocument {
    match read_document(path) {
        Ok(doc) => {
            debug!(path = %path.display(), entries = doc.entries.len(), "loaded cache");
            doc
        }
        Err(LoadFailure::Missing) => {
            debug!(path = %path.display(), "no cache file, starting empty");
            StoreDocument::empty()
        }
        Err(reason) => {
            warn!(path = %path.display(), %reason, "discarding cache file");
            StoreDocument::empty()
        }
    }
}

/// Write `content` to a sibling temp file, then rename it over `path`
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp = temp_path(path);
    if let Err(source) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(CacheError::Write { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(CacheError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// File-backed documentation cache
#[derive(Debug)]
pub struct CacheStore {
    config: StoreConfig,
    data: Option<StoreDocument>,
}

impl CacheStore {
    /// Create a store at `path` with default capacity
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(StoreConfig::new(path.as_ref()))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self { config, data: None }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn document(&mut self) -> &mut StoreDocument {
        let path = &self.config.path;
        self.data.get_or_insert_with(|| read_or_empty(path))
    }

    /// The resident document, read from disk on first access
    pub fn load(&mut self) -> &StoreDocument {
        self.document()
    }

    /// Persist the resident document. No-op if nothing was loaded.
    pub fn save(&mut self) -> Result<()> {
        let Some(doc) = self.data.as_mut() else {
            return Ok(());
        };

        doc.updated_at = now();
        let json = serde_json::to_string_pretty(doc)?;
        write_atomic(&self.config.path, &json)?;

        info!(path = %self.config.path.display(), entries = doc.entries.len(), "saved cache");
        Ok(())
    }

    /// Stored environment fingerprint, if packages were ever registered
    pub fn fingerprint(&mut self) -> Option<String> {
        self.document().environment.fingerprint.clone()
    }

    /// Register the current package set.
    ///
    /// A changed fingerprint drops every entry and counts them as evictions.
    /// Returns the new fingerprint. Does not save.
    pub fn refresh_packages(&mut self, packages: &[(String, String)]) -> String {
        let fingerprint = compute_fingerprint(packages);
        let doc = self.document();

        if doc.environment.fingerprint.as_deref() != Some(fingerprint.as_str()) {
            let purged = doc.entries.len();
            doc.entries.clear();
            doc.stats.evictions += purged as u64;
            info!(
                old = ?doc.environment.fingerprint,
                new = %fingerprint,
                purged,
                "package environment changed, cache invalidated"
            );
        }

        let stamp = now();
        doc.packages = packages
            .iter()
            .map(|(name, version)| {
                (
                    name.clone(),
                    PackageRecord {
                        version: version.clone(),
                        registered_at: stamp,
                    },
                )
            })
            .collect();
        doc.environment.fingerprint = Some(fingerprint.clone());
        doc.environment.package_count = packages.len();
        doc.environment.fingerprinted_at = Some(stamp);

        fingerprint
    }

    /// Whether `packages` differ from the registered environment
    pub fn is_stale(&mut self, packages: &[(String, String)]) -> bool {
        let current = compute_fingerprint(packages);
        self.document().environment.fingerprint.as_deref() != Some(current.as_str())
    }

    /// Look up a cached payload, counting a hit or a miss
    pub fn get(&mut self, name: &str) -> Option<Payload> {
        let doc = self.document();

        let outdated = match doc.entries.get(name) {
            None => {
                doc.stats.misses += 1;
                debug!(name, "cache miss");
                return None;
            }
            Some(entry) => entry
                .package
                .as_deref()
                .is_some_and(|pkg| entry.is_outdated(doc.package_version(pkg))),
        };

        if outdated {
            doc.entries.remove(name);
            doc.stats.misses += 1;
            debug!(name, "cache entry outdated by package version, removed");
            return None;
        }

        let entry = doc.entries.get_mut(name)?;
        entry.hit_count += 1;
        doc.stats.hits += 1;
        debug!(name, hit_count = entry.hit_count, "cache hit");
        Some(entry.payload.clone())
    }

    /// Inspect an entry without touching any counter
    pub fn peek(&mut self, name: &str) -> Option<&Entry> {
        self.document().entries.get(name)
    }

    /// Insert or overwrite an entry, evicting first when at capacity. Does not save.
    pub fn put(
        &mut self,
        name: &str,
        payload: impl Into<Payload>,
        package: Option<&str>,
        package_version: Option<&str>,
    ) {
        let max_entries = self.config.max_entries.max(1);
        let batch = self.config.evict_batch.max(1);

        let len = self.document().entries.len();
        if len >= max_entries {
            // A store written under a larger limit needs more than one batch
            self.evict(batch.max(len + 1 - max_entries));
        }

        let entry = Entry::new(
            payload.into(),
            package.map(str::to_string),
            package_version.map(str::to_string),
        );
        self.document().entries.insert(name.to_string(), entry);
    }

    /// Remove the `count` least frequently used entries.
    ///
    /// Ties on hit count go to the lexicographically smaller name.
    /// Returns the number removed.
    pub fn evict(&mut self, count: usize) -> usize {
        let doc = self.document();

        let mut ranked: Vec<(&String, u64)> = doc
            .entries
            .iter()
            .map(|(name, entry)| (name, entry.hit_count))
            .collect();
        ranked.sort_by_key(|(_, hits)| *hits);

        let victims: Vec<String> = ranked
            .into_iter()
            .take(count)
            .map(|(name, _)| name.clone())
            .collect();

        for name in &victims {
            doc.entries.remove(name);
        }
        doc.stats.evictions += victims.len() as u64;

        debug!(requested = count, removed = victims.len(), "evicted entries");
        victims.len()
    }

    /// Reset to an empty document and persist it immediately
    pub fn clear(&mut self) -> Result<()> {
        self.data = Some(StoreDocument::empty());
        info!(path = %self.config.path.display(), "cache cleared");
        self.save()
    }

    /// Counters plus current sizes. Does not count as a lookup.
    pub fn stats(&mut self) -> StatsSnapshot {
        let doc = self.document();
        let stats = doc.stats;
        let lookups = stats.hits + stats.misses;

        StatsSnapshot {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            entry_count: doc.entries.len(),
            package_count: doc.packages.len(),
            hit_rate: if lookups == 0 {
                0.0
            } else {
                stats.hits as f64 / lookups as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::config::MAX_ENTRIES;
    use serde_json::{json, Map, Value};
    use tempfile::{tempdir, TempDir};

    fn temp_store() -> (TempDir, CacheStore) {
        let temp = tempdir().unwrap();
        let store = CacheStore::new(temp.path().join("cache.json"));
        (temp, store)
    }

    fn pkgs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_fresh_store_on_missing_file() {
        let (_temp, mut store) = temp_store();
        let doc = store.load();

        assert!(doc.entries.is_empty());
        assert!(doc.packages.is_empty());
        assert_eq!(doc.stats.hits, 0);
        assert_eq!(doc.stats.misses, 0);
        assert_eq!(doc.stats.evictions, 0);
        assert_eq!(doc.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_load_does_not_create_file() {
        let (temp, mut store) = temp_store();
        store.load();
        assert!(!temp.path().join("cache.json").exists());
    }

    #[test]
    fn test_save_without_load_is_noop() {
        let (temp, mut store) = temp_store();
        store.save().unwrap();
        assert!(!temp.path().join("cache.json").exists());
    }

    #[test]
    fn test_round_trip_across_instances() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");

        let mut first = CacheStore::new(&path);
        first.put("a", "X", None, None);
        first.save().unwrap();

        let mut second = CacheStore::new(&path);
        assert_eq!(second.get("a"), Some(Payload::Raw("X".to_string())));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_temp() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/dir/cache.json");

        let mut store = CacheStore::new(&path);
        store.put("a", "X", None, None);
        store.save().unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let (temp, mut store) = temp_store();
        store.put("a", "X", None, None);
        store.save().unwrap();

        let text = fs::read_to_string(temp.path().join("cache.json")).unwrap();
        assert!(text.contains('\n'));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["schema_version"], json!(SCHEMA_VERSION));
        assert_eq!(value["entries"]["a"]["content"], json!("X"));
    }

    #[test]
    fn test_structured_payload_preserved() {
        let (_temp, mut store) = temp_store();
        store.put("s", record(json!({"k": 1})), None, None);

        assert!(store.peek("s").unwrap().is_structured());
        let payload = store.get("s").unwrap();
        assert_eq!(payload.to_value(), json!({"k": 1}));
        assert!(payload.is_structured());
    }

    #[test]
    fn test_raw_payload_preserved_after_reload() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");

        let mut store = CacheStore::new(&path);
        store.put("r", "raw documentation string", None, None);
        store.put("s", record(json!({"name": "f", "found": true})), None, None);
        store.save().unwrap();

        let mut reloaded = CacheStore::new(&path);
        assert_eq!(
            reloaded.get("r").unwrap().as_raw(),
            Some("raw documentation string")
        );
        assert_eq!(
            reloaded.get("s").unwrap().as_structured().unwrap()["found"],
            json!(true)
        );
    }

    #[test]
    fn test_hit_miss_accounting() {
        let (_temp, mut store) = temp_store();
        store.put("hit", "data", None, None);

        let mut found = 0;
        let mut missing = 0;
        for name in ["miss1", "hit", "miss2", "hit", "hit"] {
            match store.get(name) {
                Some(_) => found += 1,
                None => missing += 1,
            }
        }

        let stats = store.stats();
        assert_eq!(stats.hits, found);
        assert_eq!(stats.misses, missing);
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 2);
        assert_eq!(store.peek("hit").unwrap().hit_count, 3);
    }

    #[test]
    fn test_hit_count_starts_at_zero() {
        let (_temp, mut store) = temp_store();
        store.put("new_entry", "content", None, None);
        assert_eq!(store.peek("new_entry").unwrap().hit_count, 0);
    }

    #[test]
    fn test_put_overwrite_resets_hit_count() {
        let (_temp, mut store) = temp_store();
        store.put("a", "v1", None, None);
        store.get("a");
        store.put("a", "v2", None, None);

        let entry = store.peek("a").unwrap();
        assert_eq!(entry.hit_count, 0);
        assert_eq!(entry.payload.as_raw(), Some("v2"));
    }

    #[test]
    fn test_stats_does_not_mutate_counters() {
        let (_temp, mut store) = temp_store();
        store.get("missing");
        let first = store.stats();
        let second = store.stats();
        assert_eq!(first, second);
        assert_eq!(second.misses, 1);
    }

    #[test]
    fn test_hit_rate() {
        let (_temp, mut store) = temp_store();
        assert_eq!(store.stats().hit_rate, 0.0);

        store.put("a", "x", None, None);
        store.get("a");
        store.get("b");
        assert_eq!(store.stats().hit_rate, 0.5);
    }

    #[test]
    fn test_refresh_returns_fingerprint() {
        let (_temp, mut store) = temp_store();
        let fp = store.refresh_packages(&pkgs(&[("pytest", "7.0.0"), ("numpy", "1.24.0")]));

        assert_eq!(fp.len(), 16);
        assert_eq!(store.fingerprint(), Some(fp));
        let doc = store.load();
        assert_eq!(doc.environment.package_count, 2);
        assert!(doc.environment.fingerprinted_at.is_some());
        assert_eq!(doc.package_version("numpy"), Some("1.24.0"));
    }

    #[test]
    fn test_is_stale() {
        let (_temp, mut store) = temp_store();
        let v1 = pkgs(&[("pytest", "7.0.0")]);
        let v2 = pkgs(&[("pytest", "8.0.0")]);

        assert!(store.is_stale(&v1));
        store.refresh_packages(&v1);

        let before = store.stats();
        assert!(!store.is_stale(&v1));
        assert!(store.is_stale(&v2));
        assert_eq!(store.stats(), before);
    }

    #[test]
    fn test_bulk_invalidation_on_fingerprint_change() {
        let (_temp, mut store) = temp_store();
        store.refresh_packages(&pkgs(&[("pkg1", "1.0")]));
        store.put("func1", "doc1", None, None);
        store.put("func2", "doc2", None, None);
        store.put("func3", "doc3", None, None);
        let before = store.stats().evictions;

        store.refresh_packages(&pkgs(&[("pkg1", "2.0")]));

        let stats = store.stats();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.evictions, before + 3);
    }

    #[test]
    fn test_refresh_with_same_fingerprint_keeps_entries() {
        let (_temp, mut store) = temp_store();
        let packages = pkgs(&[("pkg1", "1.0"), ("pkg2", "3.1")]);
        store.refresh_packages(&packages);
        store.put("func1", "doc1", Some("pkg1"), Some("1.0"));

        let reordered = pkgs(&[("pkg2", "3.1"), ("pkg1", "1.0")]);
        store.refresh_packages(&reordered);

        assert_eq!(store.stats().entry_count, 1);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_version_mismatch_lazy_purge() {
        let (_temp, mut store) = temp_store();
        store.put("f", "doc", Some("pkg"), Some("1.0"));
        store.refresh_packages(&pkgs(&[("pkg", "2.0")]));

        assert_eq!(store.get("f"), None);
        assert!(store.peek("f").is_none());
    }

    #[test]
    fn test_lazy_purge_without_bulk_refresh() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");

        let mut store = CacheStore::new(&path);
        store.refresh_packages(&pkgs(&[("mypackage", "2.0.0")]));
        // Entry cached against an older version than the registered one
        store.put("mypackage.func", "old docs", Some("mypackage"), Some("1.0.0"));
        store.save().unwrap();

        let mut reopened = CacheStore::new(&path);
        reopened.refresh_packages(&pkgs(&[("mypackage", "2.0.0")]));
        assert_eq!(reopened.stats().entry_count, 1);

        assert_eq!(reopened.get("mypackage.func"), None);
        let stats = reopened.stats();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_entry_for_unregistered_package_is_kept() {
        let (_temp, mut store) = temp_store();
        store.refresh_packages(&pkgs(&[("other", "1.0")]));
        store.put("lonely.func", "doc", Some("lonely"), Some("0.1"));

        assert_eq!(store.get("lonely.func"), Some(Payload::Raw("doc".into())));
    }

    #[test]
    fn test_matching_version_is_hit() {
        let (_temp, mut store) = temp_store();
        store.refresh_packages(&pkgs(&[("test", "1.0.0")]));
        store.put("test.func", "Test documentation", Some("test"), Some("1.0.0"));

        assert_eq!(
            store.get("test.func").unwrap().as_raw(),
            Some("Test documentation")
        );
    }

    #[test]
    fn test_capacity_bound_triggers_eviction() {
        let (_temp, mut store) = temp_store();
        for i in 0..=MAX_ENTRIES {
            store.put(&format!("entry{}", i), "doc", None, None);
        }

        let stats = store.stats();
        assert!(stats.entry_count <= MAX_ENTRIES);
        assert!(stats.evictions >= 1);
        // The newest entry always survives its own insert
        assert!(store.peek(&format!("entry{}", MAX_ENTRIES)).is_some());
    }

    #[test]
    fn test_capacity_with_small_config() {
        let temp = tempdir().unwrap();
        let config = StoreConfig::new(temp.path().join("cache.json"))
            .with_max_entries(3)
            .with_evict_batch(2);
        let mut store = CacheStore::with_config(config);

        for name in ["a", "b", "c", "d"] {
            store.put(name, "doc", None, None);
        }

        let stats = store.stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.evictions, 2);
        assert!(store.peek("d").is_some());
    }

    #[test]
    fn test_lowered_capacity_is_enforced_on_put() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");
        let mut store = CacheStore::new(&path);
        for i in 0..10 {
            store.put(&format!("entry{}", i), "doc", None, None);
        }
        store.save().unwrap();

        let config = StoreConfig::new(&path)
            .with_max_entries(3)
            .with_evict_batch(2);
        let mut reopened = CacheStore::with_config(config);
        reopened.put("fresh", "doc", None, None);

        let stats = reopened.stats();
        assert_eq!(stats.entry_count, 3);
        assert_eq!(stats.evictions, 8);
        assert!(reopened.peek("fresh").is_some());
    }

    #[test]
    fn test_zero_evict_batch_still_bounds_the_store() {
        let temp = tempdir().unwrap();
        let mut config = StoreConfig::new(temp.path().join("cache.json"));
        config.max_entries = 2;
        config.evict_batch = 0;
        let mut store = CacheStore::with_config(config);

        for name in ["a", "b", "c", "d"] {
            store.put(name, "doc", None, None);
        }

        assert_eq!(store.stats().entry_count, 2);
        assert!(store.peek("d").is_some());
    }

    #[test]
    fn test_lfu_never_evicts_most_used() {
        let (_temp, mut store) = temp_store();
        store.put("cold1", "x", None, None);
        store.put("hot", "x", None, None);
        store.put("cold2", "x", None, None);
        for _ in 0..5 {
            store.get("hot");
        }

        assert_eq!(store.evict(1), 1);
        assert!(store.peek("hot").is_some());
        let remaining_cold = ["cold1", "cold2"]
            .iter()
            .filter(|n| store.peek(n).is_some())
            .count();
        assert_eq!(remaining_cold, 1);
    }

    #[test]
    fn test_lfu_tie_break_by_name() {
        let (_temp, mut store) = temp_store();
        store.put("b", "x", None, None);
        store.put("a", "x", None, None);

        store.evict(1);
        assert!(store.peek("a").is_none());
        assert!(store.peek("b").is_some());
    }

    #[test]
    fn test_evict_more_than_present() {
        let (_temp, mut store) = temp_store();
        store.put("a", "x", None, None);
        store.put("b", "x", None, None);

        assert_eq!(store.evict(50), 2);
        assert_eq!(store.stats().evictions, 2);
        assert_eq!(store.evict(50), 0);
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_corrupt_file_recovery() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");
        fs::write(&path, b"{ invalid json \xff\xfe").unwrap();

        let mut store = CacheStore::new(&path);
        let doc = store.load();
        assert_eq!(doc.schema_version, SCHEMA_VERSION);
        assert!(doc.entries.is_empty());
    }

    #[test]
    fn test_wrong_shape_recovery() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");
        fs::write(&path, r#"{"schema_version": "2", "entries": []}"#).unwrap();

        assert!(matches!(read_document(&path), Err(LoadFailure::Shape(_))));
        let mut store = CacheStore::new(&path);
        assert!(store.load().entries.is_empty());
    }

    #[test]
    fn test_schema_version_mismatch_resets() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cache.json");
        fs::write(&path, r#"{"version": "1", "docstrings": {"old": "data"}}"#).unwrap();

        match read_document(&path) {
            Err(LoadFailure::SchemaMismatch { found, .. }) => assert_eq!(found, None),
            other => panic!("expected schema mismatch, got {:?}", other),
        }

        let mut store = CacheStore::new(&path);
        assert!(store.get("old").is_none());
        assert_eq!(store.load().schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_clear_is_destructive_and_idempotent() {
        let (temp, mut store) = temp_store();
        store.refresh_packages(&pkgs(&[("pkg", "1.0")]));
        store.put("test", "data", None, None);
        store.get("test");
        store.save().unwrap();

        store.clear().unwrap();
        let first = store.stats();
        store.clear().unwrap();
        let second = store.stats();

        assert_eq!(first, second);
        assert_eq!(second.entry_count, 0);
        assert_eq!(second.package_count, 0);
        assert_eq!(second.hits, 0);
        assert!(store.fingerprint().is_none());

        let mut reopened = CacheStore::new(temp.path().join("cache.json"));
        assert_eq!(reopened.stats().entry_count, 0);
        assert!(reopened.get("test").is_none());
    }

    #[test]
    fn test_save_reports_write_failure() {
        let temp = tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let mut store = CacheStore::new(blocker.join("cache.json"));
        store.put("a", "x", None, None);
        assert!(store.save().is_err());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp = tempdir().unwrap();
        // A non-empty directory where the store file should be
        let path = temp.path().join("cache.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let mut store = CacheStore::new(&path);
        store.put("a", "x", None, None);

        assert!(store.save().is_err());
        assert!(!temp_path(&path).exists());
    }
}
