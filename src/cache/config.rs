//! Store configuration

use std::path::PathBuf;

/// Maximum number of entries kept before eviction kicks in
pub const MAX_ENTRIES: usize = 500;

/// Entries removed per eviction pass
pub const EVICT_BATCH: usize = 50;

/// Where the store lives and how large it may grow
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the JSON store file
    pub path: PathBuf,
    /// Capacity; a `put` at or above this evicts first
    pub max_entries: usize,
    /// How many entries an automatic eviction removes
    pub evict_batch: usize,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_entries: MAX_ENTRIES,
            evict_batch: EVICT_BATCH,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn with_evict_batch(mut self, evict_batch: usize) -> Self {
        self.evict_batch = evict_batch.max(1);
        self
    }
}
