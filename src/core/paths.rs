//! Store path resolution
//!
//! The cache lives in a `.doccache/` directory under the root unless an explicit
//! path is given.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory holding the cache under a root
pub const CACHE_DIR: &str = ".doccache";

/// Default store file name
pub const STORE_FILE: &str = "docs_index.json";

/// Get the .doccache directory for a given root
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR)
}

/// Default store path for a given root
pub fn default_store_path(root: &Path) -> PathBuf {
    cache_dir(root).join(STORE_FILE)
}

/// Resolve the store path: an explicit path wins, relative paths are taken from root
pub fn resolve_store_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => default_store_path(root),
    }
}

/// Sibling path used for atomic writes: `<file>.tmp`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from(STORE_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
