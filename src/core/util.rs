//! Common utilities

use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

/// Compute the SHA-1 hex digest of bytes
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Compute a SHA-1 digest truncated to `len` hex characters
pub fn short_hash(data: &[u8], len: usize) -> String {
    let mut full = hash_bytes(data);
    full.truncate(len);
    full
}

/// Truncate string to max bytes, returning (truncated_string, was_truncated)
pub fn truncate_string(s: &str, max_bytes: usize) -> (String, bool) {
    if s.len() <= max_bytes {
        return (s.to_string(), false);
    }

    // Find a valid UTF-8 boundary
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    (s[..end].to_string(), true)
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
