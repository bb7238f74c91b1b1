//! Package environment fingerprinting

use crate::core::util::short_hash;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 16;

/// Compute a deterministic fingerprint for a set of (name, version) pairs.
///
/// Pairs are sorted before hashing, so input order does not matter.
pub fn compute_fingerprint(packages: &[(String, String)]) -> String {
    let mut sorted: Vec<(&str, &str)> = packages
        .iter()
        .map(|(name, version)| (name.as_str(), version.as_str()))
        .collect();
    sorted.sort_unstable();

    // Tuples serialize as two-element arrays: [["a","1"],["b","2"]]
    let canonical = serde_json::to_string(&sorted).unwrap_or_default();
    short_hash(canonical.as_bytes(), FINGERPRINT_LEN)
}
