//! Lookup module - Collaborators that sit in front of the cache
//!
//! Provides:
//! - resolver: `DocResolver` trait and the cached `lookup_doc` flow
//! - packages: `PackageEnumerator` trait, freeze-list parsing and environment sync

pub mod packages;
pub mod resolver;
