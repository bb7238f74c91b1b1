//! doccache - A local documentation cache for developer-assistant tooling
//!
//! Documentation lookups are cached in a single JSON file. Entries are
//! invalidated when the installed package set changes, when their owning
//! package is upgraded, or when they are the least frequently used at
//! capacity.

pub mod cache;
pub mod cli;
pub mod core;
pub mod lookup;

pub use cache::config::StoreConfig;
pub use cache::entry::Payload;
pub use cache::store::CacheStore;
pub use lookup::packages::PackageEnumerator;
pub use lookup::resolver::{lookup_doc, DocFormat, DocResolver};
