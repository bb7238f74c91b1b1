//! Cached documentation lookup
//!
//! A `DocResolver` does the expensive introspection; `lookup_doc` puts the
//! cache in front of it.

use tracing::debug;

use crate::cache::entry::Payload;
use crate::cache::error::Result;
use crate::cache::store::CacheStore;

/// Which representation the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocFormat {
    #[default]
    Structured,
    Raw,
}

impl DocFormat {
    /// Whether a cached payload can serve a request in this format
    pub fn accepts(self, payload: &Payload) -> bool {
        match self {
            DocFormat::Structured => payload.is_structured(),
            DocFormat::Raw => !payload.is_structured(),
        }
    }
}

/// Documentation produced by a resolver
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDoc {
    pub payload: Payload,
    pub package: Option<String>,
    pub version: Option<String>,
}

/// Resolves a dotted object name into documentation
pub trait DocResolver {
    /// `None` when the name cannot be resolved; failures are never cached.
    fn resolve(&self, name: &str, format: DocFormat) -> Option<ResolvedDoc>;
}

/// Owning package of a dotted name (`json.decoder.JSONDecoder` -> `json`)
pub fn owning_package(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Look up documentation, serving from the cache when possible.
///
/// A cached payload of the other format is ignored and replaced by a fresh
/// resolution. Successful resolutions are cached and saved immediately.
pub fn lookup_doc<R: DocResolver + ?Sized>(
    cache: Option<&mut CacheStore>,
    resolver: &R,
    name: &str,
    format: DocFormat,
) -> Result<Option<Payload>> {
    let Some(cache) = cache else {
        return Ok(resolver.resolve(name, format).map(|doc| doc.payload));
    };

    if let Some(cached) = cache.get(name) {
        if format.accepts(&cached) {
            return Ok(Some(cached));
        }
        debug!(name, ?format, "cached payload has the other format, resolving again");
    }

    let Some(doc) = resolver.resolve(name, format) else {
        return Ok(None);
    };

    cache.put(
        name,
        doc.payload.clone(),
        doc.package.as_deref(),
        doc.version.as_deref(),
    );
    cache.save()?;

    Ok(Some(doc.payload))
}
