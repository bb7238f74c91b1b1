//! Cache entries and their payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::util::now;

/// Documentation content: a structured record or raw text
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Structured(Map<String, Value>),
    Raw(String),
}

impl Payload {
    pub fn is_structured(&self) -> bool {
        matches!(self, Payload::Structured(_))
    }

    /// Raw text, if this is a raw payload
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Payload::Raw(text) => Some(text),
            Payload::Structured(_) => None,
        }
    }

    /// Structured record, if this is a structured payload
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Structured(record) => Some(record),
            Payload::Raw(_) => None,
        }
    }

    /// JSON view of the payload (object or string)
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Structured(record) => Value::Object(record.clone()),
            Payload::Raw(text) => Value::String(text.clone()),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Raw(text.to_string())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(record: Map<String, Value>) -> Self {
        Payload::Structured(record)
    }
}

/// A JSON value that is neither an object nor a string
#[derive(Debug, Error)]
#[error("payload must be a JSON object or string, got {0}")]
pub struct UnsupportedPayload(pub &'static str);

impl TryFrom<Value> for Payload {
    type Error = UnsupportedPayload;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(record) => Ok(Payload::Structured(record)),
            Value::String(text) => Ok(Payload::Raw(text)),
            Value::Null => Err(UnsupportedPayload("null")),
            Value::Bool(_) => Err(UnsupportedPayload("boolean")),
            Value::Number(_) => Err(UnsupportedPayload("number")),
            Value::Array(_) => Err(UnsupportedPayload("array")),
        }
    }
}

/// On-disk shape of an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    package_version: Option<String>,
    content: Value,
    is_structured: bool,
    cached_at: DateTime<Utc>,
    #[serde(default)]
    hit_count: u64,
}

/// Stored content disagrees with its `is_structured` flag
#[derive(Debug, Error)]
#[error("entry content does not match is_structured={is_structured}")]
pub struct ContentMismatch {
    is_structured: bool,
}

/// A cached documentation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    /// Package the documented object belongs to
    pub package: Option<String>,
    /// Package version at the time the entry was cached
    pub package_version: Option<String>,
    pub payload: Payload,
    pub cached_at: DateTime<Utc>,
    /// Number of successful lookups since insertion
    pub hit_count: u64,
}

impl Entry {
    pub fn new(payload: Payload, package: Option<String>, package_version: Option<String>) -> Self {
        Self {
            package,
            package_version,
            payload,
            cached_at: now(),
            hit_count: 0,
        }
    }

    pub fn is_structured(&self) -> bool {
        self.payload.is_structured()
    }

    /// True when the entry was cached against a different version than `live_version`.
    ///
    /// Entries without a recorded version, or whose package is not registered,
    /// are never considered stale here.
    pub fn is_outdated(&self, live_version: Option<&str>) -> bool {
        match (self.package_version.as_deref(), live_version) {
            (Some(cached), Some(live)) => cached != live,
            _ => false,
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = ContentMismatch;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let payload = match (record.is_structured, record.content) {
            (true, Value::Object(map)) => Payload::Structured(map),
            (false, Value::String(text)) => Payload::Raw(text),
            (is_structured, _) => return Err(ContentMismatch { is_structured }),
        };

        Ok(Self {
            package: record.package,
            package_version: record.package_version,
            payload,
            cached_at: record.cached_at,
            hit_count: record.hit_count,
        })
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        let is_structured = entry.is_structured();
        let content = match entry.payload {
            Payload::Structured(map) => Value::Object(map),
            Payload::Raw(text) => Value::String(text),
        };

        Self {
            package: entry.package,
            package_version: entry.package_version,
            content,
            is_structured,
            cached_at: entry.cached_at,
            hit_count: entry.hit_count,
        }
    }
}
