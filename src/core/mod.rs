//! Core module - Shared plumbing for the cache and the CLI
//!
//! This module provides:
//! - Store path resolution
//! - Rendering of command reports (json/jsonl/md)
//! - The JSONL usage log
//! - Common utilities (hashing, truncation, timestamps)

pub mod paths;
pub mod render;
pub mod usage_log;
pub mod util;
