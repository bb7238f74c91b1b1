//! Usage log - one JSON line per command invocation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::core::util::{now, truncate_string};

/// Maximum bytes of rendered output kept per record
pub const PREVIEW_BYTES: usize = 500;

/// A single usage record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub args: Vec<String>,
    pub result_preview: String,
}

impl UsageRecord {
    pub fn new(command: &str, args: Vec<String>, output: &str) -> Self {
        let (result_preview, _) = truncate_string(output, PREVIEW_BYTES);
        Self {
            timestamp: now(),
            command: command.to_string(),
            args,
            result_preview,
        }
    }
}

/// Append a record to the JSONL log, creating parent directories
pub fn append_usage(log_path: &Path, record: &UsageRecord) -> Result<()> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open usage log: {:?}", log_path))?;

    let json = serde_json::to_string(record)?;
    writeln!(file, "{}", json)?;

    Ok(())
}
