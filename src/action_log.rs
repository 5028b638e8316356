//! Best-effort audit log of bj invocations.
//!
//! Every command appends one JSONL entry to `<root>/action.log`. Logging
//! must never break the command it records, so failures only warn.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::models;

const LOG_FILE: &str = "action.log";

/// A single logged invocation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Local timestamp when the command finished.
    pub timestamp: String,

    /// Command name (e.g. "add", "list all").
    pub command: String,

    /// Whether the command succeeded.
    pub success: bool,

    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds.
    pub duration_ms: u64,
}

/// Append an entry to the action log. Never fails the calling command.
pub fn log_action(
    root: &Path,
    command: &str,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) {
    let entry = ActionEntry {
        timestamp: models::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        command: command.to_string(),
        success,
        error,
        duration_ms,
    };
    if let Err(e) = append(root, &entry) {
        eprintln!("Warning: failed to write action log: {e}");
    }
}

fn append(root: &Path, entry: &ActionEntry) -> Result<()> {
    fs::create_dir_all(root)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(root.join(LOG_FILE))?;
    writeln!(file, "{}", serde_json::to_string(entry)?)?;
    Ok(())
}

/// The most recent `limit` entries, oldest first. Unparseable lines are
/// skipped.
pub fn recent(root: &Path, limit: usize) -> Result<Vec<ActionEntry>> {
    let path = root.join(LOG_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let entries: Vec<ActionEntry> = fs::read_to_string(&path)?
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();
    let skip = entries.len().saturating_sub(limit);
    Ok(entries.into_iter().skip(skip).collect())
}
