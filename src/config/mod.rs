//! Environment-level configuration.
//!
//! Resolved once at startup and threaded down; nothing here is read ad
//! hoc from deeper layers.

use std::env;
use std::path::PathBuf;

use crate::{Error, Result};

/// Overrides the journal data directory.
pub const ROOT_ENV: &str = "BUJO_ROOT";

/// When set, rendering defaults to verbose mode.
pub const VERBOSE_ENV: &str = "BUJO_VERBOSE";

/// Root directory for journal data: `BUJO_ROOT` if set, otherwise
/// `<data dir>/bujo`. The store creates it on first open.
pub fn journal_root() -> Result<PathBuf> {
    if let Some(root) = env::var_os(ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("could not determine data directory".to_string()))?;
    Ok(data_dir.join("bujo"))
}

/// Process-wide verbose-rendering default.
pub fn verbose_default() -> bool {
    env::var_os(VERBOSE_ENV).is_some()
}
