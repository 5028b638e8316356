//! Common test utilities for bujo integration tests.
//!
//! Provides `TestEnv` for isolated journal directories so tests never
//! touch the user's real journal.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with an isolated journal directory.
///
/// The `bj()` method returns a `Command` that sets `BUJO_ROOT`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated journal directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the bj binary with an isolated journal root.
    pub fn bj(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bj"));
        cmd.env("BUJO_ROOT", self.root.path());
        cmd.env_remove("BUJO_VERBOSE");
        cmd.env_remove("BUJO_NUM_ITEMS");
        cmd
    }

    /// Get the path to the journal directory.
    pub fn path(&self) -> &std::path::Path {
        self.root.path()
    }

    /// Add an item and return its assigned id (items are numbered from 1).
    pub fn add(&self, description: &str, status: &str) {
        self.bj()
            .args(["add", description, "--status", status])
            .assert()
            .success();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
