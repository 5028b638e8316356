//! Bujo - a command-line bullet journal.
//!
//! This library provides the core functionality for the `bj` CLI tool:
//! journal items with states and signifiers, a colored tree renderer,
//! and a SQLite-backed store.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod render;
pub mod storage;
pub mod when;

/// Library-level error type for bujo operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Item {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    InvalidChoice(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for bujo operations.
pub type Result<T> = std::result::Result<T, Error>;
