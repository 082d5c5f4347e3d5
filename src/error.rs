//! Error types for the game engine.
//!
//! Recoverable player mistakes (not enough gold, unknown weapon names) are not
//! errors: they become warning messages. The types here cover contract
//! violations, bad content files, and persistence failures.

use std::path::PathBuf;

use thiserror::Error;

/// Contract violations raised by the character aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player name cannot be empty")]
    EmptyName,

    #[error("player name must be {max} characters or less (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("{what} must be positive (got {amount})")]
    NonPositiveAmount { what: &'static str, amount: u32 },
}

/// Game settings parsed but failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid game configuration:\n  - {}", .violations.join("\n  - "))]
    Invalid { violations: Vec<String> },
}

/// Errors raised while loading or using an enemy/weapon catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{label} specs file not found at: {}", .path.display())]
    NotFound { label: &'static str, path: PathBuf },

    #[error("{label} specs file is empty: {}", .path.display())]
    Empty { label: &'static str, path: PathBuf },

    #[error("failed to read {label} specs from {}: {source}", .path.display())]
    Io {
        label: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {label} specs file {}: {message}", .path.display())]
    Parse {
        label: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("no {label} specs found")]
    NoEntries { label: &'static str },

    #[error("invalid {label} spec for key '{key}':\n  - {}", .violations.join("\n  - "))]
    InvalidSpec {
        label: &'static str,
        key: String,
        violations: Vec<String>,
    },

    #[error("unknown {label} key: '{key}'. Available keys: {}", .available.join(", "))]
    UnknownKey {
        label: &'static str,
        key: String,
        available: Vec<String>,
    },
}

/// Errors surfaced by save stores.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save storage unavailable: {0}")]
    Unavailable(String),
}
