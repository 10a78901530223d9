//! # Store Error Types
//!
//! Error types for the flat-file store and its configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / toml::de::Error                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path and operation                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError (checkout-core) ← When used behind CustomerRepository       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Binary prints the message and exits non-zero                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read failures never show up here: an unreadable file loads as empty.
//! Malformed lines are [`DecodeError`]s, logged and skipped by the loader.

use std::path::PathBuf;

use checkout_core::CoreError;
use thiserror::Error;

/// Store and configuration errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `delete` targeted an identifier that is not stored.
    ///
    /// The data file is left untouched.
    #[error("Customer not found with ID: {0}")]
    CustomerNotFound(String),

    /// The data file (or its directory) could not be created on open.
    #[error("Failed to create data file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rewriting the data file failed. Fatal for the operation.
    #[error("Failed to write data file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file exists but could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

/// Lets the store stand behind `CustomerRepository`.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CustomerNotFound(id) => CoreError::CustomerNotFound(id),
            other => CoreError::Storage(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Why one stored line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid points '{0}'")]
    Points(String),

    #[error("invalid join date '{0}'")]
    JoinDate(String),

    #[error("invalid balance '{0}'")]
    Balance(String),

    /// The line is not UTF-8; holds the length of the valid prefix.
    #[error("invalid UTF-8 after byte {0}")]
    Encoding(usize),
}
