//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during board
//! discovery, configuration loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a board directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// No board configuration exists in the given directory.
    #[error("no board found in {dir} (run with --init to create one)")]
    NotFound {
        /// The directory that was searched.
        dir: PathBuf,
    },

    /// The status list is unusable.
    #[error("invalid statuses: {reason}")]
    InvalidStatuses {
        /// Why the list was rejected.
        reason: String,
    },

    /// A WIP limit references a status that does not exist.
    #[error("wip limit set for unknown status {status:?}")]
    UnknownWipStatus {
        /// The status named by the limit.
        status: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration {
        /// The offending input.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid redraw interval.
    #[error("invalid tick interval: {reason}")]
    InvalidTickInterval {
        /// The reason the interval is invalid.
        reason: String,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
