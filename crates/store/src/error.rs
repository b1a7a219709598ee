//! Error types for task storage.

use std::path::PathBuf;

use taskwatch_protocol::TaskId;

/// Errors that can occur while reading or mutating task files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The task directory could not be listed.
    #[error("failed to read tasks directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task file could not be read.
    #[error("failed to read task file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task file could not be written.
    #[error("failed to write task file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not have a well-formed frontmatter block.
    #[error("malformed frontmatter in {path}: {reason}")]
    Frontmatter { path: PathBuf, reason: &'static str },

    /// The frontmatter is not valid task YAML.
    #[error("invalid frontmatter in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Serializing a task back to YAML failed.
    #[error("failed to serialize task #{id}: {source}")]
    Serialize {
        id: TaskId,
        #[source]
        source: serde_yaml::Error,
    },

    /// No task file carries this ID.
    #[error("task not found: #{0}")]
    TaskNotFound(TaskId),

    /// The activity log could not be written.
    #[error("failed to write activity log {path}: {source}")]
    ActivityLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filesystem watcher could not be started.
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// No session descriptor exists for the task.
    #[error("no session recorded for task #{id}")]
    NoSession { id: TaskId },

    /// The session activation command failed.
    #[error("failed to activate session for task #{id}: {reason}")]
    SessionActivation { id: TaskId, reason: String },
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
