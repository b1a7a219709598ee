//! Error types for the taskwatch-protocol crate.

use thiserror::Error;

use crate::task::TaskId;

/// Errors shared by in-memory implementations of the store contracts.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A task with the given ID was not found.
    #[error("task not found: #{0}")]
    TaskNotFound(TaskId),

    /// No terminal session is recorded for the task.
    #[error("no session recorded for task #{0}")]
    NoSession(TaskId),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
