//! Contracts the board needs from its collaborators.
//!
//! The view engine only ever lists tasks, archives them, and asks for a
//! session to be focused. Storage and OS integration live behind these
//! traits so the engine can be driven by in-memory fakes in tests.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// A file that could not be read during a lenient listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWarning {
    /// Base file name of the offending entry.
    pub file: String,
    /// Why it was skipped.
    pub message: String,
}

/// Result of a lenient listing: the readable tasks plus one warning per
/// file that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub tasks: Vec<Task>,
    pub warnings: Vec<ReadWarning>,
}

/// Read and archive access to the task collection.
pub trait TaskStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists every task, skipping unreadable entries with a warning.
    ///
    /// # Errors
    ///
    /// Fails only when the collection itself cannot be enumerated.
    fn list_all(&self) -> Result<Listing, Self::Error>;

    /// Archives a single task.
    ///
    /// # Errors
    ///
    /// Fails if the task does not exist or cannot be rewritten.
    fn archive(&self, id: TaskId) -> Result<(), Self::Error>;

    /// Archives every task not already archived and returns how many changed.
    ///
    /// # Errors
    ///
    /// Fails on the first task that cannot be rewritten.
    fn archive_all(&self) -> Result<usize, Self::Error>;
}

/// Brings the terminal session attached to a task to the front.
pub trait SessionFocus {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Fails when no session is recorded for the task or activation fails.
    fn focus_session(&self, id: TaskId) -> Result<(), Self::Error>;
}
