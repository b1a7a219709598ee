//! Side effects requested by the board state machine.
//!
//! The state machine never touches storage or the OS. It returns effects and
//! the runtime loop executes them, reloading the board after any mutation.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// A side effect for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Move one task to the archived status.
    ArchiveTask { id: TaskId, title: String },
    /// Archive every non-archived task in storage.
    ArchiveAll,
    /// Bring the task's terminal session to the front.
    FocusSession { id: TaskId },
}

impl Effect {
    /// Returns `true` if the effect mutates storage and needs a reload.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskwatch_protocol::Effect;
    ///
    /// assert!(Effect::ArchiveAll.is_mutation());
    /// assert!(!Effect::FocusSession { id: 1 }.is_mutation());
    /// ```
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::ArchiveTask { .. } | Self::ArchiveAll)
    }
}
