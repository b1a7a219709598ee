//! Shared protocol types for the taskwatch application.
//!
//! This crate defines the core types used across all taskwatch components:
//! tasks, board columns, messages, effects and the contracts the board
//! expects from storage and session focus.
//!
//! # Overview
//!
//! - [`task`]: Task identifiers, priorities and the `Task` record
//! - [`board`]: Columns and snapshot construction on reload
//! - [`message`]: Input messages for the board state machine
//! - [`effect`]: Side effects the state machine asks the runtime to perform
//! - [`store`]: `TaskStore` and `SessionFocus` contracts
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! ```
//! use taskwatch_protocol::{BoardSnapshot, Priority, Task};
//!
//! let tasks = vec![
//!     Task::new(1, "Write docs", "todo"),
//!     Task::new(2, "Fix crash", "in-progress").with_priority(Priority::High),
//! ];
//! let statuses = vec!["todo".to_string(), "in-progress".to_string()];
//! let snapshot = BoardSnapshot::build(tasks, &statuses);
//!
//! assert_eq!(snapshot.columns.len(), 2);
//! assert_eq!(snapshot.total, 2);
//! ```

pub mod board;
pub mod effect;
pub mod error;
pub mod message;
pub mod store;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{BoardSnapshot, Column, sort_by_priority, title_sequences};
pub use effect::Effect;
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use store::{Listing, ReadWarning, SessionFocus, TaskStore};
pub use task::{ARCHIVED_STATUS, Priority, Task, TaskId};
