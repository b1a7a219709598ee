//! File-backed storage for the taskwatch application.
//!
//! # Overview
//!
//! - [`file_store`]: `TaskStore` over a directory of markdown task files
//! - [`frontmatter`]: the task file format
//! - [`activity`]: the `activity.jsonl` mutation log
//! - [`watcher`]: debounced change notifications
//! - [`session`]: focusing a task's terminal session
//! - [`error`]: Error types for store operations
//!
//! # Examples
//!
//! ```no_run
//! use taskwatch_config::Config;
//! use taskwatch_protocol::TaskStore;
//! use taskwatch_store::FileStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load("kanban")?;
//! let store = FileStore::from_config(&config);
//! let archived = store.archive_all()?;
//! println!("archived {archived} tasks");
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod error;
pub mod file_store;
pub mod frontmatter;
pub mod session;
pub mod watcher;

// Re-export primary types at crate root for convenience
pub use activity::{ActivityEntry, ActivityLog};
pub use error::{Result, StoreError};
pub use file_store::FileStore;
pub use session::{ItermFocus, NoFocus};
pub use watcher::{BoardWatcher, DEFAULT_DEBOUNCE};
