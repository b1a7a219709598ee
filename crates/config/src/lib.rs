//! Board configuration for the taskwatch application.
//!
//! This crate locates a board on disk, loads and validates its
//! configuration, and answers the lookups the terminal board needs.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct, loading and lookups
//! - [`status`]: Status columns with flexible parsing
//! - [`display`]: Redraw interval and age color thresholds
//! - [`duration`]: Compact duration strings (`1h30m`, `2w`)
//! - [`persistence`]: Board discovery and file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Board File
//!
//! ```json5
//! {
//!   board: { name: "platform" },
//!   tasks_dir: "tasks",
//!   statuses: [
//!     { name: "backlog", show_duration: false },
//!     "todo",
//!     "in-progress",
//!     "review",
//!     { name: "done", show_duration: false },
//!     { name: "archived", show_duration: false },
//!   ],
//!   wip_limits: { "in-progress": 3 },
//!   tui: {
//!     tick_secs: 30,
//!     age_thresholds: [
//!       { after: "0s", color: 242 },
//!       { after: "1h", color: 34 },
//!     ],
//!   },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use taskwatch_config::{Config, persistence};
//!
//! # fn main() -> taskwatch_config::Result<()> {
//! let cwd = std::env::current_dir().expect("cwd");
//! let dir = persistence::resolve_board_dir(None, &cwd)?;
//! let config = Config::load_or_init_user(&dir)?;
//!
//! for status in config.display_statuses() {
//!     println!("{status}: limit {:?}", config.wip_limit(&status));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod duration;
pub mod error;
pub mod persistence;
pub mod status;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use display::{AgeThreshold, DisplayConfig, ParsedThreshold};
pub use error::{ConfigError, Result};
pub use status::StatusConfig;
