//! Terminal UI for the taskwatch board.
//!
//! This crate provides a Ratatui-based live view of a file-backed kanban
//! board: one column per status, bordered task cards, keyboard and mouse
//! navigation, and confirmation dialogs for archiving.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Board state, cursor and scrolling
//! - [`layout`]: Column widths and card windowing arithmetic
//! - [`card`]: Card text composition and heights
//! - [`text`]: Width-aware truncation and wrapping
//! - [`theme`]: Colors and styles
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use taskwatch_config::Config;
//! use taskwatch_store::{FileStore, NoFocus};
//! use taskwatch_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("kanban")?;
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::TerminalGuard::new()?;
//!
//!     let mut app = App::new(&config);
//!     let store = FileStore::from_config(&config);
//!     let result = app.run(&mut terminal, &store, &NoFocus, None).await;
//!
//!     terminal.restore()?;
//!     result
//! }
//! ```

pub mod app;
pub mod card;
pub mod event;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod text;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{BoardState, ViewMode, ViewSettings};
