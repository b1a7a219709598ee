//! Widget components for the taskwatch board.
//!
//! Each widget is a pure function that renders state to a buffer, which
//! keeps rendering testable without a terminal.
//!
//! # Modules
//!
//! - [`board`]: Renders the whole screen: columns, error banner, status bar
//! - [`column`]: Renders one status column with its scroll indicators
//! - [`card`]: Renders a bordered task card
//! - [`status_bar`]: Renders the footer and the error banner
//! - [`confirm`]: Renders the archive confirmation dialogs
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use taskwatch_config::Config;
//! use taskwatch_protocol::{Listing, Task};
//! use taskwatch_tui::state::{BoardState, ViewSettings};
//! use taskwatch_tui::widgets;
//!
//! let mut state = BoardState::new(ViewSettings::from_config(&Config::new("Demo")));
//! state.apply_listing(Listing {
//!     tasks: vec![Task::new(1, "Example", "todo")],
//!     warnings: Vec::new(),
//! });
//! state.resize(80, 24);
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//! widgets::render_board(&state, Utc::now(), area, &mut buf);
//! ```

pub mod board;
pub mod card;
pub mod column;
pub mod confirm;
pub mod status_bar;

// Re-export primary rendering functions for convenience
pub use board::render_board;
pub use card::render_task_card;
pub use column::{header_text, render_column};
pub use confirm::{dialog_lines, render_confirm_dialog};
pub use status_bar::{render_error_line, render_status_bar, status_text};

#[cfg(test)]
mod tests;
