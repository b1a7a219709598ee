//! TUI message types for event handling.
//!
//! Messages are produced by the input handler (and by the runtime for
//! reloads, resizes and ticks) and consumed by the board state machine.

use serde::{Deserialize, Serialize};

/// Messages that drive the board state machine.
///
/// # Examples
///
/// ```
/// use taskwatch_protocol::Message;
///
/// let msg: Message = serde_json::from_str(r#""navigate_right""#).unwrap();
/// assert_eq!(msg, Message::NavigateRight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move the cursor to the column on the left.
    NavigateLeft,
    /// Move the cursor to the column on the right.
    NavigateRight,
    /// Move the cursor up within the current column.
    NavigateUp,
    /// Move the cursor down within the current column.
    NavigateDown,
    /// Open the selected task's session.
    Activate,
    /// Ask to archive the selected task.
    RequestDelete,
    /// Ask to archive every task on the board.
    RequestClearAll,
    /// Answer "yes" in a confirmation dialog.
    Confirm,
    /// Answer "no" in a confirmation dialog.
    Cancel,
    /// Leave the board (only honoured outside dialogs).
    Quit,
    /// Leave unconditionally (`Ctrl+C`).
    ForceQuit,
    /// Left mouse press at terminal coordinates.
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },
    /// The terminal was resized.
    Resize {
        width: u16,
        height: u16,
    },
    /// Periodic redraw so age colors advance.
    Tick,
}
