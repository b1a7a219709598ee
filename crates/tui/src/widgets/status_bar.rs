//! Status bar and error banner below the board.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::state::BoardState;
use crate::text::truncate;
use crate::theme::{dim_style, error_style};

const KEY_HINTS: &str = "d:del C:clear-all q:quit";

/// Status bar text: board name, task count, key hints, and the number of
/// skipped task files when there are any.
///
/// # Examples
///
/// ```
/// use taskwatch_tui::widgets::status_text;
///
/// assert_eq!(
///     status_text("Work", 3, 0),
///     " Work | 3 tasks | d:del C:clear-all q:quit"
/// );
/// ```
#[must_use]
pub fn status_text(name: &str, total: usize, skipped: usize) -> String {
    let mut text = format!(" {name} | {total} tasks | {KEY_HINTS}");
    if skipped > 0 {
        text.push_str(&format!(" | {skipped} skipped"));
    }
    text
}

/// Renders the status bar on the first row of `area`.
pub fn render_status_bar(state: &BoardState, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let text = status_text(
        &state.settings.name,
        state.snapshot.total,
        state.skipped,
    );
    let width = usize::from(area.width);
    buf.set_stringn(area.x, area.y, truncate(&text, width), width, dim_style());
}

/// Renders `Error: <message>` on the first row of `area`.
pub fn render_error_line(message: &str, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let width = usize::from(area.width);
    let text = truncate(&format!("Error: {message}"), width);
    buf.set_stringn(area.x, area.y, text, width, error_style());
}
