//! Whole-screen board rendering.

use chrono::{DateTime, Utc};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::state::BoardState;
use crate::widgets::{render_column, render_confirm_dialog, render_error_line, render_status_bar};

/// Renders the board, or the open dialog, into `area`.
///
/// Layout from the top: one column per status, a blank line, the error
/// banner when there is an error, and the status bar on the last row.
pub fn render_board(state: &BoardState, now: DateTime<Utc>, area: Rect, buf: &mut Buffer) {
    if state.width == 0 {
        buf.set_stringn(area.x, area.y, "Loading...", usize::from(area.width), Style::default());
        return;
    }
    if state.mode.is_dialog() {
        render_confirm_dialog(&state.mode, area, buf);
        return;
    }
    if state.columns().is_empty() {
        buf.set_stringn(
            area.x,
            area.y,
            "No statuses configured.",
            usize::from(area.width),
            Style::default(),
        );
        return;
    }

    let rows = u16::try_from(state.board_height().max(0))
        .unwrap_or(u16::MAX)
        .min(area.height);
    let width = state.column_width();
    for index in 0..state.columns().len() {
        let offset = u16::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(width))
            .filter(|&x| x < area.width);
        let Some(offset) = offset else {
            break;
        };
        let column = Rect::new(area.x + offset, area.y, width, rows).intersection(area);
        render_column(state, index, now, column, buf);
    }

    if area.height == 0 {
        return;
    }
    let bottom = area.bottom() - 1;
    render_status_bar(state, Rect::new(area.x, bottom, area.width, 1), buf);
    if let Some(error) = &state.error {
        if bottom > area.y {
            render_error_line(error, Rect::new(area.x, bottom - 1, area.width, 1), buf);
        }
    }
}
