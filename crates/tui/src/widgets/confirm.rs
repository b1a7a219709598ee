//! Confirmation dialogs for archiving.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget},
};

use crate::state::ViewMode;
use crate::text::display_width;
use crate::theme::{dialog_border_style, dim_style, error_style};

/// The dialog lines for a mode, or `None` on the board.
#[must_use]
pub fn dialog_lines(mode: &ViewMode) -> Option<Vec<Line<'static>>> {
    let (question, detail) = match mode {
        ViewMode::Normal => return None,
        ViewMode::ConfirmDelete { id, title } => ("Delete task?", format!("  #{id}: {title}")),
        ViewMode::ConfirmClearAll { count } => (
            "Delete ALL tasks?",
            format!("  {count} tasks will be removed from the board."),
        ),
    };
    Some(vec![
        Line::from(Span::styled(question, error_style())),
        Line::default(),
        Line::from(detail),
        Line::default(),
        Line::from(Span::styled("y:yes  n:no", dim_style())),
    ])
}

/// Clears `area` and draws the dialog for `mode` centered in it.
pub fn render_confirm_dialog(mode: &ViewMode, area: Rect, buf: &mut Buffer) {
    let Some(lines) = dialog_lines(mode) else {
        return;
    };

    // Border (2) plus horizontal padding (4).
    let content_width = lines
        .iter()
        .map(|l| l.spans.iter().map(|s| display_width(&s.content)).sum::<usize>())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(content_width + 6).unwrap_or(u16::MAX);
    // Border (2) plus vertical padding (2).
    let height = u16::try_from(lines.len() + 4).unwrap_or(u16::MAX);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    Clear.render(area, buf);
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(dialog_border_style())
                .padding(Padding::new(2, 2, 1, 1)),
        )
        .render(dialog, buf);
}
