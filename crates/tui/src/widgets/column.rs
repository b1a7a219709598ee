//! Column rendering: header, scroll indicators and the visible cards.

use chrono::{DateTime, Utc};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use taskwatch_protocol::Column;

use crate::state::BoardState;
use crate::text::truncate;
use crate::theme::{dim_style, header_style};
use crate::widgets::card::render_task_card_clipped;

/// Header text: `status (n)`, or `status (n/limit)` under a WIP limit.
#[must_use]
pub fn header_text(column: &Column, wip_limit: Option<usize>) -> String {
    match wip_limit {
        Some(limit) => format!("{} ({}/{limit})", column.status, column.len()),
        None => format!("{} ({})", column.status, column.len()),
    }
}

/// Renders column `index` of the board into `area`.
///
/// `area` is the column's share of the board. Cards are taken from the
/// column's scroll offset; anything that does not fit is clipped.
pub fn render_column(
    state: &BoardState,
    index: usize,
    now: DateTime<Utc>,
    area: Rect,
    buf: &mut Buffer,
) {
    let Some(column) = state.columns().get(index) else {
        return;
    };
    if area.is_empty() {
        return;
    }

    let width = usize::from(area.width);
    let header = truncate(
        &header_text(column, state.settings.wip_limit(&column.status)),
        width.saturating_sub(2),
    );
    let active = index == state.active_col;
    buf.set_style(Rect::new(area.x, area.y, area.width, 1), header_style(active));
    buf.set_stringn(
        area.x + 1,
        area.y,
        &header,
        width.saturating_sub(1),
        header_style(active),
    );

    let mut y = area.y + 1;
    let bottom = area.bottom();
    let line = |y: &mut u16, text: &str, style: Style, buf: &mut Buffer| {
        if *y < bottom {
            buf.set_stringn(area.x, *y, truncate(text, width), width, style);
        }
        *y = y.saturating_add(1);
    };

    if column.is_empty() {
        line(&mut y, "  (empty)", dim_style(), buf);
        return;
    }

    let start = column.scroll_offset.min(column.len());
    let end = (start + state.visible_count(index, start)).min(column.len());
    if start > 0 {
        line(&mut y, &format!("  ↑ {start} more"), dim_style(), buf);
    }

    let heights = state.card_heights(index);
    for row in start..end {
        let task = &column.tasks[row];
        let height = u16::try_from(heights[row]).unwrap_or(u16::MAX);
        let card = Rect::new(area.x, y, area.width, height);
        let selected = active && row == state.active_row;
        let seq = state.snapshot.title_seq.get(&task.id).copied();
        render_task_card_clipped(task, seq, selected, &state.settings, now, card, area, buf);
        y = y.saturating_add(height);
    }

    if end < column.len() {
        line(
            &mut y,
            &format!("  ↓ {} more", column.len() - end),
            dim_style(),
            buf,
        );
    }
}
