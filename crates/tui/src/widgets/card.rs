//! Task card rendering.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph, Widget},
};
use taskwatch_protocol::Task;

use crate::card::compose_card;
use crate::state::ViewSettings;
use crate::text::human_duration;
use crate::theme::{CardTone, age_color, priority_marker};

/// Renders a task card filling `area`.
///
/// The top border carries the priority marker of urgent tasks and the
/// bottom border the task's age, for statuses that show durations.
pub fn render_task_card(
    task: &Task,
    seq: Option<usize>,
    selected: bool,
    settings: &ViewSettings,
    now: DateTime<Utc>,
    area: Rect,
    buf: &mut Buffer,
) {
    let tone = CardTone::for_card(selected, task.blocked, task.primary_tag());
    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(tone.border_style())
        .padding(Padding::horizontal(1));

    if let Some(marker) = priority_marker(task.priority) {
        block = block.title_top(Line::from(marker).right_aligned());
    }
    if settings.show_duration(&task.status) {
        let age = task.age(now);
        let label = Span::styled(
            human_duration(age),
            Style::default().fg(age_color(&settings.thresholds, age)),
        );
        block = block.title_bottom(Line::from(label).right_aligned());
    }

    Paragraph::new(compose_card(task, area.width, seq))
        .block(block)
        .render(area, buf);
}

/// Renders a card that may extend past `clip`, keeping only the rows
/// inside it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_task_card_clipped(
    task: &Task,
    seq: Option<usize>,
    selected: bool,
    settings: &ViewSettings,
    now: DateTime<Utc>,
    area: Rect,
    clip: Rect,
    buf: &mut Buffer,
) {
    let visible = area.intersection(clip);
    if visible.is_empty() {
        return;
    }
    if visible == area {
        render_task_card(task, seq, selected, settings, now, area, buf);
        return;
    }

    let mut scratch = Buffer::empty(area);
    render_task_card(task, seq, selected, settings, now, area, &mut scratch);
    for y in visible.top()..visible.bottom() {
        for x in visible.left()..visible.right() {
            if let (Some(src), Some(dst)) = (scratch.cell((x, y)), buf.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}
