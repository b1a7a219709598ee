//! Card content composition.
//!
//! A card is drawn as a bordered box whose inner lines are composed here.
//! Composition only depends on the task and the column width, which lets
//! the layout measure card heights without rendering anything.
//!
//! Two layouts exist:
//!
//! - **Grouped** (first tag differs from the title): a `PROJECT:` line with
//!   the tag and a `WT/BRANCH:` line with the rest of the title.
//! - **Plain**: the title on one line.
//!
//! Both are followed by an optional claim line and up to
//! [`MAX_BODY_LINES`] lines of body preview.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use taskwatch_protocol::Task;

use crate::layout::{CARD_BORDER_LINES, CARD_CHROME, MAX_BODY_LINES};
use crate::text::{display_width, truncate, unescape_body, wrap_text};
use crate::theme::{dim_style, tag_color, tool_style};

const PROJECT_PREFIX: &str = "PROJECT: ";
const BRANCH_PREFIX: &str = "WT/BRANCH: ";

/// Text width inside a card drawn in a column `column_width` wide.
#[must_use]
pub fn inner_width(column_width: u16) -> usize {
    usize::from(column_width).saturating_sub(CARD_CHROME).max(1)
}

/// Composes the inner lines of a card.
///
/// `seq` is the duplicate-title sequence number, shown as ` #N` after the
/// branch on grouped cards.
///
/// # Examples
///
/// ```
/// use taskwatch_protocol::Task;
/// use taskwatch_tui::card::compose_card;
///
/// let task = Task::new(1, "Fix login", "todo").with_body(r"Repro:\nclick twice");
/// let lines = compose_card(&task, 30, None);
/// assert_eq!(lines.len(), 2);
/// ```
#[must_use]
pub fn compose_card(task: &Task, column_width: u16, seq: Option<usize>) -> Vec<Line<'static>> {
    let width = inner_width(column_width);
    let mut lines = Vec::new();

    let assignee = task
        .assignee
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|a| format!("  {a}"));
    let assignee_width = assignee.as_deref().map_or(0, display_width);
    let assignee_span = || assignee.clone().map(|a| Span::styled(a, dim_style()));

    if let Some(tag) = task.group_tag() {
        lines.push(Line::from(Span::styled(
            format!("{PROJECT_PREFIX}{}", truncate(tag, width)),
            Style::default().fg(tag_color(tag)),
        )));

        let suffix = seq.map(|n| format!(" #{n}"));
        let suffix_width = suffix.as_deref().map_or(0, display_width);
        let branch = task.branch_label();
        let branch_width = width
            .saturating_sub(assignee_width + suffix_width)
            .max(1);

        let mut spans = vec![Span::styled(
            format!("{BRANCH_PREFIX}{}", truncate(branch, branch_width)),
            Style::default().fg(tag_color(branch)),
        )];
        spans.extend(suffix.map(|s| Span::styled(s, dim_style())));
        spans.extend(assignee_span());
        lines.push(Line::from(spans));
    } else {
        let style = task
            .primary_tag()
            .map_or_else(dim_style, |tag| Style::default().fg(tag_color(tag)));
        let title_width = width.saturating_sub(assignee_width).max(1);

        let mut spans = vec![Span::styled(truncate(&task.title, title_width), style)];
        spans.extend(assignee_span());
        lines.push(Line::from(spans));
    }

    if let Some(claimer) = task.claimed_by.as_deref().filter(|c| !c.is_empty()) {
        lines.push(Line::from(Span::styled(
            claimer.to_string(),
            tool_style(),
        )));
    }

    let body = unescape_body(&task.body);
    let body = body.trim();
    if !body.is_empty() {
        lines.extend(
            wrap_text(body, width, MAX_BODY_LINES)
                .into_iter()
                .map(|line| Line::from(Span::styled(line, dim_style()))),
        );
    }

    lines
}

/// Total height of a card, border included.
#[must_use]
pub fn card_height(task: &Task, column_width: u16, seq: Option<usize>) -> usize {
    compose_card(task, column_width, seq).len() + CARD_BORDER_LINES
}
