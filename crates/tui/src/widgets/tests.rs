//! Rendering tests for the board widgets.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use taskwatch_protocol::{Listing, Priority, Task};

use super::{render_board, render_task_card, status_text};
use crate::state::{BoardState, ViewMode, ViewSettings};
use crate::test_utils::buffer_to_string;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
}

/// Creates a task updated two hours before [`now`].
fn test_task(id: u64, title: &str, status: &str) -> Task {
    Task::new(id, title, status).with_updated(now() - chrono::Duration::hours(2))
}

fn settings() -> ViewSettings {
    ViewSettings {
        name: "Test".to_string(),
        statuses: vec!["todo".to_string(), "done".to_string()],
        wip_limits: BTreeMap::new(),
        hidden_durations: HashSet::new(),
        thresholds: Vec::new(),
        tick: Duration::from_secs(30),
    }
}

fn board_with(settings: ViewSettings, tasks: Vec<Task>, width: u16, height: u16) -> BoardState {
    let mut state = BoardState::new(settings);
    state.apply_listing(Listing {
        tasks,
        warnings: Vec::new(),
    });
    state.resize(width, height);
    state
}

fn render(state: &BoardState) -> (Buffer, Vec<String>) {
    let area = Rect::new(0, 0, state.width.max(20), state.height.max(1));
    let mut buf = Buffer::empty(area);
    render_board(state, now(), area, &mut buf);
    let text = buffer_to_string(&buf);
    let lines = text.lines().map(ToString::to_string).collect();
    (buf, lines)
}

fn five_todo() -> Vec<Task> {
    (1..=5)
        .map(|id| test_task(id, &format!("Task {id}"), "todo"))
        .collect()
}

#[test]
fn loading_before_first_resize() {
    let state = BoardState::new(settings());
    let (_, lines) = render(&state);
    assert_eq!(lines[0], "Loading...");
}

#[test]
fn no_statuses_message() {
    let mut empty = settings();
    empty.statuses.clear();
    let state = board_with(empty, Vec::new(), 40, 10);
    let (_, lines) = render(&state);
    assert_eq!(lines[0], "No statuses configured.");
}

#[test]
fn board_shows_columns_cards_and_status_bar() {
    let state = board_with(
        settings(),
        vec![test_task(1, "Write docs", "todo"), test_task(2, "Ship", "done")],
        60,
        12,
    );
    let (_, lines) = render(&state);

    assert!(lines[0].starts_with(" todo (1)"), "{:?}", lines[0]);
    assert!(lines[0].contains(" done (1)"));
    assert!(lines[2].contains("Write docs"));
    assert!(lines[2].contains("Ship"));
    assert!(lines[3].contains("2h"), "age label in bottom border");
    assert_eq!(lines[10], "");
    assert_eq!(lines[11], " Test | 2 tasks | d:del C:clear-all q:quit");
}

#[test]
fn card_borders_carry_marker_and_age() {
    let task = test_task(1, "Fix login", "todo")
        .with_priority(Priority::High)
        .with_updated(now() - chrono::Duration::days(3));
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    render_task_card(&task, None, false, &settings(), now(), area, &mut buf);

    let text = buffer_to_string(&buf);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with('╭') && lines[0].ends_with("!╮"), "{text}");
    assert_eq!(lines[1], "│ Fix login        │");
    assert!(lines[2].ends_with("3d╯"), "{text}");
}

#[test]
fn hidden_duration_status_has_plain_bottom_border() {
    let mut settings = settings();
    settings.hidden_durations.insert("done".to_string());
    let task = test_task(1, "Old", "done");
    let area = Rect::new(0, 0, 20, 3);
    let mut buf = Buffer::empty(area);
    render_task_card(&task, None, false, &settings, now(), area, &mut buf);

    let text = buffer_to_string(&buf);
    assert_eq!(text.lines().nth(2), Some("╰──────────────────╯"));
}

#[test]
fn selected_card_border_is_highlighted() {
    let state = board_with(settings(), five_todo(), 60, 20);
    let (buf, _) = render(&state);
    // Top-left corner of the first card in the active column.
    assert_eq!(buf.cell((0, 1)).map(|c| c.fg), Some(Color::Indexed(226)));
    // The second card is not selected.
    assert_ne!(buf.cell((0, 4)).map(|c| c.fg), Some(Color::Indexed(226)));
}

#[test]
fn blocked_card_border_is_red() {
    let mut blocked = test_task(2, "Stuck", "done");
    blocked.blocked = true;
    let state = board_with(settings(), vec![blocked], 60, 10);
    let (buf, _) = render(&state);
    assert_eq!(buf.cell((30, 1)).map(|c| c.fg), Some(Color::Indexed(196)));
}

#[test]
fn more_below_indicator() {
    // 13 rows: 11 for the board. Header, three cards, indicator.
    let state = board_with(settings(), five_todo(), 60, 13);
    let (_, lines) = render(&state);
    assert!(lines[2].contains("Task 1"));
    assert!(lines[8].contains("Task 3"));
    assert!(lines[10].starts_with("  ↓ 2 more"), "{:?}", lines[10]);
}

#[test]
fn more_above_indicator_after_scrolling() {
    let mut state = board_with(settings(), five_todo(), 60, 13);
    for _ in 0..4 {
        state.navigate_down();
    }
    let (_, lines) = render(&state);
    assert!(lines[1].starts_with("  ↑ 2 more"), "{:?}", lines[1]);
    assert!(lines[3].contains("Task 3"));
    assert!(lines[9].contains("Task 5"));
    assert!(!lines.iter().any(|l| l.contains('↓')));
}

#[test]
fn empty_column_placeholder() {
    let state = board_with(settings(), vec![test_task(1, "Only", "todo")], 60, 10);
    let (_, lines) = render(&state);
    assert!(lines[1].contains("  (empty)"));
}

#[test]
fn wip_limit_in_header() {
    let mut settings = settings();
    settings.wip_limits.insert("todo".to_string(), 3);
    let state = board_with(settings, five_todo(), 60, 20);
    let (_, lines) = render(&state);
    assert!(lines[0].starts_with(" todo (5/3)"));
}

#[test]
fn error_banner_above_status_bar() {
    let mut state = board_with(settings(), five_todo(), 60, 12);
    state.apply_error("cannot read tasks");
    let (_, lines) = render(&state);
    assert_eq!(lines[10], "Error: cannot read tasks");
    assert!(lines[11].starts_with(" Test | 5 tasks"));
}

#[test]
fn tall_card_is_clipped_to_column() {
    let tall = test_task(1, "Tall", "todo").with_body("one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen");
    // 6 rows: 4 for the board. Header plus three rows of a seven-row card.
    let state = board_with(settings(), vec![tall], 30, 6);
    let (_, lines) = render(&state);
    assert!(lines[1].starts_with('╭'));
    assert!(lines[2].contains("Tall"));
    assert!(!lines[3].contains('╰'));
    assert_eq!(lines[4], "");
}

#[test]
fn skipped_files_in_status_text() {
    assert_eq!(
        status_text("Work", 4, 2),
        " Work | 4 tasks | d:del C:clear-all q:quit | 2 skipped"
    );
}

#[test]
fn status_bar_truncates_to_width() {
    let state = board_with(settings(), five_todo(), 20, 10);
    let (_, lines) = render(&state);
    assert_eq!(lines[9], " Test | 5 tasks |...");
}

#[test]
fn delete_dialog_replaces_board() {
    let mut state = board_with(settings(), five_todo(), 60, 20);
    state.mode = ViewMode::ConfirmDelete {
        id: 3,
        title: "Task 3".to_string(),
    };
    let (_, lines) = render(&state);
    let text = lines.join("\n");
    assert!(text.contains("Delete task?"));
    assert!(text.contains("  #3: Task 3"));
    assert!(text.contains("y:yes  n:no"));
    assert!(!text.contains("todo (5)"));
}

#[test]
fn clear_all_dialog_shows_count() {
    let mut state = board_with(settings(), five_todo(), 60, 20);
    state.mode = ViewMode::ConfirmClearAll { count: 5 };
    let (_, lines) = render(&state);
    let text = lines.join("\n");
    assert!(text.contains("Delete ALL tasks?"));
    assert!(text.contains("5 tasks will be removed from the board."));
}

#[test]
fn board_snapshot() {
    let state = board_with(
        settings(),
        vec![
            test_task(1, "Write docs", "todo").with_assignee("ann"),
            test_task(2, "Ship", "done"),
        ],
        40,
        8,
    );
    let (_, lines) = render(&state);
    insta::assert_snapshot!(lines.join("\n"), @r"
     todo (1)            done (1)
    ╭──────────────────╮╭──────────────────╮
    │ Write docs  ann  ││ Ship             │
    ╰────────────────2h╯╰────────────────2h╯



     Test | 2 tasks | d:del C:clear-all q...
    ");
}
