//! Board view state.
//!
//! Holds the current snapshot together with everything the view layers on
//! top of it: the cursor, per-column scroll offsets, the open dialog, the
//! error banner, and the last click for double-click detection.

use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

use taskwatch_config::{Config, ParsedThreshold};
use taskwatch_protocol::{BoardSnapshot, Column, Listing, Task, TaskId};

use crate::card::card_height;
use crate::layout::{
    DOUBLE_CLICK_WINDOW, card_at_line, chrome_height, column_width, ensure_visible, visible_cards,
};

/// Which screen is shown and therefore which keys apply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The board itself.
    #[default]
    Normal,
    /// Asking whether to archive one task.
    ConfirmDelete { id: TaskId, title: String },
    /// Asking whether to archive every task.
    ConfirmClearAll { count: usize },
}

impl ViewMode {
    #[must_use]
    pub fn is_dialog(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Board-level settings taken from the configuration once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub name: String,
    /// Displayed statuses, in column order.
    pub statuses: Vec<String>,
    pub wip_limits: BTreeMap<String, usize>,
    /// Statuses whose cards do not show their age.
    pub hidden_durations: HashSet<String>,
    /// Age thresholds, shortest first.
    pub thresholds: Vec<ParsedThreshold>,
    pub tick: Duration,
}

impl ViewSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let statuses = config.display_statuses();
        let hidden_durations = statuses
            .iter()
            .filter(|s| !config.show_duration(s))
            .cloned()
            .collect();
        let wip_limits = statuses
            .iter()
            .filter_map(|s| config.wip_limit(s).map(|n| (s.clone(), n)))
            .collect();
        Self {
            name: config.board.name.clone(),
            statuses,
            wip_limits,
            hidden_durations,
            thresholds: config.age_thresholds(),
            tick: config.tick_interval(),
        }
    }

    #[must_use]
    pub fn wip_limit(&self, status: &str) -> Option<usize> {
        self.wip_limits.get(status).copied()
    }

    #[must_use]
    pub fn show_duration(&self, status: &str) -> bool {
        !self.hidden_durations.contains(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Click {
    column: usize,
    row: usize,
    at: Instant,
}

/// The state of the board view.
#[derive(Debug, Clone)]
pub struct BoardState {
    pub settings: ViewSettings,
    pub snapshot: BoardSnapshot,
    pub active_col: usize,
    pub active_row: usize,
    /// Terminal size; zero until the first resize.
    pub width: u16,
    pub height: u16,
    /// Last reload or mutation failure, shown until the next good reload.
    pub error: Option<String>,
    /// Task files skipped by the last reload.
    pub skipped: usize,
    pub mode: ViewMode,
    last_click: Option<Click>,
}

impl BoardState {
    /// Creates an empty board. Columns appear on the first reload.
    #[must_use]
    pub fn new(settings: ViewSettings) -> Self {
        let snapshot = BoardSnapshot::build(Vec::new(), &settings.statuses);
        Self {
            settings,
            snapshot,
            active_col: 0,
            active_row: 0,
            width: 0,
            height: 0,
            error: None,
            skipped: 0,
            mode: ViewMode::Normal,
            last_click: None,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.snapshot.columns
    }

    #[must_use]
    pub fn active_column(&self) -> Option<&Column> {
        self.snapshot.columns.get(self.active_col)
    }

    /// The task under the cursor, if the active column has any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.active_column()?.tasks.get(self.active_row)
    }

    #[must_use]
    pub fn column_width(&self) -> u16 {
        column_width(self.width, self.snapshot.columns.len())
    }

    /// Lines available to each column.
    #[must_use]
    pub fn board_height(&self) -> i32 {
        i32::from(self.height) - i32::from(chrome_height(self.error.is_some()))
    }

    /// Heights of every card in a column at the current width.
    #[must_use]
    pub fn card_heights(&self, col: usize) -> Vec<usize> {
        let width = self.column_width();
        self.snapshot.columns.get(col).map_or_else(Vec::new, |column| {
            column
                .tasks
                .iter()
                .map(|task| card_height(task, width, self.snapshot.title_seq.get(&task.id).copied()))
                .collect()
        })
    }

    /// Number of cards drawn for a column from `offset`.
    #[must_use]
    pub fn visible_count(&self, col: usize, offset: usize) -> usize {
        visible_cards(&self.card_heights(col), offset, self.board_height())
    }

    /// Scrolls the active column so the cursor is visible.
    pub fn ensure_visible(&mut self) {
        let col = self.active_col;
        let heights = self.card_heights(col);
        let budget = self.board_height();
        let row = self.active_row;
        if let Some(column) = self.snapshot.columns.get_mut(col) {
            column.scroll_offset = ensure_visible(row, column.scroll_offset, heights.len(), |off| {
                visible_cards(&heights, off, budget)
            });
        }
    }

    /// Pulls the cursor back inside the active column, then scrolls to it.
    pub fn clamp_row(&mut self) {
        match self.active_column().map(Column::len) {
            None | Some(0) => {
                self.active_row = 0;
                return;
            }
            Some(len) if self.active_row >= len => self.active_row = len - 1,
            Some(_) => {}
        }
        self.ensure_visible();
    }

    pub fn navigate_left(&mut self) {
        if self.active_col > 0 {
            self.active_col -= 1;
            self.clamp_row();
        }
    }

    pub fn navigate_right(&mut self) {
        if self.active_col + 1 < self.snapshot.columns.len() {
            self.active_col += 1;
            self.clamp_row();
        }
    }

    pub fn navigate_up(&mut self) {
        if self.active_row > 0 {
            self.active_row -= 1;
            self.ensure_visible();
        }
    }

    pub fn navigate_down(&mut self) {
        let len = self.active_column().map_or(0, Column::len);
        if self.active_row + 1 < len {
            self.active_row += 1;
            self.ensure_visible();
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp_row();
    }

    /// Replaces the snapshot after a successful reload.
    ///
    /// Scroll offsets carry over by column position, the cursor is clamped
    /// into the new columns, and any error banner is cleared.
    pub fn apply_listing(&mut self, listing: Listing) {
        let mut snapshot = BoardSnapshot::build(listing.tasks, &self.settings.statuses);
        for (new, old) in snapshot.columns.iter_mut().zip(&self.snapshot.columns) {
            new.scroll_offset = old.scroll_offset;
            new.clamp_scroll();
        }
        self.snapshot = snapshot;
        self.skipped = listing.warnings.len();
        self.error = None;

        if self.active_col >= self.snapshot.columns.len() {
            self.active_col = self.snapshot.columns.len().saturating_sub(1);
        }
        self.clamp_row();
    }

    /// Records a failure and keeps showing the previous snapshot.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.clamp_row();
    }

    /// Handles a left click at terminal coordinates.
    ///
    /// Clicking a card selects it; clicking elsewhere in a column selects the
    /// column. Returns the task to activate when the click completes a
    /// double-click on the same card.
    pub fn click(&mut self, x: u16, y: u16, now: Instant) -> Option<TaskId> {
        if self.mode.is_dialog() {
            return None;
        }
        let width = self.column_width();
        if width == 0 {
            return None;
        }
        let col = usize::from(x / width);
        if col >= self.snapshot.columns.len() || i32::from(y) >= self.board_height() {
            return None;
        }

        let Some(line) = self.card_line(col, y) else {
            self.select_column(col);
            return None;
        };
        let offset = self.snapshot.columns[col].scroll_offset;
        let end = offset + self.visible_count(col, offset);
        let Some(row) = card_at_line(&self.card_heights(col), offset, end, line) else {
            self.select_column(col);
            return None;
        };

        let double = self.last_click.is_some_and(|last| {
            last.column == col
                && last.row == row
                && now.saturating_duration_since(last.at) < DOUBLE_CLICK_WINDOW
        });
        self.active_col = col;
        self.active_row = row;
        self.last_click = Some(Click {
            column: col,
            row,
            at: now,
        });
        self.ensure_visible();

        if double {
            self.selected_task().map(|t| t.id)
        } else {
            None
        }
    }

    /// Converts a terminal row into a line offset within the column's cards,
    /// or `None` for the header and the "more above" indicator.
    fn card_line(&self, col: usize, y: u16) -> Option<usize> {
        let line = usize::from(y).checked_sub(1)?;
        if self.snapshot.columns[col].scroll_offset > 0 {
            line.checked_sub(1)
        } else {
            Some(line)
        }
    }

    fn select_column(&mut self, col: usize) {
        self.active_col = col;
        self.clamp_row();
    }
}
