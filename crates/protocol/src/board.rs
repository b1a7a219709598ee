//! Board columns and snapshot construction.
//!
//! A [`BoardSnapshot`] is rebuilt from scratch on every reload: archived
//! tasks are dropped, the rest are ordered by priority and partitioned into
//! one [`Column`] per displayed status.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// A single status column.
///
/// `scroll_offset` is the index of the first card that may be drawn. It is
/// view state, carried across reloads by column position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub status: String,
    pub tasks: Vec<Task>,
    pub scroll_offset: usize,
}

impl Column {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            tasks: Vec::new(),
            scroll_offset: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Clamps the scroll offset to `0..=max(0, len - 1)`.
    pub fn clamp_scroll(&mut self) {
        let max = self.tasks.len().saturating_sub(1);
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }
}

/// The columns of a board plus the data derived from them on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
    /// Sequence numbers for tasks whose title is shared with another task.
    pub title_seq: HashMap<TaskId, usize>,
    /// Number of non-archived tasks, including those in undisplayed statuses.
    pub total: usize,
}

impl BoardSnapshot {
    /// Builds a snapshot from a flat task listing.
    ///
    /// `statuses` is the ordered list of displayed statuses (archived already
    /// excluded). Tasks whose status is not displayed still count towards
    /// [`BoardSnapshot::total`].
    ///
    /// # Examples
    ///
    /// ```
    /// use taskwatch_protocol::{BoardSnapshot, Priority, Task};
    ///
    /// let tasks = vec![
    ///     Task::new(1, "Write docs", "todo"),
    ///     Task::new(2, "Fix crash", "todo").with_priority(Priority::Critical),
    ///     Task::new(3, "Old", "archived"),
    /// ];
    /// let statuses = vec!["todo".to_string(), "done".to_string()];
    /// let snapshot = BoardSnapshot::build(tasks, &statuses);
    ///
    /// assert_eq!(snapshot.total, 2);
    /// assert_eq!(snapshot.columns[0].tasks[0].id, 2);
    /// assert!(snapshot.columns[1].is_empty());
    /// ```
    #[must_use]
    pub fn build(tasks: Vec<Task>, statuses: &[String]) -> Self {
        let mut tasks: Vec<Task> = tasks.into_iter().filter(|t| !t.is_archived()).collect();
        sort_by_priority(&mut tasks);
        let total = tasks.len();

        let mut columns: Vec<Column> = statuses.iter().map(Column::new).collect();
        for task in tasks {
            if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
                column.tasks.push(task);
            }
        }

        let title_seq = title_sequences(&columns);
        Self {
            columns,
            title_seq,
            total,
        }
    }

    /// Returns the number of tasks placed in a column.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }
}

/// Stable sort by priority, most urgent first.
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Numbers duplicate titles `1..=n` in column order.
///
/// Titles that appear once get no entry.
#[must_use]
pub fn title_sequences(columns: &[Column]) -> HashMap<TaskId, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in columns.iter().flat_map(|c| &c.tasks) {
        *counts.entry(task.title.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut seq = HashMap::new();
    for task in columns.iter().flat_map(|c| &c.tasks) {
        if counts.get(task.title.as_str()).copied().unwrap_or(0) > 1 {
            let n = seen.entry(task.title.as_str()).or_default();
            *n += 1;
            seq.insert(task.id, *n);
        }
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Priority;
    use proptest::prelude::*;

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["a", "b", "c", "d"]),
                prop::sample::select(vec!["todo", "doing", "archived"]),
                arb_priority(),
            ),
            0..24,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (title, status, priority))| {
                    Task::new(i as TaskId + 1, title, status).with_priority(priority)
                })
                .collect()
        })
    }

    proptest! {
        /// Each duplicated title is numbered exactly 1..=n.
        #[test]
        fn title_sequences_are_dense(tasks in arb_tasks()) {
            let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo", "doing"]));
            let mut by_title: HashMap<&str, Vec<usize>> = HashMap::new();
            for task in snapshot.columns.iter().flat_map(|c| &c.tasks) {
                if let Some(n) = snapshot.title_seq.get(&task.id) {
                    by_title.entry(task.title.as_str()).or_default().push(*n);
                }
            }
            for seqs in by_title.values() {
                prop_assert!(seqs.len() > 1);
                let expected: Vec<usize> = (1..=seqs.len()).collect();
                prop_assert_eq!(seqs, &expected);
            }
        }

        /// Columns are ordered by priority, ties keep listing order.
        #[test]
        fn columns_are_priority_ordered(tasks in arb_tasks()) {
            let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo", "doing"]));
            for column in &snapshot.columns {
                for pair in column.tasks.windows(2) {
                    prop_assert!(pair[0].priority >= pair[1].priority);
                    if pair[0].priority == pair[1].priority {
                        prop_assert!(pair[0].id < pair[1].id);
                    }
                }
            }
        }
    }

    fn statuses(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn build_drops_archived_and_partitions() {
        let tasks = vec![
            Task::new(1, "a", "todo"),
            Task::new(2, "b", "done"),
            Task::new(3, "c", "archived"),
            Task::new(4, "d", "someday"),
        ];
        let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo", "done"]));

        assert_eq!(snapshot.columns.len(), 2);
        assert_eq!(snapshot.columns[0].len(), 1);
        assert_eq!(snapshot.columns[1].len(), 1);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.placed(), 2);
    }

    #[test]
    fn priority_sort_is_stable() {
        let tasks = vec![
            Task::new(1, "first medium", "todo"),
            Task::new(2, "high", "todo").with_priority(Priority::High),
            Task::new(3, "second medium", "todo"),
            Task::new(4, "low", "todo").with_priority(Priority::Low),
        ];
        let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo"]));
        let ids: Vec<_> = snapshot.columns[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn duplicate_titles_are_numbered_in_column_order() {
        let tasks = vec![
            Task::new(10, "deploy", "done"),
            Task::new(11, "deploy", "todo"),
            Task::new(12, "unique", "todo"),
            Task::new(13, "deploy", "archived"),
        ];
        let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo", "done"]));

        assert_eq!(snapshot.title_seq.get(&11), Some(&1));
        assert_eq!(snapshot.title_seq.get(&10), Some(&2));
        assert_eq!(snapshot.title_seq.get(&12), None);
        assert_eq!(snapshot.title_seq.get(&13), None);
    }

    #[test]
    fn undisplayed_duplicates_do_not_count() {
        let tasks = vec![Task::new(1, "x", "todo"), Task::new(2, "x", "someday")];
        let snapshot = BoardSnapshot::build(tasks, &statuses(&["todo"]));
        assert!(snapshot.title_seq.is_empty());
    }

    #[test]
    fn clamp_scroll_respects_length() {
        let mut column = Column::new("todo");
        column.scroll_offset = 5;
        column.clamp_scroll();
        assert_eq!(column.scroll_offset, 0);

        column.tasks = vec![Task::new(1, "a", "todo"), Task::new(2, "b", "todo")];
        column.scroll_offset = 5;
        column.clamp_scroll();
        assert_eq!(column.scroll_offset, 1);
    }
}
