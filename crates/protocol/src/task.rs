//! Task-related types for the board.
//!
//! This module defines the task identifier, the closed priority scale and the
//! [`Task`] record as it is stored in a task file's frontmatter.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier of a task, unique within a board.
pub type TaskId = u64;

/// Status name that removes a task from the board without deleting its file.
pub const ARCHIVED_STATUS: &str = "archived";

/// Priority of a task.
///
/// Ordering follows urgency, so `Critical` compares greater than `Low`.
/// Unknown values read from disk fall back to `Medium`.
///
/// # Examples
///
/// ```
/// use taskwatch_protocol::Priority;
///
/// assert!(Priority::Critical > Priority::Low);
/// assert_eq!(Priority::parse_lenient("HIGH"), Priority::High);
/// assert_eq!(Priority::parse_lenient("whenever"), Priority::Medium);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The default.
    #[default]
    Medium,
    /// Should be picked up next.
    High,
    /// Drop everything.
    Critical,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Parses a priority name, ignoring case. Unknown names map to `Medium`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Medium,
        }
    }

    /// Returns the lowercase name used on disk.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the board.
///
/// Mirrors the YAML frontmatter of a task file; [`Task::body`] holds the
/// markdown below it and is never part of the frontmatter.
///
/// # Examples
///
/// ```
/// use taskwatch_protocol::{Priority, Task};
///
/// let task = Task::new(7, "Refactor I/O layer", "todo").with_priority(Priority::High);
/// assert_eq!(task.id, 7);
/// assert_eq!(task.priority, Priority::High);
/// assert!(task.primary_tag().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Ordered tags; the first one groups the task on shared boards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    /// Free-form description of whoever currently holds the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Markdown body below the frontmatter.
    #[serde(skip)]
    pub body: String,
}

impl Task {
    /// Creates a task with the given id, title and status.
    ///
    /// Timestamps are set to the current time; everything else is empty.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            status: status.into(),
            priority: Priority::default(),
            created: now,
            updated: now,
            started: None,
            completed: None,
            assignee: None,
            tags: Vec::new(),
            due: None,
            estimate: None,
            parent: None,
            depends_on: Vec::new(),
            blocked: false,
            block_reason: None,
            claimed_by: None,
            claimed_at: None,
            class: None,
            body: String::new(),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = updated;
        self
    }

    /// Returns the first tag, if any.
    #[must_use]
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Returns the project tag when the task belongs to a shared board.
    ///
    /// A task is grouped when its first tag exists and differs from its
    /// title; such cards show a project line and a branch line.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskwatch_protocol::Task;
    ///
    /// let grouped = Task::new(1, "api/fix-login", "todo").with_tags(["api"]);
    /// assert_eq!(grouped.group_tag(), Some("api"));
    ///
    /// let plain = Task::new(2, "api", "todo").with_tags(["api"]);
    /// assert_eq!(plain.group_tag(), None);
    /// ```
    #[must_use]
    pub fn group_tag(&self) -> Option<&str> {
        self.primary_tag().filter(|tag| *tag != self.title)
    }

    /// Returns the title with the `<group>/` prefix removed.
    ///
    /// Falls back to the full title for ungrouped tasks.
    #[must_use]
    pub fn branch_label(&self) -> &str {
        match self.group_tag() {
            Some(tag) => self
                .title
                .strip_prefix(tag)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(&self.title),
            None => &self.title,
        }
    }

    /// Returns `true` if the task is in the archived status.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.status == ARCHIVED_STATUS
    }

    /// Time elapsed since the last update, clamped at zero.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.updated).to_std().unwrap_or_default()
    }

    /// Moves the task to the archived status.
    ///
    /// Archiving is terminal: `completed` is stamped, and `started` is filled
    /// in when the task never left its initial status.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = ARCHIVED_STATUS.to_string();
        self.updated = now;
        self.completed = Some(now);
        if self.started.is_none() {
            self.started = Some(now);
        }
    }
}
