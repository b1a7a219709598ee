//! Append-only activity log (`activity.jsonl`) in the board directory.
//!
//! One JSON object per line. The log is trimmed to the most recent
//! [`MAX_ENTRIES`] lines after each append.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskwatch_protocol::TaskId;

use crate::error::{Result, StoreError};

/// File name of the log inside the board directory.
pub const FILE_NAME: &str = "activity.jsonl";

/// Number of entries kept.
pub const MAX_ENTRIES: usize = 10_000;

/// A single logged mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    /// Zero for board-wide actions.
    pub task_id: TaskId,
    pub detail: String,
}

impl ActivityEntry {
    #[must_use]
    pub fn new(action: impl Into<String>, task_id: TaskId, detail: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            task_id,
            detail: detail.into(),
        }
    }
}

/// Handle on a board's activity log.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
    max_entries: usize,
}

impl ActivityLog {
    /// Opens the log of the board in `board_dir`. Nothing is touched on disk
    /// until the first append.
    #[must_use]
    pub fn new(board_dir: &Path) -> Self {
        Self {
            path: board_dir.join(FILE_NAME),
            max_entries: MAX_ENTRIES,
        }
    }

    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an entry, then trims old entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be appended. Trimming failures
    /// are logged and otherwise ignored.
    pub fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let io_err = |source: std::io::Error| StoreError::ActivityLog {
            path: self.path.clone(),
            source,
        };

        let mut line = serde_json::to_string(entry).map_err(|e| io_err(e.into()))?;
        line.push('\n');

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).map_err(io_err)?;
        drop(file);

        if let Err(e) = self.trim() {
            tracing::debug!(path = %self.path.display(), error = %e, "failed to trim activity log");
        }
        Ok(())
    }

    /// Reads all entries, skipping lines that do not parse.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn entries(&self) -> Result<Vec<ActivityEntry>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ActivityLog {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        Ok(content
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    fn trim(&self) -> std::io::Result<()> {
        let content = std::fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= self.max_entries {
            return Ok(());
        }

        let keep = &lines[lines.len() - self.max_entries..];
        let mut out = keep.join("\n");
        out.push('\n');
        std::fs::write(&self.path, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_creates_file() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::new(dir.path());
        log.append(&ActivityEntry::new("delete", 4, "Ship it")).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].task_id, 4);
    }

    #[test]
    fn trims_to_most_recent() {
        let dir = TempDir::new().unwrap();
        let log = ActivityLog::new(dir.path()).with_max_entries(3);
        for id in 1..=5 {
            log.append(&ActivityEntry::new("delete", id, "")).unwrap();
        }

        let ids: Vec<TaskId> = log.entries().unwrap().iter().map(|e| e.task_id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn missing_log_reads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ActivityLog::new(dir.path()).entries().unwrap().is_empty());
    }

    #[test]
    fn entry_serializes_with_expected_keys() {
        let json = serde_json::to_string(&ActivityEntry::new("clear-all", 0, "3 tasks")).unwrap();
        for key in ["timestamp", "action", "task_id", "detail"] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }
}
