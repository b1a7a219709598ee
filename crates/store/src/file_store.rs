//! File-backed [`TaskStore`]: one markdown file per task.

use std::path::{Path, PathBuf};

use chrono::Utc;
use taskwatch_config::Config;
use taskwatch_protocol::{Listing, ReadWarning, Task, TaskId, TaskStore};
use tracing::{debug, info, instrument, warn};

use crate::activity::{ActivityEntry, ActivityLog};
use crate::error::{Result, StoreError};
use crate::frontmatter::{self, id_from_file_name, read_task, write_task};

/// Task files in a directory, plus the board's activity log.
///
/// # Examples
///
/// ```no_run
/// use taskwatch_protocol::TaskStore;
/// use taskwatch_store::FileStore;
///
/// # fn main() -> taskwatch_store::Result<()> {
/// let store = FileStore::new("kanban/tasks", "kanban");
/// let listing = store.list_all()?;
/// println!("{} tasks, {} skipped", listing.tasks.len(), listing.warnings.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    tasks_dir: PathBuf,
    activity: ActivityLog,
}

impl FileStore {
    /// Creates a store over `tasks_dir`, logging mutations into `board_dir`.
    #[must_use]
    pub fn new(tasks_dir: impl Into<PathBuf>, board_dir: impl AsRef<Path>) -> Self {
        Self {
            tasks_dir: tasks_dir.into(),
            activity: ActivityLog::new(board_dir.as_ref()),
        }
    }

    /// Creates the store for a loaded board.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tasks_path(), config.dir())
    }

    #[must_use]
    pub fn tasks_dir(&self) -> &Path {
        &self.tasks_dir
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Writes a new task file named after its ID and title.
    ///
    /// # Errors
    ///
    /// Returns an error if the task directory or file cannot be written.
    pub fn insert(&self, task: &Task) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.tasks_dir).map_err(|e| StoreError::WriteFile {
            path: self.tasks_dir.clone(),
            source: e,
        })?;
        let path = self
            .tasks_dir
            .join(frontmatter::file_name(task.id, &task.title));
        write_task(&path, task)?;
        Ok(path)
    }

    /// Locates the file of a task by its numeric file name prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when no file matches.
    pub fn find(&self, id: TaskId) -> Result<PathBuf> {
        self.markdown_files()?
            .into_iter()
            .find(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(id_from_file_name)
                    == Some(id)
            })
            .ok_or(StoreError::TaskNotFound(id))
    }

    /// Markdown files in the task directory, sorted by name. A missing
    /// directory yields no files.
    fn markdown_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.tasks_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadDir {
                    path: self.tasks_dir.clone(),
                    source: e,
                });
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        files.sort();
        Ok(files)
    }

    fn log(&self, entry: ActivityEntry) {
        if let Err(e) = self.activity.append(&entry) {
            warn!(error = %e, action = %entry.action, "failed to record activity");
        }
    }
}

impl TaskStore for FileStore {
    type Error = StoreError;

    #[instrument(level = "debug", skip(self), fields(dir = %self.tasks_dir.display()))]
    fn list_all(&self) -> Result<Listing> {
        let mut listing = Listing::default();
        for path in self.markdown_files()? {
            match read_task(&path) {
                Ok(task) => listing.tasks.push(task),
                Err(e) => {
                    let file = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    warn!(%file, error = %e, "skipping malformed task file");
                    listing.warnings.push(ReadWarning {
                        file,
                        message: e.to_string(),
                    });
                }
            }
        }
        debug!(
            tasks = listing.tasks.len(),
            warnings = listing.warnings.len(),
            "listed tasks"
        );
        Ok(listing)
    }

    #[instrument(level = "debug", skip(self))]
    fn archive(&self, id: TaskId) -> Result<()> {
        let path = self.find(id)?;
        let mut task = read_task(&path)?;
        if task.is_archived() {
            debug!(id, "task already archived");
            return Ok(());
        }
        task.archive(Utc::now());
        write_task(&path, &task)?;

        info!(id, title = %task.title, "archived task");
        self.log(ActivityEntry::new("delete", id, task.title));
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn archive_all(&self) -> Result<usize> {
        let now = Utc::now();
        let mut count = 0;
        for path in self.markdown_files()? {
            let Ok(mut task) = read_task(&path) else {
                continue;
            };
            if task.is_archived() {
                continue;
            }
            task.archive(now);
            write_task(&path, &task)?;
            count += 1;
        }

        info!(count, "archived all tasks");
        self.log(ActivityEntry::new(
            "clear-all",
            0,
            format!("archived {count} tasks"),
        ));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("tasks"), dir.path())
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let listing = store(&dir).list_all().unwrap();
        assert!(listing.tasks.is_empty());
        assert!(listing.warnings.is_empty());
    }

    #[test]
    fn malformed_files_become_warnings() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.insert(&Task::new(1, "Good", "todo")).unwrap();
        std::fs::write(store.tasks_dir().join("002-bad.md"), "no frontmatter").unwrap();
        std::fs::write(store.tasks_dir().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(store.tasks_dir().join("003-dir.md")).unwrap();

        let listing = store.list_all().unwrap();
        assert_eq!(listing.tasks.len(), 1);
        assert_eq!(listing.warnings.len(), 1);
        assert_eq!(listing.warnings[0].file, "002-bad.md");
    }

    #[test]
    fn archive_rewrites_status_and_logs() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.insert(&Task::new(7, "Ship it", "review")).unwrap();

        store.archive(7).unwrap();

        let task = read_task(&path).unwrap();
        assert!(task.is_archived());
        assert!(task.completed.is_some());

        let entries = store.activity().entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].task_id, 7);
    }

    #[test]
    fn archive_leaves_archived_task_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.insert(&Task::new(3, "Done long ago", "todo")).unwrap();
        store.archive(3).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        store.archive(3).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
        assert_eq!(store.activity().entries().unwrap().len(), 1);
    }

    #[test]
    fn archive_unknown_id_fails() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.insert(&Task::new(1, "Only", "todo")).unwrap();
        assert!(matches!(
            store.archive(99),
            Err(StoreError::TaskNotFound(99))
        ));
    }

    #[test]
    fn archive_all_skips_archived_and_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.insert(&Task::new(1, "a", "todo")).unwrap();
        store.insert(&Task::new(2, "b", "done")).unwrap();
        store.insert(&Task::new(3, "c", "archived")).unwrap();
        std::fs::write(store.tasks_dir().join("004-bad.md"), "garbage").unwrap();

        assert_eq!(store.archive_all().unwrap(), 2);
        let listing = store.list_all().unwrap();
        assert!(listing.tasks.iter().all(Task::is_archived));

        let entries = store.activity().entries().unwrap();
        assert_eq!(entries.last().map(|e| e.action.as_str()), Some("clear-all"));
    }

    #[test]
    fn find_matches_zero_padded_prefix() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.insert(&Task::new(12, "Twelve", "todo")).unwrap();
        assert_eq!(store.find(12).unwrap(), path);
        assert!(path.ends_with("012-twelve.md"));
    }
}
