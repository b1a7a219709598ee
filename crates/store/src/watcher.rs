//! Debounced change notifications for a board.
//!
//! Watches the task directory (and the board directory) without recursion.
//! Every quiet period that saw at least one create, modify or remove event
//! produces a single `()` on the returned channel. The channel holds one
//! pending signal; further signals coalesce until the receiver drains it.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use taskwatch_store::BoardWatcher;
//!
//! # async fn example() -> taskwatch_store::Result<()> {
//! let paths = vec!["kanban/tasks".into(), "kanban".into()];
//! let (_watcher, mut rx) = BoardWatcher::spawn(&paths, Duration::from_millis(100))?;
//! while rx.recv().await.is_some() {
//!     println!("board changed");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, Debouncer, RecommendedCache, new_debouncer};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};

/// Default quiet period before a batch of events is delivered.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Keeps the filesystem watch alive. Dropping it stops notifications.
pub struct BoardWatcher {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    paths: Vec<PathBuf>,
}

impl std::fmt::Debug for BoardWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardWatcher")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl BoardWatcher {
    /// Starts watching `paths`.
    ///
    /// Paths that do not exist are skipped with a warning, so a board whose
    /// task directory has not been created yet still gets board-level
    /// notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying watcher cannot be created or an
    /// existing path cannot be watched.
    pub fn spawn(
        paths: &[PathBuf],
        debounce: Duration,
    ) -> Result<(Self, mpsc::Receiver<()>)> {
        let (tx, rx) = mpsc::channel(1);

        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    if events.iter().any(|e| is_relevant(&e.event.kind)) {
                        // A full channel already holds a pending reload.
                        let _ = tx.try_send(());
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!(?error, "file watcher error");
                    }
                }
            }
        })
        .map_err(|e| StoreError::Watch {
            path: paths.first().cloned().unwrap_or_default(),
            source: e,
        })?;

        let mut watched = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.exists() {
                warn!(path = %path.display(), "not watching missing path");
                continue;
            }
            debouncer
                .watch(path, RecursiveMode::NonRecursive)
                .map_err(|e| StoreError::Watch {
                    path: path.clone(),
                    source: e,
                })?;
            debug!(path = %path.display(), "watching");
            watched.push(path.clone());
        }

        info!(paths = watched.len(), "board watcher started");
        Ok((
            Self {
                _debouncer: debouncer,
                paths: watched,
            },
            rx,
        ))
    }

    /// Paths actually being watched.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Returns `true` if `path` is being watched.
    #[must_use]
    pub fn is_watching(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Event kinds that can change what the board shows. Renames arrive as
/// modify events.
fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};
    use tempfile::TempDir;

    #[test]
    fn relevant_event_kinds() {
        assert!(is_relevant(&EventKind::Create(CreateKind::File)));
        assert!(is_relevant(&EventKind::Modify(ModifyKind::Name(
            RenameMode::Both
        ))));
        assert!(is_relevant(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_relevant(&EventKind::Access(AccessKind::Read)));
    }

    #[tokio::test]
    async fn skips_missing_paths() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let (watcher, _rx) =
            BoardWatcher::spawn(&[missing.clone(), dir.path().to_path_buf()], DEFAULT_DEBOUNCE)
                .unwrap();
        assert!(!watcher.is_watching(&missing));
        assert!(watcher.is_watching(dir.path()));
    }

    #[tokio::test]
    async fn signals_on_file_creation() {
        let dir = TempDir::new().unwrap();
        let (_watcher, mut rx) =
            BoardWatcher::spawn(&[dir.path().to_path_buf()], Duration::from_millis(50)).unwrap();

        std::fs::write(dir.path().join("001-new.md"), "---\nid: 1\n---\n").unwrap();

        let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(got, Ok(Some(()))));
    }
}
