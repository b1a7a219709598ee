//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct describing one board:
//! its name, where task files live, the ordered statuses, WIP limits, and
//! display settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskwatch_protocol::ARCHIVED_STATUS;

use crate::display::{DisplayConfig, ParsedThreshold};
use crate::error::{ConfigError, Result};
use crate::persistence::{CONFIG_FILE_NAME, read_config_file, user_board_dir, write_config_file};
use crate::status::StatusConfig;

/// Default directory for task files, relative to the board directory.
pub const DEFAULT_TASKS_DIR: &str = "tasks";

/// Directory holding per-task session descriptors.
pub const SESSIONS_DIR: &str = ".sessions";

/// Directory holding the application log.
pub const LOGS_DIR: &str = "logs";

/// Board identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Shown in the status bar.
    pub name: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            name: "board".to_string(),
        }
    }
}

fn default_tasks_dir() -> String {
    DEFAULT_TASKS_DIR.to_string()
}

fn default_statuses() -> Vec<StatusConfig> {
    vec![
        StatusConfig::with_duration("backlog", false),
        StatusConfig::new("todo"),
        StatusConfig::new("in-progress"),
        StatusConfig::new("review"),
        StatusConfig::with_duration("done", false),
        StatusConfig::with_duration(ARCHIVED_STATUS, false),
    ]
}

fn agent_statuses() -> Vec<StatusConfig> {
    ["Idle", "In Progress", "PermissionRequest", "Waiting", "Finished"]
        .into_iter()
        .map(StatusConfig::new)
        .collect()
}

/// Configuration of a single board.
///
/// # Examples
///
/// ```
/// use taskwatch_config::Config;
///
/// let config = Config::new("demo");
/// assert_eq!(config.board.name, "demo");
/// assert!(config.validate().is_ok());
/// assert!(!config.display_statuses().contains(&"archived".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardSettings,

    /// Task directory, relative to the board directory.
    #[serde(default = "default_tasks_dir")]
    pub tasks_dir: String,

    /// Ordered statuses; the board shows one column per non-archived status.
    #[serde(default = "default_statuses")]
    pub statuses: Vec<StatusConfig>,

    /// Per-status WIP limits. Zero means unlimited.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub wip_limits: BTreeMap<String, usize>,

    #[serde(default, rename = "tui")]
    pub display: DisplayConfig,

    #[serde(skip)]
    dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(BoardSettings::default().name)
    }
}

impl Config {
    /// Creates a configuration with the default statuses.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            board: BoardSettings { name: name.into() },
            tasks_dir: default_tasks_dir(),
            statuses: default_statuses(),
            wip_limits: BTreeMap::new(),
            display: DisplayConfig::default(),
            dir: PathBuf::new(),
        }
    }

    /// Creates the configuration used for the user board, which tracks
    /// agent sessions rather than project work.
    #[must_use]
    pub fn agent() -> Self {
        Self {
            statuses: agent_statuses(),
            ..Self::new("taskwatch")
        }
    }

    /// Sets the board directory this configuration belongs to.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Loads the board stored in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `dir` holds no board file, or
    /// another error if the file cannot be read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskwatch_config::Config;
    ///
    /// # fn main() -> taskwatch_config::Result<()> {
    /// let config = Config::load("kanban")?;
    /// println!("{} statuses", config.statuses.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                dir: dir.to_path_buf(),
            });
        }

        let mut config: Config = read_config_file(&path)?;
        config.dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Loads the board in `dir`, creating the user board on first use.
    ///
    /// Only the user board is created implicitly; any other missing board
    /// is reported as [`ConfigError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails for any other reason, or creating
    /// the user board fails.
    pub fn load_or_init_user(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        match Self::load(dir) {
            Err(ConfigError::NotFound { .. }) if user_board_dir().is_ok_and(|home| home == dir) => {
                Self::agent().with_dir(dir).init()
            }
            other => other,
        }
    }

    /// Creates the board on disk: the tasks directory and the board file.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the board file cannot be written.
    pub fn init(self) -> Result<Self> {
        let tasks = self.tasks_path();
        std::fs::create_dir_all(&tasks).map_err(|e| ConfigError::CreateDir {
            path: tasks,
            source: e,
        })?;
        self.save()?;
        Ok(self)
    }

    /// Writes the board file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        write_config_file(self.dir.join(CONFIG_FILE_NAME), self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two statuses, duplicate
    /// status names, a WIP limit for an unknown status, or invalid display
    /// settings.
    pub fn validate(&self) -> Result<()> {
        if self.statuses.len() < 2 {
            return Err(ConfigError::InvalidStatuses {
                reason: "at least two statuses are required".to_string(),
            });
        }

        let names = self.status_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ConfigError::InvalidStatuses {
                    reason: format!("duplicate status {name:?}"),
                });
            }
        }

        if let Some(status) = self.wip_limits.keys().find(|s| !names.contains(s)) {
            return Err(ConfigError::UnknownWipStatus {
                status: status.clone(),
            });
        }

        self.display.validate()
    }

    /// The board directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of the task directory.
    #[must_use]
    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(&self.tasks_dir)
    }

    /// Directory with `<id>.iterm` session descriptors.
    #[must_use]
    pub fn sessions_dir(&self) -> PathBuf {
        self.dir.join(SESSIONS_DIR)
    }

    /// Directory for the rolling application log.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.dir.join(LOGS_DIR)
    }

    /// Paths to watch for changes: the task directory and the board
    /// directory itself when it differs.
    #[must_use]
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        let tasks = self.tasks_path();
        if tasks == self.dir {
            vec![tasks]
        } else {
            vec![tasks, self.dir.clone()]
        }
    }

    /// All status names, in order.
    #[must_use]
    pub fn status_names(&self) -> Vec<String> {
        self.statuses.iter().map(|s| s.name().to_string()).collect()
    }

    /// Statuses shown as columns (archived excluded), in order.
    #[must_use]
    pub fn display_statuses(&self) -> Vec<String> {
        self.statuses
            .iter()
            .map(StatusConfig::name)
            .filter(|name| !is_archived_status(name))
            .map(ToString::to_string)
            .collect()
    }

    /// Returns `true` for the archived status.
    #[must_use]
    pub fn is_archived_status(&self, status: &str) -> bool {
        is_archived_status(status)
    }

    /// Returns `true` for archived and for the last status before it.
    #[must_use]
    pub fn is_terminal_status(&self, status: &str) -> bool {
        if is_archived_status(status) {
            return true;
        }
        self.display_statuses()
            .last()
            .is_some_and(|last| last == status)
    }

    /// WIP limit for a status, `None` when unlimited.
    #[must_use]
    pub fn wip_limit(&self, status: &str) -> Option<usize> {
        self.wip_limits.get(status).copied().filter(|&n| n > 0)
    }

    /// Whether cards in `status` show their age. Unknown statuses do.
    #[must_use]
    pub fn show_duration(&self, status: &str) -> bool {
        self.statuses
            .iter()
            .find(|s| s.name() == status)
            .is_none_or(StatusConfig::show_duration)
    }

    /// Age thresholds, shortest first.
    ///
    /// A configuration that passed [`Config::validate`] always parses; an
    /// unvalidated one with a bad entry falls back to the defaults.
    #[must_use]
    pub fn age_thresholds(&self) -> Vec<ParsedThreshold> {
        self.display
            .parsed_thresholds()
            .or_else(|_| DisplayConfig::default().parsed_thresholds())
            .unwrap_or_default()
    }

    /// Interval between forced redraws.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.display.tick_interval()
    }
}

fn is_archived_status(status: &str) -> bool {
    status == ARCHIVED_STATUS
}
