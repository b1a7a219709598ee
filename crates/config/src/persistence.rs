//! Board discovery and configuration file reading and writing.
//!
//! # File Formats
//!
//! Board files are read as JSON5 (comments and trailing commas allowed) and
//! written back as pretty-printed JSON, which is valid JSON5.
//!
//! # Board Locations
//!
//! A board is a directory holding `board.json5`. Discovery walks upward from
//! the starting directory and accepts either:
//!
//! 1. `<dir>/kanban/board.json5` (a project board next to the code)
//! 2. `<dir>/board.json5` (already inside a board directory)
//!
//! When nothing is found, the user board at `~/.config/taskwatch` is used.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the board directory looked for next to a project.
pub const BOARD_DIR_NAME: &str = "kanban";

/// Name of the board configuration file.
pub const CONFIG_FILE_NAME: &str = "board.json5";

/// User board directory name under the platform config dir.
const USER_BOARD_DIR: &str = "taskwatch";

/// Finds the nearest board directory at or above `start`.
///
/// # Returns
///
/// Returns `Some(dir)` for the first directory on the way up that holds a
/// board, `None` once the filesystem root is passed.
///
/// # Examples
///
/// ```no_run
/// use taskwatch_config::persistence::find_board_dir;
///
/// if let Some(dir) = find_board_dir(std::path::Path::new(".")) {
///     println!("Found board at: {}", dir.display());
/// }
/// ```
#[must_use]
pub fn find_board_dir(start: &Path) -> Option<PathBuf> {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        let nested = dir.join(BOARD_DIR_NAME);
        if nested.join(CONFIG_FILE_NAME).is_file() {
            return Some(nested);
        }
        if dir.join(CONFIG_FILE_NAME).is_file() {
            return Some(dir.to_path_buf());
        }
    }

    None
}

/// Returns the user board directory.
///
/// This is typically `~/.config/taskwatch/` on Unix systems.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_board_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_BOARD_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Resolves the board directory to open.
///
/// An explicit directory always wins. Otherwise the nearest board above
/// `cwd` is used, falling back to [`user_board_dir`].
///
/// # Errors
///
/// Returns an error only when falling back and the home directory cannot be
/// determined.
pub fn resolve_board_dir(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match find_board_dir(cwd) {
        Some(dir) => Ok(dir),
        None => user_board_dir(),
    }
}

/// Reads and parses a configuration file.
///
/// Supports both JSON5 and JSON formats.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content cannot be parsed
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
/// - The configuration cannot be serialized
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
