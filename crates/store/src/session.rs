//! Focusing the terminal session attached to a task.
//!
//! Agents working on a task record their iTerm2 session in
//! `<board>/.sessions/<id>.iterm`. The file holds the raw
//! `ITERM_SESSION_ID` value (`w0t3p0:<uuid>`); only the part after the
//! colon identifies the session for AppleScript.

use std::path::{Path, PathBuf};

use taskwatch_config::Config;
use taskwatch_protocol::{ProtocolError, SessionFocus, TaskId};
use tracing::debug;

use crate::error::StoreError;

/// Focuses iTerm2 sessions recorded in a sessions directory.
///
/// Activation only happens on macOS; elsewhere the descriptor is still
/// resolved but nothing is launched.
#[derive(Debug, Clone)]
pub struct ItermFocus {
    sessions_dir: PathBuf,
}

impl ItermFocus {
    #[must_use]
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sessions_dir())
    }

    #[must_use]
    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    /// Reads the recorded session ID for a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoSession`] if the descriptor is missing or
    /// empty.
    pub fn session_id(&self, id: TaskId) -> Result<String, StoreError> {
        let path = self.sessions_dir.join(format!("{id}.iterm"));
        let raw = std::fs::read_to_string(&path).map_err(|_| StoreError::NoSession { id })?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StoreError::NoSession { id });
        }
        let session = raw.split_once(':').map_or(raw, |(_, uuid)| uuid);
        Ok(session.to_string())
    }
}

impl SessionFocus for ItermFocus {
    type Error = StoreError;

    fn focus_session(&self, id: TaskId) -> Result<(), StoreError> {
        let session = self.session_id(id)?;
        debug!(id, %session, "focusing session");
        activate(id, &session)
    }
}

#[cfg(target_os = "macos")]
fn activate(id: TaskId, session: &str) -> Result<(), StoreError> {
    std::process::Command::new("osascript")
        .arg("-e")
        .arg(activation_script(session))
        .spawn()
        .map(drop)
        .map_err(|e| StoreError::SessionActivation {
            id,
            reason: e.to_string(),
        })
}

#[cfg(not(target_os = "macos"))]
fn activate(id: TaskId, session: &str) -> Result<(), StoreError> {
    debug!(id, %session, "session activation is only supported on macOS");
    Ok(())
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn activation_script(session: &str) -> String {
    let session = session.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        r#"
tell application "iTerm2"
  activate
  repeat with w in windows
    repeat with t in tabs of w
      repeat with s in sessions of t
        if id of s is "{session}" then
          tell t to select
          tell s to select
          set index of w to 1
          return
        end if
      end repeat
    end repeat
  end repeat
end tell"#
    )
}

/// A [`SessionFocus`] that never finds a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFocus;

impl SessionFocus for NoFocus {
    type Error = ProtocolError;

    fn focus_session(&self, id: TaskId) -> Result<(), ProtocolError> {
        Err(ProtocolError::NoSession(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn session_id_strips_window_prefix() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("4.iterm"), "w0t3p0:ABCD-1234\n").unwrap();
        let focus = ItermFocus::new(dir.path());
        assert_eq!(focus.session_id(4).unwrap(), "ABCD-1234");
    }

    #[test]
    fn session_id_without_prefix_is_used_verbatim() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("5.iterm"), "ABCD").unwrap();
        assert_eq!(ItermFocus::new(dir.path()).session_id(5).unwrap(), "ABCD");
    }

    #[test]
    fn missing_or_empty_descriptor_is_no_session() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("6.iterm"), "  \n").unwrap();
        let focus = ItermFocus::new(dir.path());
        assert!(matches!(
            focus.session_id(6),
            Err(StoreError::NoSession { id: 6 })
        ));
        assert!(matches!(
            focus.focus_session(7),
            Err(StoreError::NoSession { id: 7 })
        ));
    }

    #[test]
    fn script_quotes_session() {
        let script = activation_script(r#"a"b"#);
        assert!(script.contains(r#"if id of s is "a\"b" then"#));
    }

    #[test]
    fn no_focus_always_fails() {
        assert!(NoFocus.focus_session(1).is_err());
    }
}
