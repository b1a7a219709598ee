//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to board messages. Key bindings depend on whether a dialog is open.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use taskwatch_protocol::Message;

use crate::state::ViewMode;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to a message for the current view.
#[must_use]
pub fn event_to_message(event: &Event, mode: &ViewMode) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key, mode),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::Resize(width, height) => Some(Message::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Only left-button presses are reported; the board decides what was hit.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::ClickAt {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Converts a key press to a message.
///
/// # Key Bindings
///
/// On the board:
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit immediately |
/// | `q`, `Esc` | Quit |
/// | `h`, `Left` / `l`, `Right` | Previous / next column |
/// | `k`, `Up` / `j`, `Down` | Previous / next card |
/// | `Enter` | Focus the task's session |
/// | `d`, `D` | Archive the selected task (asks first) |
/// | `C` | Archive every task (asks first) |
///
/// In a confirmation dialog:
///
/// | Key | Action |
/// |-----|--------|
/// | `y`, `Y` | Confirm |
/// | `n`, `N`, `Esc`, `q` | Cancel |
/// | `Ctrl+C` | Quit immediately |
#[must_use]
pub fn key_to_message(key: KeyEvent, mode: &ViewMode) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::ForceQuit);
    }

    if mode.is_dialog() {
        return match key.code {
            KeyCode::Char('y' | 'Y') => Some(Message::Confirm),
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Some(Message::Cancel),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('h') | KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Enter => Some(Message::Activate),
        KeyCode::Char('d' | 'D') => Some(Message::RequestDelete),
        KeyCode::Char('C') => Some(Message::RequestClearAll),
        _ => None,
    }
}
