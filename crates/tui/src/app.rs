//! Main application struct and run loop.
//!
//! `App` is a state machine: [`App::update`] applies one message and
//! returns the effects it wants performed, and [`App::view`] draws the
//! current state. [`App::run`] wires both to the terminal, the store, the
//! session focus and the change watcher.

use std::time::Instant;

use chrono::{DateTime, Utc};
use ratatui::Frame;
use taskwatch_config::Config;
use taskwatch_protocol::{Effect, Message, SessionFocus, TaskStore};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::{
    event::{event_to_message, poll_event},
    state::{BoardState, ViewMode, ViewSettings},
    terminal::AppTerminal,
    widgets::render_board,
};

/// The main application struct.
#[derive(Debug)]
pub struct App {
    state: BoardState,
    should_quit: bool,
}

impl App {
    /// Creates the application for a loaded board configuration.
    ///
    /// The board starts empty; call [`App::reload`] (or [`App::run`], which
    /// does) to populate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskwatch_config::Config;
    /// use taskwatch_tui::App;
    ///
    /// let app = App::new(&Config::new("Demo"));
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_settings(ViewSettings::from_config(config))
    }

    #[must_use]
    pub fn with_settings(settings: ViewSettings) -> Self {
        Self {
            state: BoardState::new(settings),
            should_quit: false,
        }
    }

    /// Returns a reference to the board state.
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a message and returns the effects to perform.
    pub fn update(&mut self, msg: Message) -> Vec<Effect> {
        self.update_at(msg, Instant::now())
    }

    /// Like [`App::update`], with an explicit time for double-click
    /// detection.
    pub fn update_at(&mut self, msg: Message, now: Instant) -> Vec<Effect> {
        match msg {
            Message::ForceQuit => {
                self.should_quit = true;
                return Vec::new();
            }
            Message::Resize { width, height } => {
                self.state.resize(width, height);
                return Vec::new();
            }
            Message::Tick => return Vec::new(),
            _ => {}
        }

        if self.state.mode.is_dialog() {
            return self.update_dialog(&msg);
        }

        match msg {
            Message::Quit => self.should_quit = true,
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::Activate => {
                if let Some(task) = self.state.selected_task() {
                    return vec![Effect::FocusSession { id: task.id }];
                }
            }
            Message::RequestDelete => {
                if let Some(task) = self.state.selected_task() {
                    self.state.mode = ViewMode::ConfirmDelete {
                        id: task.id,
                        title: task.title.clone(),
                    };
                }
            }
            Message::RequestClearAll => {
                let count = self.state.snapshot.total;
                if count > 0 {
                    self.state.mode = ViewMode::ConfirmClearAll { count };
                }
            }
            Message::ClickAt { column, row } => {
                if let Some(id) = self.state.click(column, row, now) {
                    return vec![Effect::FocusSession { id }];
                }
            }
            Message::Confirm
            | Message::Cancel
            | Message::ForceQuit
            | Message::Resize { .. }
            | Message::Tick => {}
        }
        Vec::new()
    }

    fn update_dialog(&mut self, msg: &Message) -> Vec<Effect> {
        match msg {
            Message::Confirm => match std::mem::take(&mut self.state.mode) {
                ViewMode::ConfirmDelete { id, title } => vec![Effect::ArchiveTask { id, title }],
                ViewMode::ConfirmClearAll { .. } => vec![Effect::ArchiveAll],
                ViewMode::Normal => Vec::new(),
            },
            Message::Cancel | Message::Quit => {
                self.state.mode = ViewMode::Normal;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Reloads the board from the store.
    ///
    /// A failed listing keeps the current board and shows the error.
    #[instrument(level = "debug", skip_all)]
    pub fn reload<S: TaskStore>(&mut self, store: &S) {
        match store.list_all() {
            Ok(listing) => {
                if !listing.warnings.is_empty() {
                    debug!(skipped = listing.warnings.len(), "reload skipped task files");
                }
                self.state.apply_listing(listing);
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.state.apply_error(e.to_string());
            }
        }
    }

    /// Performs effects returned by [`App::update`].
    ///
    /// The board is reloaded once after the batch when it contained storage
    /// mutations and all of them succeeded. A failed mutation sets the error
    /// banner instead. Focus failures are only logged.
    pub fn execute<S: TaskStore, F: SessionFocus>(
        &mut self,
        effects: Vec<Effect>,
        store: &S,
        focus: &F,
    ) {
        let mutated = effects.iter().any(Effect::is_mutation);
        let mut failed = false;
        for effect in effects {
            match effect {
                Effect::ArchiveTask { id, title } => match store.archive(id) {
                    Ok(()) => info!(id, %title, "task archived"),
                    Err(e) => {
                        warn!(id, error = %e, "archive failed");
                        self.state.apply_error(format!("delete #{id}: {e}"));
                        failed = true;
                    }
                },
                Effect::ArchiveAll => match store.archive_all() {
                    Ok(count) => info!(count, "all tasks archived"),
                    Err(e) => {
                        warn!(error = %e, "clear-all failed");
                        self.state.apply_error(format!("clear all: {e}"));
                        failed = true;
                    }
                },
                Effect::FocusSession { id } => {
                    if let Err(e) = focus.focus_session(id) {
                        debug!(id, error = %e, "session focus failed");
                    }
                }
            }
        }

        if mutated && !failed {
            self.reload(store);
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Picks up the frame size if no resize message has been seen yet.
    pub fn view(&mut self, frame: &mut Frame) {
        self.view_at(frame, Utc::now());
    }

    /// Renders with ages measured from `now`.
    pub fn view_at(&mut self, frame: &mut Frame, now: DateTime<Utc>) {
        let area = frame.area();
        if (self.state.width, self.state.height) != (area.width, area.height) {
            self.state.resize(area.width, area.height);
        }
        render_board(&self.state, now, area, frame.buffer_mut());
    }

    /// Runs the main application loop.
    ///
    /// Loads the board, then draws, handles terminal events, executes
    /// effects, reloads on watcher signals and redraws on every tick until
    /// the user quits. Without a watcher the board only changes through its
    /// own mutations.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskwatch_config::Config;
    /// use taskwatch_store::{FileStore, ItermFocus};
    /// use taskwatch_tui::{App, terminal::TerminalGuard};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = Config::load("kanban")?;
    ///     let mut terminal = TerminalGuard::new()?;
    ///     let mut app = App::new(&config);
    ///     let store = FileStore::from_config(&config);
    ///     app.run(&mut terminal, &store, &ItermFocus::from_config(&config), None)
    ///         .await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run<S: TaskStore, F: SessionFocus>(
        &mut self,
        terminal: &mut AppTerminal,
        store: &S,
        focus: &F,
        mut changes: Option<mpsc::Receiver<()>>,
    ) -> anyhow::Result<()> {
        let tick = self.state.settings.tick;
        let size = terminal.size()?;
        self.update(Message::Resize {
            width: size.width,
            height: size.height,
        });
        self.reload(store);
        info!(board = %self.state.settings.name, "board started");

        let mut last_tick = Instant::now();
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                if let Some(msg) = event_to_message(&event, &self.state.mode) {
                    let effects = self.update(msg);
                    self.execute(effects, store, focus);
                }
            }

            if let Some(rx) = changes.as_mut() {
                let mut changed = false;
                while rx.try_recv().is_ok() {
                    changed = true;
                }
                if changed {
                    debug!("board files changed");
                    self.reload(store);
                }
            }

            if last_tick.elapsed() >= tick {
                self.update(Message::Tick);
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        info!("board closed");
        Ok(())
    }
}
