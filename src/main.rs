//! taskwatch - a live terminal board for file-backed kanban tasks.
//!
//! ## Usage
//!
//! ```bash
//! # Open the nearest board above the current directory
//! taskwatch
//!
//! # Open a specific board directory
//! taskwatch --dir path/to/kanban
//!
//! # Create ./kanban if no board exists there yet
//! taskwatch --init
//! ```

mod logging;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use taskwatch_config::{
    Config, ConfigError,
    persistence::{BOARD_DIR_NAME, CONFIG_FILE_NAME, resolve_board_dir},
};
use taskwatch_store::{BoardWatcher, DEFAULT_DEBOUNCE, FileStore, ItermFocus};
use taskwatch_tui::{App, terminal};
use tracing::{info, warn};

/// Live terminal view of a kanban board stored as markdown task files.
#[derive(Parser, Debug)]
#[command(name = "taskwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board directory (defaults to the nearest `kanban/` above the current
    /// directory, then the user board)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Create the board if it does not exist yet
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    let config = load_board(&cli, &cwd)?;
    let _log_guard = logging::init(&config.log_dir(), cli.debug)?;
    info!(board = %config.board.name, dir = %config.dir().display(), "opening board");

    let store = FileStore::from_config(&config);
    let focus = ItermFocus::from_config(&config);

    // The board still works without live refresh.
    let (_watcher, changes) = match BoardWatcher::spawn(&config.watch_paths(), DEFAULT_DEBOUNCE) {
        Ok((watcher, changes)) => (Some(watcher), Some(changes)),
        Err(e) => {
            warn!(error = %e, "live refresh disabled");
            (None, None)
        }
    };

    terminal::install_panic_hook();
    let mut terminal = terminal::TerminalGuard::new()?;

    let mut app = App::new(&config);
    let result = app.run(&mut terminal, &store, &focus, changes).await;

    // Always restore terminal, even if app.run() failed
    terminal.restore()?;
    result
}

/// Finds and loads the board to open.
fn load_board(cli: &Cli, cwd: &Path) -> anyhow::Result<Config> {
    if cli.init {
        let dir = cli.dir.clone().unwrap_or_else(|| cwd.join(BOARD_DIR_NAME));
        if !dir.join(CONFIG_FILE_NAME).is_file() {
            let name = board_name(&dir, cwd);
            return Config::new(name)
                .with_dir(&dir)
                .init()
                .with_context(|| format!("failed to create board in {}", dir.display()));
        }
    }

    let dir = resolve_board_dir(cli.dir.as_deref(), cwd)?;
    match Config::load_or_init_user(&dir) {
        Err(ConfigError::NotFound { dir }) => Err(anyhow::anyhow!(
            "no board in {} (run with --init to create one)",
            dir.display()
        )),
        other => Ok(other?),
    }
}

/// Names a new board after the project it sits in.
fn board_name(dir: &Path, cwd: &Path) -> String {
    let project = if dir.file_name().is_some_and(|n| n == BOARD_DIR_NAME) {
        dir.parent()
    } else {
        Some(dir)
    };
    project
        .and_then(Path::file_name)
        .or_else(|| cwd.file_name())
        .map_or_else(
            || BOARD_DIR_NAME.to_string(),
            |n| n.to_string_lossy().into_owned(),
        )
}
