//! usercore binary entry point.
//!
//! Sets up logging and the network runtime, puts the terminal in raw mode,
//! runs the TUI event loop, and restores the terminal on exit.
//!
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use usercore::app::keymap::Keymap;
use usercore::app::{self, AppState, Theme};
use usercore::cli::Cli;
use usercore::error::{Context, Result, simple_error};
use usercore::loader::RemoteLoader;

fn init_logging(path: &Path, filter: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_ctx(|| format!("create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(filter).with_ctx(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    reqwest::Url::parse(&cli.endpoint)
        .map_err(|e| simple_error(format!("invalid endpoint '{}': {e}", cli.endpoint)))?;
    init_logging(&cli.log_path(), &cli.log_level)?;
    info!(endpoint = %cli.endpoint, "starting usercore");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .with_ctx(|| "build tokio runtime".to_string())?;

    let theme = Theme::load_or_init(&cli.theme_path());
    let keymap = Keymap::load_or_init(&cli.keybinds_path());
    let state = AppState::new(theme, keymap, cli.endpoint.clone());
    let loader = RemoteLoader::new(cli.endpoint.clone());

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, state, loader, runtime.handle());

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    info!("exiting");
    Ok(())
}
