//! issuedeck - a terminal viewer for GitHub issues.
//!
//! One field schema drives three views of the same issue collection: a
//! table, a query form above the table, and a descriptions panel for a
//! single record.

mod api;
mod app;
mod config;
mod dispatcher;
mod error;
mod events;
mod logging;
mod mode;
mod schema;
mod tasks;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use crate::api::IssuesClient;
use crate::app::App;
use crate::config::Settings;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::mode::ViewMode;
use crate::schema::Schema;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Browse GitHub issues in the terminal.
#[derive(Debug, Parser)]
#[command(name = "issuedeck", version, about)]
struct Cli {
    /// Issue collection endpoint (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Issues per page (overrides the config file).
    #[arg(long)]
    page_size: Option<u32>,

    /// View shown at startup (overrides the config file).
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. `issuedeck=debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective settings to the config file and exit.
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    /// Load settings from the config file and apply command-line overrides.
    fn settings(&self) -> crate::error::Result<Settings> {
        let mut settings = Settings::load_from(&self.config_file()?)?;
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(view) = self.view {
            settings.default_view = view;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// The config file this invocation reads and writes.
    fn config_file(&self) -> crate::error::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(config::config_path()?),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_level.as_deref()).context("failed to start logging")?;

    let settings = cli.settings().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        match e.suggested_action() {
            Some(action) => anyhow::anyhow!("{} {}", e.user_message(), action),
            None => anyhow::anyhow!(e.user_message()),
        }
    })?;

    if cli.init_config {
        let path = cli.config_file()?;
        settings.save_to(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    Schema::issues()
        .validate()
        .context("invalid field schema")?;
    let client = IssuesClient::new(&settings).context("failed to build HTTP client")?;
    info!(endpoint = client.endpoint(), view = %settings.default_view, "Starting");

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run(&mut terminal, &settings, &client).await;
    restore_terminal(&mut terminal).context("failed to restore terminal")?;

    logging::shutdown();
    if result.is_err() {
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
    }
    result
}

/// Drive the application until it asks to quit.
async fn run(terminal: &mut Tui, settings: &Settings, client: &IssuesClient) -> anyhow::Result<()> {
    let mut app = App::new(settings.default_view, settings.page_size);
    let events = EventHandler::new(settings.tick_rate_ms);
    let (mut rx, mut spawner) = tasks::create_task_channel();

    loop {
        if let Some(request) = app.take_pending_fetch() {
            spawner.spawn_fetch(client, request);
        }
        if let Some(url) = app.take_pending_open() {
            if let Err(e) = open::that(&url) {
                debug!(error = %e, url = %url, "Failed to open link");
                app.handle_error(&AppError::Browser(url));
            }
        }
        if let Some(text) = app.take_pending_copy() {
            app.copy_finished(copy_to_clipboard(text));
        }

        terminal.draw(|frame| app.view(frame))?;

        // Polling blocks for up to one tick, so keep it off the runtime threads
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

fn copy_to_clipboard(text: String) -> crate::error::Result<()> {
    let mut ctx = ClipboardContext::new().map_err(|e| {
        warn!("Failed to initialize clipboard: {}", e);
        AppError::Clipboard(e.to_string())
    })?;
    ctx.set_contents(text).map_err(|e| {
        warn!("Failed to copy to clipboard: {}", e);
        AppError::Clipboard(e.to_string())
    })?;
    info!("Copied selected row to clipboard");
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 20\ndefault_view = \"form\"\n").unwrap();

        let cli = Cli::parse_from([
            "issuedeck",
            "--config",
            path.to_str().unwrap(),
            "--page-size",
            "10",
            "--view",
            "descriptor",
        ]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.default_view, ViewMode::Descriptor);
        assert_eq!(settings.endpoint, Settings::default().endpoint);
    }

    #[test]
    fn test_init_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cli = Cli::parse_from([
            "issuedeck",
            "--config",
            path.to_str().unwrap(),
            "--view",
            "form",
            "--init-config",
        ]);
        assert!(cli.init_config);

        let settings = cli.settings().unwrap();
        settings.save_to(&cli.config_file().unwrap()).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().default_view, ViewMode::Form);
    }

    #[test]
    fn test_cli_override_repairs_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 0\n").unwrap();

        let cli = Cli::parse_from(["issuedeck", "--config", path.to_str().unwrap()]);
        assert!(matches!(cli.settings(), Err(AppError::Config(_))));

        let cli = Cli::parse_from([
            "issuedeck",
            "--config",
            path.to_str().unwrap(),
            "--page-size",
            "10",
        ]);
        assert_eq!(cli.settings().unwrap().page_size, 10);
    }

    #[test]
    fn test_cli_override_is_validated() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "issuedeck",
            "--config",
            dir.path().join("missing.toml").to_str().unwrap(),
            "--endpoint",
            "ftp://example.com",
        ]);
        assert!(matches!(cli.settings(), Err(AppError::Config(_))));
    }
}
