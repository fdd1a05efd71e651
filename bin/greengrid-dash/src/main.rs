//! ---
//! gg_section: "03-dashboard-ui"
//! gg_subsection: "binary"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Terminal dashboard launcher for the GreenGrid simulator."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
mod app;
mod fetch;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use greengrid_client::{BackendClient, SimulationParameters};
use greengrid_common::config::AppConfig;
use greengrid_common::logging::init_tracing;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::info;

use crate::app::App;
use crate::fetch::{spawn_history_refresher, spawn_worker, FetchCommand, FetchOutcome};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Explore community grid load predictions in a terminal UI"
)]
struct Cli {
    /// Path to a TOML configuration file (checked before the defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the configured one
    #[arg(long)]
    backend: Option<String>,
    /// History refresh interval in seconds, overriding the configured one
    #[arg(long)]
    refresh: Option<u64>,
    /// UI tick interval in milliseconds
    #[arg(long, default_value_t = 250)]
    tick: u64,
}

/// Paths probed for a configuration file, in precedence order.
fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("greengrid.toml"),
        PathBuf::from("configs/greengrid.toml"),
    ]
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut candidates = default_candidates();
    if let Some(path) = &cli.config {
        candidates.insert(0, path.clone());
    }
    let mut config = AppConfig::load(&candidates)?;
    if let Some(backend) = &cli.backend {
        config.backend.base_url = backend.clone();
    }
    if let Some(refresh) = cli.refresh {
        config.refresh.history_interval_secs = refresh;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing("greengrid-dash", &config.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let client = BackendClient::new(config.backend.base()?, config.backend.request_timeout())?;
    info!(backend = %client.base(), "dashboard starting");

    let (command_tx, command_rx) = mpsc::unbounded_channel::<FetchCommand>();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let (worker, refresher) = {
        // Tasks must be spawned from within the runtime context.
        let _enter = runtime.enter();
        let worker = spawn_worker(client, command_rx, outcome_tx);
        let refresher =
            spawn_history_refresher(command_tx.clone(), config.refresh.history_interval());
        (worker, refresher)
    };

    let mut app = App::new(SimulationParameters::defaults_now());
    for command in app.start() {
        let _ = command_tx.send(command);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(cli.tick.max(50));
    let result = run_app(&mut terminal, &mut app, &command_tx, outcome_rx, tick_rate);
    cleanup_terminal(&mut terminal)?;

    runtime.block_on(refresher.shutdown());
    drop(command_tx);
    runtime.block_on(async {
        let _ = worker.await;
    });

    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    commands: &mpsc::UnboundedSender<FetchCommand>,
    mut outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply(outcome);
        }
        terminal.draw(|frame| ui::draw(frame, app))?;
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_input(app, key, commands) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // redraw with new geometry
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Apply one key press and queue whatever fetches it triggers. Returns `true`
/// when the user asked to quit.
fn handle_input(
    app: &mut App,
    key: KeyEvent,
    commands: &mpsc::UnboundedSender<FetchCommand>,
) -> bool {
    let triggered = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            Vec::new()
        }
        KeyCode::Char('l') | KeyCode::Right => app.nudge_selected(1),
        KeyCode::Char('h') | KeyCode::Left => app.nudge_selected(-1),
        KeyCode::PageUp => app.nudge_selected(5),
        KeyCode::PageDown => app.nudge_selected(-5),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_params(),
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.toggle_chart();
            Vec::new()
        }
        KeyCode::Char('n') | KeyCode::Char('N') => vec![app.notify_command()],
        _ => Vec::new(),
    };
    for command in triggered {
        // A closed channel only happens during shutdown.
        let _ = commands.send(command);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_probed_in_documented_order() {
        let candidates = default_candidates();
        assert_eq!(candidates[0], PathBuf::from("greengrid.toml"));
        assert_eq!(candidates[1], PathBuf::from("configs/greengrid.toml"));
    }
}
