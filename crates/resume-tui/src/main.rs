use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use resume_core::config_file::load_config;
use resume_core::{DEFAULT_ENDPOINT, HttpParseApi, ParseApi};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Resume viewer: upload a resume to the parsing service and browse the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PDF or DOCX file to pre-select
    file: Option<PathBuf>,

    /// Parse endpoint URL (overrides RESUME_PARSER_URL and the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Log file path (default: <cache dir>/resume-viewer/resume-viewer.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = args
        .log_file
        .clone()
        .or_else(logging::default_log_path)
        .and_then(|path| logging::init_logging(&path));

    if let Some(path) = &args.file
        && !path.exists()
    {
        anyhow::bail!("file not found: {}", path.display());
    }

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_config = load_config();
    let endpoint = args
        .endpoint
        .or_else(|| std::env::var("RESUME_PARSER_URL").ok())
        .or_else(|| file_config.endpoint().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let theme_name = args
        .theme
        .or_else(|| file_config.theme().map(str::to_string))
        .unwrap_or_else(|| "hacker".to_string());
    let fps = file_config.fps().unwrap_or(30);
    tracing::info!(%endpoint, theme = %theme_name, fps, "configuration resolved");

    let mut app = App::new(theme::Theme::from_name(&theme_name), endpoint.clone());
    if let Some(path) = &args.file {
        app.select_path(path);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    // Backend listener: one task per submission
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(cmd_tx);
    let api: Arc<dyn ParseApi> = Arc::new(HttpParseApi::new(endpoint));
    let _listener = backend::spawn_listener(api, cmd_rx, event_tx);

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(1000 / u64::from(fps.max(1)));

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    tracing::info!("resume-tui exiting");

    Ok(())
}
