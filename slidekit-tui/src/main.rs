use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use slidekit_core::SliderSet;
use slidekit_tui::app::AppState;
use slidekit_tui::{input, persistence, ui};

/// One frame per loop pass (~20 FPS).
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "slidekit-tui", about = "Drag sliders in the terminal")]
struct Cli {
    /// Slider set to load (TOML with [[slider]] tables). Defaults to two demo sliders.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to keep slider values between runs.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Start from the configured values and do not save on exit.
    #[arg(long)]
    no_persist: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut set = match &cli.config {
        Some(path) => SliderSet::load(path)
            .with_context(|| format!("loading slider set from {}", path.display()))?,
        None => SliderSet::default(),
    };

    let state_path = cli.state.unwrap_or_else(persistence::default_path);
    if !cli.no_persist {
        let persisted = persistence::load(&state_path);
        if persistence::apply(&mut set.sliders, &persisted) {
            tracing::info!(path = %state_path.display(), "restored slider values");
        }
    }
    tracing::info!(sliders = set.len(), "starting");

    let mut app = AppState::new(set, state_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if !cli.no_persist {
        let persisted = persistence::extract(&app);
        if let Err(err) = persistence::save(&app.state_path, &persisted) {
            tracing::warn!(%err, "could not save slider values");
            eprintln!("warning: could not save slider values: {err:#}");
        }
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Layout (no-op unless the terminal changed size), then render
        let size = terminal.size()?;
        app.relayout(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain every input event that arrived during this tick
        if event::poll(TICK)? {
            loop {
                match event::read()? {
                    Event::Key(key) => input::handle_key(app, key),
                    Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                    Event::Resize(width, height) => {
                        app.relayout(Rect::new(0, 0, width, height));
                    }
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // 3. Frame: apply the coalesced pointer update
        app.tick();

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// File logging: the terminal is busy drawing. Daily files under
/// `<config dir>/slidekit/logs`, filter from `SLIDEKIT_LOG` (default `info`).
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidekit")
        .join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log dir {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "slidekit-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("SLIDEKIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
