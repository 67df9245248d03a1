//! Stockdash: terminal dashboard for a single stock ticker.

use std::io::{self, stdout};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use stockdash_core::{DashboardConfig, IndianApiProvider};
use stockdash_tui::worker::{self, WorkerCommand};
use stockdash_tui::{input, logging, ui, AppState};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    logging::init()?;

    let config = DashboardConfig::load(None).context("failed to load configuration")?;
    let provider =
        IndianApiProvider::new(&config.api).context("failed to build the HTTP client")?;
    tracing::info!(?provider, export_dir = %config.export.dir.display(), "starting dashboard");

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(Arc::new(provider), cmd_rx, resp_tx);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, config.export.dir.clone());
    if config.api.api_key.is_none() {
        app.set_warning("No API key configured: set STOCKDASH_API_KEY");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. Fetch threads still in flight are abandoned with the process.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    drop(app);
    for _ in 0..10 {
        if worker_handle.is_finished() {
            let _ = worker_handle.join();
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
