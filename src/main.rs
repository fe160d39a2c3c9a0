mod controller;
mod logging;
mod media;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;

use controller::AppController;
use media::{MediaEngine, SimulatedEngine};
use model::{AppModel, FeedPlaybackCoordinator};
use view::{AppView, ScreenState, TOP_BAR_HEIGHT};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== vidstack starting ===");

    // The playback coordinator is built here and handed to the controller
    // explicitly; no ambient player state anywhere.
    let engine: Arc<dyn MediaEngine> = Arc::new(SimulatedEngine);
    let coordinator = Arc::new(Mutex::new(FeedPlaybackCoordinator::new(engine)));
    let model = Arc::new(Mutex::new(AppModel::new()));

    let controller = AppController::new(model.clone(), coordinator);

    // Load the bundled feed fixture off the UI loop.
    let controller_for_load = controller.clone();
    tokio::spawn(async move {
        controller_for_load.load_feed().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("vidstack shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Layout pass: the feed viewport height drives item frames, and
        // the visibility reporter runs on every pass (unchanged visible
        // sets diff to nothing in the coordinator).
        let size = terminal.size()?;
        let feed_height = size.height.saturating_sub(TOP_BAR_HEIGHT);
        controller.update_feed_viewport(feed_height).await;
        controller.sync_feed_visibility().await;

        // Get current state
        let (ui_state, feed_state, shows_state, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_feed_state().await,
                model_guard.get_shows_state().await,
                model_guard.should_quit().await,
            )
        };
        let playback = controller.feed_playback_snapshot(&feed_state.entries).await;
        let now_playing = controller.now_playing_title(&feed_state.entries).await;

        // Draw UI
        terminal.draw(|f| {
            AppView::render(
                f,
                &ScreenState {
                    ui: &ui_state,
                    feed: &feed_state,
                    playback: &playback,
                    shows: &shows_state,
                    now_playing: now_playing.as_deref(),
                },
            );
        })?;

        // Handle input with a short poll time for smooth UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
