//! Countdown Timer - a fixed one-minute countdown with play, pause and stop
//!
//! This is the main entry point for the countdown-timer application.

use std::{
    fs::File,
    sync::{atomic::{AtomicBool, Ordering}, Arc, Mutex},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use countdown_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{countdown_ticker_task, event_log_task},
    ui,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;

    // The terminal screen owns stdout, so logs go to a file or nowhere
    let writer = match (&config.log_file, config.shows_screen()) {
        (Some(path), _) => BoxMakeWriter::new(Mutex::new(File::create(path)?)),
        (None, true) => BoxMakeWriter::new(std::io::sink),
        (None, false) => BoxMakeWriter::new(std::io::stdout),
    };

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the background tasks
    tokio::spawn(countdown_ticker_task(Arc::clone(&state)));
    tokio::spawn(event_log_task(Arc::clone(&state)));

    if config.serve {
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;
        let app = create_router(Arc::clone(&state));

        info!("Control API running on http://{}", addr);
        info!("Endpoints:");
        info!("  POST /play   - Start or resume the countdown");
        info!("  POST /pause  - Pause the countdown");
        info!("  POST /stop   - Reset the countdown");
        info!("  GET  /status - Current countdown and server status");
        info!("  GET  /health - Health check");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Server error: {}", e);
            }
        });
    }

    if config.shows_screen() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut screen = tokio::task::spawn_blocking({
            let state = Arc::clone(&state);
            let shutdown = Arc::clone(&shutdown);
            move || ui::run(state, shutdown)
        });

        let signalled = tokio::select! {
            result = &mut screen => {
                result??;
                false
            }
            _ = shutdown_signal() => true,
        };

        if signalled {
            // Let the screen restore the terminal before exiting
            info!("Shutdown signal received");
            shutdown.store(true, Ordering::Relaxed);
            screen.await??;
        }
    } else {
        shutdown_signal().await;
        info!("Shutdown signal received");
    }

    info!("Countdown timer shutdown complete");
    Ok(())
}
