//! Pomodoro Timer - A countdown timer with a local HTTP control surface
//!
//! This is the composition root: it builds the shared state, spawns the
//! ticker and completion tasks and serves the HTTP API.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomodoro_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::LocalNotifier,
    tasks::{completion_task, tick_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let notifier = Arc::new(LocalNotifier::new());
    let state = Arc::new(AppState::new(config.port, config.host.clone(), notifier));

    // Start the ticker and completion background tasks
    let ticker_state = Arc::clone(&state);
    let period = config.tick_period();
    tokio::spawn(async move {
        tick_task(ticker_state, period).await;
    });

    tokio::spawn(completion_task(state.subscribe_events(), state.notifier()));

    if config.has_preset() {
        state.configure(config.hours, config.minutes, config.seconds)?;
        if config.start {
            state.start()?;
        }
    } else if config.start {
        warn!("--start given without a duration, waiting for POST /configure");
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /configure         - Set hours/minutes/seconds for the next timer");
    info!("  POST /configure/dismiss - Clear the pending duration");
    info!("  POST /start             - Start the configured timer");
    info!("  POST /stop              - Stop and reset the timer");
    info!("  GET  /status            - Current timer snapshot");
    info!("  GET  /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Cancel any pending notification
    state.stop()?;

    info!("Server shutdown complete");
    Ok(())
}
