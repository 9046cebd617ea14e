//! Countdown Timer - A reactive countdown timer controlled over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use countdown_timer::{
    config::Config,
    engine::{Timer, TimerOptions},
    state::AppState,
    api::create_router,
    tasks::timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, timer={} -> {} every {}ms, precision={}",
          config.host, config.port, config.start_value, config.end_value,
          config.interval_ms, config.precision);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.timer_settings()));

    // Reject a bad timer configuration before binding anything
    let options = TimerOptions::new(
        state.commands.clone(),
        config.start_value,
        config.end_value,
        config.interval(),
        config.precision,
    )
    .on_tick(|value| debug!("Tick: {}", value))
    .on_finish(|| info!("Timer finished"));
    let timer = Timer::new(options)?;

    // Start the timer background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        timer_task(timer_state, timer).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /run    - Start or resume the timer");
    info!("  POST /pause  - Pause the timer");
    info!("  POST /stop   - Stop and reset the timer");
    info!("  GET  /status - Current timer value and state");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
