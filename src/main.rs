//! Lap Stopwatch - A single-page stopwatch with lap times, served over HTTP
//! 
//! This is the main entry point for the lap-stopwatch application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use lap_stopwatch::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::activity_log_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("lap_stopwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting lap-stopwatch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, initial_seconds={}",
          config.host, config.port, config.initial_seconds);

    // Mount the stopwatch
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.initial_seconds));

    // Log stopwatch activity in the background
    tokio::spawn(activity_log_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Stopwatch running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /                          - Stopwatch page");
    info!("  GET    /api/stopwatch             - Current stopwatch status");
    info!("  POST   /api/stopwatch/start       - Start ticking");
    info!("  POST   /api/stopwatch/stop        - Stop ticking");
    info!("  POST   /api/stopwatch/reset       - Zero the stopwatch and clear laps");
    info!("  POST   /api/stopwatch/lap         - Record a lap");
    info!("  DELETE /api/stopwatch/laps/:index - Delete a lap");
    info!("  GET    /health                    - Health check");

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

    // Unmount: no tick may fire after shutdown
    state.dispose();

    info!("Server shutdown complete");
    Ok(())
}
