//! Egg Timer - A state-managed HTTP service for timing boiled eggs
//!
//! This is the main entry point for the egg-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use egg_timer::{
    api::create_router,
    config::Config,
    services::SystemFeedback,
    state::{AppState, PreferenceStore},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("egg_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting egg-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, prefs={}",
          config.host, config.port, config.prefs.display());
    info!("Feedback: tone={}, vibrate={}",
          config.tone_command.as_deref().unwrap_or("terminal bell"),
          config.vibrate_command.as_deref().unwrap_or("none"));

    let preferences = PreferenceStore::load(config.prefs.clone())?;
    let feedback = Arc::new(SystemFeedback::new(
        config.tone_command.clone(),
        config.vibrate_command.clone(),
    ));

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), preferences, feedback));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /level          - Select doneness level");
    info!("  POST /method         - Select cooking method");
    info!("  POST /next           - Continue to next screen");
    info!("  POST /back           - Return to previous screen");
    info!("  POST /timer/toggle   - Start/pause (restart when finished)");
    info!("  POST /timer/start    - Start or resume countdown");
    info!("  POST /timer/pause    - Pause countdown");
    info!("  POST /timer/restart  - Restart from full duration");
    info!("  POST /timer/test     - Run 3-second test countdown");
    info!("  GET  /language       - Current UI language");
    info!("  PUT  /language       - Change UI language");
    info!("  GET  /status         - Current session and labels");
    info!("  GET  /events         - Session updates (SSE)");
    info!("  GET  /health         - Health check");

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

    // Stop the countdown and any alarm still playing
    state.leave_timer_screen();

    info!("Server shutdown complete");
    Ok(())
}
