//! Semester Status - an academic calendar dashboard
//!
//! This is the main entry point for the semester-status application.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use semester_status::{
    api::create_router,
    calendar::CalendarConfig,
    config::Config,
    preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore},
    state::AppState,
    tasks::tick_task,
    utils::{shutdown_signal, Clock, FixedClock, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "semester_status={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting semester-status v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, calendar={}",
        config.host,
        config.port,
        config.calendar.display()
    );

    let calendar = CalendarConfig::load(&config.calendar)
        .with_context(|| format!("Invalid calendar {}", config.calendar.display()))?;

    let clock: Arc<dyn Clock> = match config.at {
        Some(at) => {
            info!("Clock frozen at {}", at);
            Arc::new(FixedClock(at))
        }
        None => Arc::new(SystemClock),
    };

    let preferences: Arc<dyn PreferenceStore> = if config.no_persist {
        Arc::new(MemoryPreferenceStore::new())
    } else {
        Arc::new(JsonFilePreferenceStore::open(config.prefs.clone())?)
    };

    let state = Arc::new(AppState::new(
        calendar,
        clock,
        preferences,
        config.port,
        config.host.clone(),
    ));

    if config.once {
        let view = state.dashboard(state.now())?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    // Start the once-per-second ticker
    let ticker = tokio::spawn(tick_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status        - Latest ticker output");
    info!("  GET  /snapshot      - Semester snapshot (optional ?at=)");
    info!("  GET  /countdown     - Countdown to the next boundary (optional ?at=)");
    info!("  GET  /dashboard     - Composed dashboard view (optional ?at=)");
    info!("  GET  /theme         - Current display theme");
    info!("  POST /theme/toggle  - Switch between light and dark");
    info!("  GET  /health        - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handling failed: {:#}", e),
            }
        }
    }

    ticker.abort();
    info!("Server shutdown complete");
    Ok(())
}
