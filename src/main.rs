//! Taproom Server
//!
//! Beer inventory web service: HTML UI plus versioned JSON API.
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   TAPROOM_HOST - Server host (default: 0.0.0.0)
//!   PORT / TAPROOM_PORT - Server port (default: 8080)
//!   TAPROOM_SEED - Seed a sample inventory at startup
//!   RUST_LOG    - Log level (default: info)

use std::sync::Arc;
use taproom::api::{create_router, handlers::AppState, start_cleanup_task};
use taproom::{ServerConfig, TelemetryCollector};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ServerConfig::from_env();

    // Initialize telemetry
    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    // Create app state
    let state = Arc::new(AppState::new(telemetry));

    if config.seed {
        let seeded = state.store.seed_samples();
        info!("🌱 Seeded {} sample beers", seeded);
    }

    // Start background cleanup task for rate limiter
    start_cleanup_task();
    info!("🧹 Background cleanup task started");

    // Create router
    let app = create_router(state);

    let addr = config.socket_addr()?;

    info!("🍺 Taproom starting on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  GET    /                        - HTML inventory listing");
    info!("  GET    /beers/new               - Creation form");
    info!("  GET    /api/v1/beers/index      - List beers (JSON)");
    info!("  POST   /api/v1/beers/create     - Create a beer");
    info!("  PUT    /api/v1/beers/:id        - Update a beer");
    info!("  DELETE /api/v1/beers/:id        - Destroy a beer");
    info!("  GET    /api/v1/stats            - Service statistics");
    info!("  GET    /api/v1/health           - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");
    info!("");

    // Start server with graceful shutdown
    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // Graceful shutdown sequence
    info!("");
    info!("🛑 Shutdown signal received, cleaning up...");

    // Export final telemetry
    let stats = telemetry_for_shutdown.get_stats();
    info!("   Requests served: {}", stats.requests_served);
    info!("   Beers created: {}", stats.beers_created);
    info!("   Beers updated: {}", stats.beers_updated);
    info!("   Beers destroyed: {}", stats.beers_destroyed);

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("   ✅ Stats exported to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to export stats: {}", e),
    }

    info!("👋 Taproom shutdown complete");

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════╗
    ║                                          ║
    ║   T A P R O O M                          ║
    ║   Beer inventory service v0.1.0          ║
    ║                                          ║
    ╚══════════════════════════════════════════╝
    "#
    );
}
