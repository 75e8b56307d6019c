//! Hotel POS - API Server Binary
//!
//! This binary starts the HTTP API server for the hotel point-of-sale system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (SQLite file under ./data)
//! cargo run --bin hotel-pos
//!
//! # Run against the in-memory store on another port
//! HOTEL_STORAGE__BACKEND=memory HOTEL_SERVER__PORT=9090 cargo run --bin hotel-pos
//! ```
//!
//! # Environment Variables
//!
//! * `HOTEL_CONFIG` - Path of a TOML config file (default: `./hotel-pos.toml` if present)
//! * `HOTEL_SERVER__HOST`, `HOTEL_SERVER__PORT` - Listen address (default: 0.0.0.0:8080)
//! * `HOTEL_STORAGE__BACKEND` - `sqlite` or `memory` (default: sqlite)
//! * `HOTEL_STORAGE__DATA_DIR` - Directory of the database file (default: data)
//! * `HOTEL_AUTH__JWT_SECRET` - Token signing secret (required in production)
//! * `HOTEL_BILLING__CURRENCY`, `HOTEL_BILLING__TIMEZONE` - e.g. `LKR`, `Asia/Colombo`
//! * `HOTEL_LOG__LEVEL`, `HOTEL_LOG__JSON` - Log filter and JSON output
//! * `RUST_LOG` - Overrides the configured log filter

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::Storage;
use interface_api::{config::AppConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens storage, makes sure an
/// administrator exists and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.log.level, config.log.json);

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        backend = ?config.storage.backend,
        "Starting Hotel POS API Server"
    );

    let storage = Storage::open(config.storage.backend, &config.database_config())
        .await
        .context("Failed to open storage")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    let state = AppState::new(storage, config);
    if state.identity.provision_default_admin().await? {
        tracing::warn!("Default administrator created; change its password");
    }

    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
