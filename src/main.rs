//! Mediculture Portal Server
//!
//! Run with: cargo run --bin mediculture
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see [`Config::load_default`]),
//! then overridden by environment variables:
//! - `MEDICULTURE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `MEDICULTURE_PORT`: Port to listen on (default: 8082)
//! - `MEDICULTURE_BACKEND_URL`: Clinic backend base URL (default: http://localhost:3000/api)
//! - `MEDICULTURE_LOG_FORMAT`: pretty or json
//! - `RUST_LOG`: Log filter (default: mediculture=info,tower_http=debug)

use anyhow::Context;
use mediculture::api::{serve, AppState};
use mediculture::backend::{BackendClient, ClinicBackend};
use mediculture::config::{Config, LoggingConfig};
use mediculture::session::SessionStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Mediculture portal v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Clinic backend: {}", config.backend.url);

    let backend = BackendClient::new(config.backend.client_config())
        .context("Failed to build clinic backend client")?;

    // Login refuses to proceed while the backend is down, so say so up front
    match backend.health().await {
        Ok(health) if health.is_ok() => tracing::info!(
            database = health.database_name(),
            "Clinic backend connection verified"
        ),
        Ok(health) => tracing::warn!(status = %health.status, "Clinic backend reports unhealthy"),
        Err(e) => tracing::warn!("Clinic backend not available: {} (logins will fail)", e),
    }

    let sessions = SessionStore::with_limits(config.session.clone(), config.session_limits);
    tracing::info!(
        doctor = %config.session.name,
        idle_timeout_minutes = config.session_limits.idle_timeout_minutes,
        max_sessions = config.session_limits.max_sessions,
        "Demo doctor configured"
    );

    let state = AppState::new(Arc::new(backend), sessions);

    serve(state, &config.server)
        .await
        .context("Portal server failed")?;

    tracing::info!("Mediculture portal stopped");
    Ok(())
}

/// Install the global subscriber: pretty by default, JSON lines on request
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("mediculture={},tower_http=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
