//! CRM backend - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (no store: data routes degrade)
//! cargo run --bin crm-api
//!
//! # Run against a hosted store
//! API_STORE_URL=https://project.supabase.co API_STORE_ANON_KEY=... \
//!     API_STORE_SERVICE_KEY=... cargo run --bin crm-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORE_URL` - Base URL of the hosted store
//! * `API_STORE_ANON_KEY` - Restricted store key
//! * `API_STORE_SERVICE_KEY` - Elevated store key, server-side only
//! * `API_STORE_TIMEOUT_SECS` - Per-request store timeout
//! * `API_ADMIN_EMAIL`, `API_ADMIN_PASSWORD`, `API_ADMIN_NAME` - Bootstrap admin

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use infra_store::{ConnectionProvider, Privilege};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting CRM API server"
    );

    let provider = Arc::new(ConnectionProvider::new(config.store_config()));
    log_store_status(&provider);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;

    let app = create_router(provider, config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over `API_LOG_LEVEL`
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Builds both store tiers up front so misconfiguration shows at startup
fn log_store_status(provider: &ConnectionProvider) {
    let restricted = provider.client_for(Privilege::Restricted);
    let full = provider.client_for(Privilege::Full);

    if !restricted.is_configured() {
        tracing::warn!(
            "Store is not configured; reads return empty results and writes fail with 503"
        );
    }
    tracing::info!(
        backend = %full.backend(),
        granted = ?full.granted(),
        downgraded = full.is_downgraded(),
        "Store ready"
    );
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
