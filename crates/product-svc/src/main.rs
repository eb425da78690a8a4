//! `product-svc` — product CRUD service entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Verify the error variant table.
//! 3. Initialise the telemetry pipeline (tracing + optional OTLP).
//! 4. Create the product store.
//! 5. Build the Axum router and serve until Ctrl-C / SIGTERM.

mod config;
mod product;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use product::InMemoryProductStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Error taxonomy
    // -----------------------------------------------------------------------
    common::error::check_variant_table().context("error variant table is inconsistent")?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.listen_port,
        otlp = cfg.otlp_endpoint().is_some(),
        "product-svc starting"
    );

    // -----------------------------------------------------------------------
    // 4. Product store
    // -----------------------------------------------------------------------
    let store = InMemoryProductStore::new(cfg.max_products);

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(store));
    let router = server::router::build(state, cfg.request_timeout());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("product-svc stopped");
    telemetry::shutdown_telemetry();
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
