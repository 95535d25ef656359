//! apicache - An HTTP-fronted key/value cache
//!
//! Serves GET/POST/DELETE over a concurrency-bounded, TTL-aware cache
//! coordinator backed by a pluggable key/value driver.

mod api;
mod cache;
mod config;
mod drivers;
mod error;
mod models;

use std::future::IntoFuture;
use std::net::SocketAddr;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::{CacheConfig, CacheCoordinator};
use config::Config;
use drivers::build_driver;

/// Main entry point for the apicache server.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Build the configured backend driver
/// 4. Create the cache coordinator over the driver
/// 5. Create the Axum router with all endpoints
/// 6. Serve HTTP with graceful shutdown on SIGINT/SIGTERM
/// 7. Close the coordinator once the server has drained
#[tokio::main]
async fn main() {
    // Load configuration before tracing so the debug flag can pick the
    // default log level; RUST_LOG still overrides it
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let default_filter = if config.debug {
        "apicache=debug,tower_http=debug"
    } else {
        "apicache=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting apicache server");
    info!(
        "Configuration loaded: driver={}, max_conn={}, conn_timeout={:?}, port={}",
        config.driver, config.max_conn, config.conn_timeout, config.server_port
    );

    let driver = match build_driver(&config) {
        Ok(driver) => driver,
        Err(err) => {
            error!("Driver setup failed: {err}");
            std::process::exit(1);
        }
    };

    let cache = match CacheCoordinator::new(
        CacheConfig {
            max_conn: config.max_conn,
            conn_timeout: config.conn_timeout,
        },
        driver,
    ) {
        Ok(cache) => cache,
        Err(err) => {
            error!("Cache setup failed: {err}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(cache.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // `drained` fires once the shutdown signal has been seen; from that point
    // open connections get `shutdown_timeout` to finish before being dropped
    let (drained_tx, drained_rx) = tokio::sync::oneshot::channel::<()>();
    let graceful = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = drained_tx.send(());
        })
        .into_future();

    tokio::pin!(graceful);

    let shutdown_timeout = config.shutdown_timeout;
    tokio::select! {
        result = &mut graceful => {
            if let Err(err) = result {
                error!("Server error: {err}");
            }
        }
        () = async {
            let _ = drained_rx.await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!("Shutdown grace period exceeded, dropping open connections");
        }
    }

    if let Err(err) = cache.close().await {
        warn!("Cache close error: {err}");
    }

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
