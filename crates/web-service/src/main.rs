//! Observability demo web service
//!
//! Entry point: loads configuration, wires telemetry and metrics, connects
//! the optional PostgreSQL and Redis integrations, and serves the HTTP API
//! with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use web_service::cache::{CacheClient, RetryPolicy};
use web_service::config::Config;
use web_service::routes::AppState;
use web_service::{observability, routes, tasks};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first: telemetry setup depends on it
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    observability::telemetry::init(&config)?;

    info!("Starting web service");
    info!(
        environment = %config.environment,
        port = config.port,
        database_configured = config.database_url.is_some(),
        redis_configured = config.redis_url.is_some(),
        tracing_export = config.trace_endpoint.is_some(),
        "Configuration loaded successfully"
    );

    // Install the process-wide Prometheus recorder before any request lands
    let metrics_handle = observability::metrics::install_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        e
    })?;

    // The pool is lazy: a configured-but-unreachable database keeps startup
    // alive and surfaces as failing probes instead
    let pool = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(20)
                .acquire_timeout(Duration::from_secs(2))
                .idle_timeout(Duration::from_secs(30))
                .connect_lazy(url)
                .map_err(|e| {
                    error!("Invalid database configuration: {}", e);
                    e
                })?;
            info!("Database pool initialized");
            Some(pool)
        }
        None => {
            info!("DATABASE_URL not set, database integration disabled");
            None
        }
    };

    let cache = match &config.redis_url {
        Some(url) => match CacheClient::connect(url, &RetryPolicy::default()).await {
            Ok(client) => {
                info!("Redis connection established");
                Some(client)
            }
            Err(e) => {
                warn!(error = %e, "Redis unreachable, cache integration disabled");
                None
            }
        },
        None => {
            info!("REDIS_URL not set, cache integration disabled");
            None
        }
    };

    let bind_address = format!("0.0.0.0:{}", config.port);

    // Create application state
    let state = Arc::new(AppState::new(config, pool, cache));

    // Background runtime metrics sampler
    let cancel_token = CancellationToken::new();
    let sampler = tokio::spawn(tasks::runtime_metrics::run_runtime_metrics_sampler(
        state.clone(),
        cancel_token.clone(),
    ));

    // Build application routes
    let app = routes::build_routes(state.clone(), metrics_handle);

    // Parse bind address
    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Web service listening on {}", addr);

    // Start server with graceful shutdown support
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Ordered teardown: stop background work, then release connections,
    // then flush traces
    cancel_token.cancel();
    if let Err(e) = sampler.await {
        warn!(error = %e, "Runtime metrics sampler did not exit cleanly");
    }

    if let Some(pool) = &state.pool {
        pool.close().await;
        info!("Database pool closed");
    }

    observability::telemetry::shutdown();

    info!("Web service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
/// Returns when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
