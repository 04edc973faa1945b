//! pb-server: HTTP API for peaks, climbers and climbs.
//!
//! Serves the named detail routes (`toy-detail`, `climber-detail`) and a
//! JSON CRUD API under `/api`, backed by the pb-db pool. Shuts down
//! gracefully on SIGINT/SIGTERM.

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use pb_core::config::Config;

use crate::context::AppContext;

/// Start the peakbagger server.
///
/// Opens (and migrates) the database, builds the router, and serves until a
/// shutdown signal is received.
pub async fn start(config: Config) -> pb_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_path = config.database.path.clone();
    let existed = db_path.exists();
    let db = pb_db::pool::init_pool(&db_path, config.database.pool_size)?;
    if existed {
        tracing::info!("Database opened (existing) at {}", db_path.display());
    } else {
        tracing::info!("Database created (new) at {}", db_path.display());
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let app = router::build_router(AppContext::new(db));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| pb_core::Error::Internal(format!("Failed to bind to {host}:{port}: {e}")))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
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
                tracing::warn!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received");
}
