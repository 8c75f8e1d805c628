//! HTTP server lifecycle: startup, optional migrations and graceful shutdown.

use crate::api::create_router;
use crate::config::{Environment, Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Connects to the database, builds the router and serves until a
    /// shutdown signal arrives.
    ///
    /// # Errors
    /// Invalid JWT settings, pool or migration failures, and bind errors.
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env(),
            "Application starting"
        );
        tracing::info!(
            max_connections = settings.database.max_connections,
            min_connections = settings.database.min_connections,
            auto_migrate = settings.database.auto_migrate,
            "Database configuration loaded"
        );
        tracing::info!(
            owner_page_size = settings.listing.owner_page_size,
            admin_page_size = settings.listing.admin_page_size,
            public_page_size = settings.listing.public_page_size,
            max_page_size = settings.listing.max_page_size,
            "Listing configuration loaded"
        );

        settings.jwt.validate().map_err(|e| {
            tracing::error!(error = %e, "JWT configuration validation failed");
            anyhow::anyhow!("JWT configuration validation failed: {}", e)
        })?;

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url).await?;
            tracing::info!(count = applied.len(), "Pending migrations applied");
        }

        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool, settings.jwt.clone(), settings.listing);
        serve(create_router(state), &settings.server.address()).await
    }
}

/// Binds `address` and serves `router` with graceful shutdown.
pub async fn serve(router: Router, address: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await.map_err(|e| {
        tracing::error!(error = %e, address = %address, "Failed to bind to address");
        anyhow::anyhow!("Failed to bind to {}: {}", address, e)
    })?;

    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed that signal source is skipped and the
/// other one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
