//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::time::Duration;

use crate::api::routes::create_router;
use crate::config::{DatabaseEngine, Environment, Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::external::{CharactersClient, build_http_client};
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Builds the store selected by `database.engine`
    /// 2. Builds the characters API client
    /// 3. Binds to the configured address
    /// 4. Serves with graceful shutdown
    ///
    /// # Errors
    /// - Pool initialization or migration errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.build_state().await?;
        tracing::info!("Application state created");

        let router = create_router(
            state,
            Duration::from_secs(self.settings.server.request_timeout),
        );

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
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

    async fn build_state(&self) -> anyhow::Result<AppState> {
        let characters = &self.settings.characters;
        let http = build_http_client(characters.timeout)?;
        let client = CharactersClient::new(http, &characters.base_url, &characters.liveness_url);
        tracing::info!(base_url = %characters.base_url, "Characters API client configured");

        let database = &self.settings.database;
        let state = match database.engine()? {
            DatabaseEngine::Postgres => {
                // Connection URL is not logged, it may carry credentials
                tracing::info!(
                    max_connections = %database.max_connections,
                    min_connections = %database.min_connections,
                    connection_timeout = %database.connection_timeout,
                    "Initializing database connection pool..."
                );

                if database.auto_migrate {
                    let applied = run_pending_migrations(database.url.clone()).await?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                let pool = establish_async_connection_pool(database).await?;
                tracing::info!("Database connection pool initialized");
                AppState::postgres(pool, client)
            }
            DatabaseEngine::Memory => {
                tracing::warn!("Using the in-memory store, data is lost on shutdown");
                AppState::in_memory(client)
            }
        };

        Ok(state)
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
