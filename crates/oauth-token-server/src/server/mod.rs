//! HTTP server for the token endpoints.

pub mod handlers;
pub mod transport;

use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use transport::HttpState;

/// Token server: OAuth components plus the HTTP router in front of them.
pub struct TokenServer {
    config: Config,
    state: Arc<HttpState>,
}

impl TokenServer {
    /// Create a new server from configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let state = Arc::new(HttpState::from_config(&config));
        Self { config, state }
    }

    /// Build the router for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        transport::create_router(Arc::clone(&self.state), self.config.enable_resource_route)
    }

    /// Run the HTTP server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self) -> anyhow::Result<()> {
        let addr = self.config.listen_addr;
        let router = self.router();

        tracing::info!(
            token_ttl = ?self.config.token_ttl,
            store_retention = ?self.config.store_retention,
            resource_route = self.config.enable_resource_route,
            "Starting token server"
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for TokenServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServer")
            .field("listen_addr", &self.config.listen_addr)
            .field("resource_route", &self.config.enable_resource_route)
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
