//! Dashboard server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::client::{ConsoleApi, GraphqlClient};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::routes::create_router;
use crate::state::DashboardState;

/// Dashboard server for the console UI API.
///
/// Serves the overview and saved search page models as JSON, composed from
/// the console and search GraphQL endpoints on every request.
#[derive(Debug)]
pub struct DashboardServer<C = GraphqlClient> {
    state: Arc<DashboardState<C>>,
}

impl<C> Clone for DashboardServer<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl DashboardServer<GraphqlClient> {
    /// Create a server talking to the endpoints named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let client = GraphqlClient::new(&config)?;
        Ok(Self::new(config, client))
    }
}

impl<C: ConsoleApi + 'static> DashboardServer<C> {
    /// Create a new dashboard server with the given configuration and client.
    #[must_use]
    pub fn new(config: DashboardConfig, client: C) -> Self {
        Self {
            state: Arc::new(DashboardState::new(config, client)),
        }
    }

    /// Get the dashboard state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<DashboardState<C>> {
        self.state.clone()
    }

    /// Start the dashboard server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> DashboardResult<()> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Start the dashboard server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> DashboardResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| DashboardError::BindFailed(addr, e))?;

        info!(addr = %addr, "Dashboard server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        info!("Dashboard server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_from_default_config() {
        let server = DashboardServer::from_config(DashboardConfig::default()).unwrap();

        assert_eq!(server.state().client().search_url(), crate::config::DEFAULT_SEARCH_URL);
    }

    #[test]
    fn test_server_rejects_invalid_config() {
        let config = DashboardConfig::new("console", "search");

        assert!(DashboardServer::from_config(config).is_err());
    }

    #[test]
    fn test_server_clone_shares_state() {
        let server = DashboardServer::from_config(DashboardConfig::default()).unwrap();
        let cloned = server.clone();

        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[tokio::test]
    async fn test_bind_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = DashboardServer::from_config(DashboardConfig::default()).unwrap();

        let result = server.serve_with_shutdown(addr, async {}).await;

        assert!(matches!(result, Err(DashboardError::BindFailed(_, _))));
    }
}
