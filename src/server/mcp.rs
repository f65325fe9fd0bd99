//! Main MCP server orchestration.

use tracing::info;

use super::tools::ChainServer;
use super::transport::StdioTransport;
use super::types::AppState;
use crate::config::Config;
use crate::error::{AppError, McpError};

/// Entry point that wires configuration, state and transport together.
#[derive(Debug)]
pub struct McpServer {
    config: Config,
}

impl McpServer {
    /// Creates a new MCP server with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Serves over stdio until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails or the service task aborts.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run_stdio(&self) -> Result<(), AppError> {
        let server = ChainServer::new(AppState::new(self.config.clone()));
        let running = StdioTransport::new().serve(server).await?;
        info!("MCP server ready on stdio");

        let reason = running.waiting().await.map_err(|e| McpError::Internal {
            message: e.to_string(),
        })?;
        info!(?reason, "MCP service stopped");
        Ok(())
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
