//! Transport layer for the MCP server.
//!
//! Only stdio is supported; stdout carries JSON-RPC and logs go to stderr.

use rmcp::service::{serve_server, RoleServer, RunningService};
use rmcp::transport::io::stdio;

use super::tools::ChainServer;
use crate::error::{AppError, McpError};

/// Stdio transport handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioTransport;

impl StdioTransport {
    /// Creates a stdio transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Starts serving `server` over stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns [`McpError::Internal`] if the MCP handshake fails.
    pub async fn serve(
        self,
        server: ChainServer,
    ) -> Result<RunningService<RoleServer, ChainServer>, AppError> {
        serve_server(server, stdio()).await.map_err(|e| {
            AppError::Mcp(McpError::Internal {
                message: e.to_string(),
            })
        })
    }
}
