//! MCP server implementation.
//!
//! This module provides:
//! - Tool definitions with rmcp macros
//! - Shared state around one [`ChainSession`](crate::chain::ChainSession)
//! - The stdio transport
//!
//! # Example
//!
//! ```no_run
//! use chain_of_draft::config::Config;
//! use chain_of_draft::server::McpServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! McpServer::new(Config::default()).run_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod mcp;
mod tools;
mod transport;
mod types;

pub use mcp::McpServer;
pub use tools::{ChainOfThoughtArgs, ChainServer, LoadTemplateArgs};
pub use transport::StdioTransport;
pub use types::AppState;
