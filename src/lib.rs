//! Chain-of-Draft MCP Server
//!
//! A Rust MCP server that tracks a session-scoped chain of reasoning
//! "thoughts", classifying each into a verbosity mode and offering
//! branching, multi-path consensus and rollback.
//!
//! # Features
//!
//! - Draft / concise / standard / auto modes with word ceilings
//! - Problem-type detection and auto-CoT trigger suggestions
//! - Branch suggestions with allocated branch identifiers
//! - Self-consistency consensus over synthesized reasoning paths
//! - Per-thought snapshots and audited rollback
//! - Built-in reasoning templates
//!
//! # Quick Start
//!
//! ```bash
//! LOG_LEVEL=debug ./chain-of-draft
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     stdin      ┌─────────────────┐
//! │ MCP client  │───────────────▶│   MCP Server    │
//! │             │◀───────────────│     (Rust)      │
//! └─────────────┘     stdout     └────────┬────────┘
//!                                         │
//!                                         ▼
//!                                  ChainSession (memory)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chain;
pub mod config;
pub mod display;
pub mod error;
pub mod server;
pub mod templates;
pub mod traits;

#[cfg(test)]
mod test_utils;
