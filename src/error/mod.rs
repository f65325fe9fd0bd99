//! Error types for the Chain-of-Draft server.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ValidationError`]: Malformed or out-of-range submission fields
//! - [`ChainError`]: Operational failures inside the thought chain
//! - [`SubmitError`]: Everything `submit_thought` can report
//! - [`McpError`]: MCP protocol errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` and are recoverable: the core never
//! panics or exits on bad input.

use thiserror::Error;

/// Top-level application error.
///
/// This is the main error type returned by the binary-facing API.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submission validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Chain operation error.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// MCP protocol error.
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Submission validation errors.
///
/// Raised before any state is touched; a rejected submission leaves the
/// session exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The submission was not a JSON object.
    #[error("Invalid input: expected an object of named fields")]
    NotAnObject,

    /// A required field is absent.
    #[error("Invalid {field}: missing required field")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// A field has the wrong type, an unknown enum value, or is out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The offending field, if the error concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField { field } | Self::InvalidValue { field, .. } => Some(field),
        }
    }
}

/// Operational errors raised while mutating or querying a chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Rollback target is outside `1..=history_len`.
    #[error("Cannot rollback to thought {target}: history contains {history_len} thoughts")]
    RollbackUnavailable {
        /// Requested thought number.
        target: u32,
        /// History length at the time of the request.
        history_len: usize,
    },

    /// No record carries the requested thought number.
    #[error("Cannot rollback to thought {target}: no thought with that number in history")]
    RollbackTargetNotFound {
        /// Requested thought number.
        target: u32,
    },

    /// Consensus was requested over an empty set of paths.
    #[error("Cannot compute consensus over zero reasoning paths")]
    NoConsensusPaths,
}

impl ChainError {
    /// Name of the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::RollbackUnavailable { .. } | Self::RollbackTargetNotFound { .. } => "rollback",
            Self::NoConsensusPaths => "consensus",
        }
    }
}

/// Failure of a thought submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The submission was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The submission was well-formed but its operation failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl SubmitError {
    /// Name of the failing operation, if operational.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Validation(_) => None,
            Self::Chain(err) => Some(err.operation()),
        }
    }
}

/// MCP protocol errors.
///
/// These errors represent failures in MCP JSON-RPC communication.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum McpError {
    /// Internal server error.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
