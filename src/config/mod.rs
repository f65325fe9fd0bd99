//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//! - Named heuristic thresholds via [`Heuristics`]
//!
//! # Example
//!
//! ```
//! use chain_of_draft::config::{AutoCotConfig, Config, Heuristics, DEFAULT_LOG_LEVEL};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     log_level: DEFAULT_LOG_LEVEL.to_string(),
//!     disable_cot_logging: false,
//!     auto_cot: AutoCotConfig::default(),
//!     heuristics: Heuristics::default(),
//! };
//!
//! assert!(config.render_thoughts());
//! assert_eq!(config.auto_cot.trigger_phrase, "Let's think step by step");
//! ```

mod heuristics;
mod validation;

pub use heuristics::*;
pub use validation::{validate_config, VALID_LOG_LEVELS};

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::display::THOUGHT_LOG_TARGET;
use crate::error::ConfigError;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default Auto-CoT trigger phrase.
pub const DEFAULT_AUTO_TRIGGER: &str = "Let's think step by step";

/// Auto-CoT switches.
///
/// Controls when the server volunteers mode, problem-type and template
/// suggestions for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCotConfig {
    /// Configured trigger phrase. Empty disables trigger detection.
    pub trigger_phrase: String,
    /// Diversify template example thoughts per problem type.
    pub diversity_sampling: bool,
    /// Offer a matching template with auto-CoT suggestions.
    pub template_suggestion: bool,
    /// Analyze content when suggesting a mode. When off, the session's
    /// current mode is suggested as-is.
    pub context_aware: bool,
}

impl Default for AutoCotConfig {
    fn default() -> Self {
        Self {
            trigger_phrase: DEFAULT_AUTO_TRIGGER.to_string(),
            diversity_sampling: true,
            template_suggestion: true,
            context_aware: true,
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Suppress rendered thoughts on stderr.
    pub disable_cot_logging: bool,
    /// Auto-CoT switches.
    pub auto_cot: AutoCotConfig,
    /// Heuristic thresholds.
    pub heuristics: Heuristics,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            disable_cot_logging: false,
            auto_cot: AutoCotConfig::default(),
            heuristics: Heuristics::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `DISABLE_COT_LOGGING`: Suppress thought rendering (default: `false`)
    /// - `COT_AUTO_TRIGGER`: Trigger phrase (default: `Let's think step by step`)
    /// - `COT_DIVERSITY_SAMPLING`: Diversify template examples (default: `true`)
    /// - `COT_TEMPLATE_SUGGESTION`: Suggest templates (default: `true`)
    /// - `COT_CONTEXT_AWARE`: Content-aware mode suggestion (default: `true`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - A boolean variable is not `true`/`false`/`1`/`0`
    /// - Any value fails validation (see [`validate_config`])
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let disable_cot_logging = parse_env_bool("DISABLE_COT_LOGGING", false)?;

        let auto_cot = AutoCotConfig {
            trigger_phrase: std::env::var("COT_AUTO_TRIGGER")
                .unwrap_or_else(|_| DEFAULT_AUTO_TRIGGER.into()),
            diversity_sampling: parse_env_bool("COT_DIVERSITY_SAMPLING", true)?,
            template_suggestion: parse_env_bool("COT_TEMPLATE_SUGGESTION", true)?,
            context_aware: parse_env_bool("COT_CONTEXT_AWARE", true)?,
        };

        let config = Self {
            log_level,
            disable_cot_logging,
            auto_cot,
            heuristics: Heuristics::default(),
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Whether thoughts should be rendered to stderr.
    #[must_use]
    pub const fn render_thoughts(&self) -> bool {
        !self.disable_cot_logging
    }
}

/// Build the subscriber filter for `level`.
///
/// Falls back to [`DEFAULT_LOG_LEVEL`] when `level` does not parse. Rendered
/// thoughts stay visible at any level.
#[must_use]
pub fn log_filter(level: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    match format!("{THOUGHT_LOG_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Parse an environment variable as a boolean, using a default if not set.
fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        match val.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                var: name.into(),
                reason: "must be true or false".into(),
            }),
        }
    })
}
