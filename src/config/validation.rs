//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges and mutually consistent.

use super::Config;
use crate::error::ConfigError;

/// Accepted `LOG_LEVEL` values.
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `LOG_LEVEL` must be one of trace, debug, info, warn, error
/// - the draft word ceiling must be positive and below the concise ceiling
/// - the template match cutoff must be positive
/// - the maximum path count must be at least 1
/// - the efficiency baseline must be positive
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !VALID_LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::InvalidValue {
            var: "LOG_LEVEL".into(),
            reason: format!("must be one of {}", VALID_LOG_LEVELS.join(", ")),
        });
    }

    let h = &config.heuristics;

    if h.draft_max_words == 0 || h.draft_max_words >= h.concise_max_words {
        return Err(ConfigError::InvalidValue {
            var: "draft_max_words".into(),
            reason: format!(
                "must be positive and below the concise ceiling ({})",
                h.concise_max_words
            ),
        });
    }

    if h.template_match_cutoff <= 0.0 {
        return Err(ConfigError::InvalidValue {
            var: "template_match_cutoff".into(),
            reason: "must be positive".into(),
        });
    }

    if h.max_path_count == 0 {
        return Err(ConfigError::InvalidValue {
            var: "max_path_count".into(),
            reason: "must be at least 1".into(),
        });
    }

    if h.standard_avg_words <= 0.0 {
        return Err(ConfigError::InvalidValue {
            var: "standard_avg_words".into(),
            reason: "must be positive".into(),
        });
    }

    Ok(())
}
