// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that configuration values are within valid ranges before any
//! neuron is classified.

use crate::{ConfigError, ConfigResult, NeuriteConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Primary dendrite threshold in (0, 1]
/// - Known log level and format
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NeuriteConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_classifier(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_classifier(config: &NeuriteConfig, errors: &mut Vec<ConfigValidationError>) {
    let threshold = config.classifier.primary_dendrite_threshold;
    if config.classifier.primary_dendrite && !(threshold > 0.0 && threshold <= 1.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "classifier.primary_dendrite_threshold".to_string(),
            reason: format!("must be in (0, 1], got {}", threshold),
        });
    }
}

fn validate_logging(config: &NeuriteConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: "must be 'text' or 'json'".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&NeuriteConfig::default()).is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = NeuriteConfig::default();
        config.classifier.primary_dendrite_threshold = 1.5;

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("primary_dendrite_threshold"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_threshold_ignored_when_disabled() {
        let mut config = NeuriteConfig::default();
        config.classifier.primary_dendrite = false;
        config.classifier.primary_dendrite_threshold = 0.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut config = NeuriteConfig::default();
        config.classifier.primary_dendrite_threshold = 0.0;
        config.logging.level = "loud".to_string();
        config.logging.format = "xml".to_string();

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("primary_dendrite_threshold"));
            assert!(msg.contains("logging.level"));
            assert!(msg.contains("logging.format"));
        } else {
            panic!("expected validation error");
        }
    }
}
