// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! # Neurite Configuration System
//!
//! Type-safe configuration loader for neurite with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neurite_config::{load_config, NeuriteConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Flow mode: {}", config.classifier.mode);
//! println!("Batch workers: {}", config.batch.workers);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "neurite_configuration.toml";

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    OVERRIDE_KEYS,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid override {key}={value}: {reason}")]
    InvalidOverride {
        key: String,
        value: String,
        reason: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = NeuriteConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: NeuriteConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
