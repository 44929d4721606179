// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeuriteConfig, CONFIG_FILE_NAME};
use neurite_structures::FlowMode;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the neurite configuration file
///
/// Search order:
/// 1. `NEURITE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neurite_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEURITE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEURITE_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet NEURITE_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or an
/// override cannot be applied
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuriteConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuriteConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEURITE_FLOW_MODE` -> `classifier.mode`
/// - `NEURITE_POLYPRE` -> `classifier.polypre`
/// - `NEURITE_PRIMARY_DENDRITE_THRESHOLD` -> `classifier.primary_dendrite_threshold`
///   (`none` disables primary dendrite labelling)
/// - `NEURITE_BATCH_WORKERS` -> `batch.workers`
/// - `NEURITE_LOG_LEVEL` -> `logging.level`
/// - `NEURITE_LOG_FORMAT` -> `logging.format`
///
/// # Errors
///
/// Returns `ConfigError::InvalidOverride` naming the variable whose value
/// cannot be parsed
pub fn apply_environment_overrides(config: &mut NeuriteConfig) -> ConfigResult<()> {
    for (key, var) in ENV_OVERRIDES {
        if let Ok(value) = env::var(var) {
            apply_override(config, key, &value).map_err(|err| match err {
                ConfigError::InvalidOverride { value, reason, .. } => ConfigError::InvalidOverride {
                    key: var.to_string(),
                    value,
                    reason,
                },
                other => other,
            })?;
        }
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"flow_mode": "centrifugal", "polypre": "false"}`)
///
/// Recognised keys: `flow_mode` (alias `mode`), `polypre`,
/// `primary_dendrite_threshold`, `batch_workers`, `log_level`, `log_format`.
/// Keys are applied in sorted order so the outcome does not depend on map order.
///
/// # Errors
///
/// Returns `ConfigError::InvalidOverride` for an unknown key or a value that
/// cannot be parsed; `config` may be partly updated in that case
pub fn apply_cli_overrides(
    config: &mut NeuriteConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    let mut keys: Vec<&String> = cli_args.keys().collect();
    keys.sort();
    for key in keys {
        apply_override(config, key, &cli_args[key])?;
    }
    Ok(())
}

/// Override keys understood by [`apply_cli_overrides`]
pub const OVERRIDE_KEYS: [&str; 7] = [
    "flow_mode",
    "mode",
    "polypre",
    "primary_dendrite_threshold",
    "batch_workers",
    "log_level",
    "log_format",
];

const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("flow_mode", "NEURITE_FLOW_MODE"),
    ("polypre", "NEURITE_POLYPRE"),
    ("primary_dendrite_threshold", "NEURITE_PRIMARY_DENDRITE_THRESHOLD"),
    ("batch_workers", "NEURITE_BATCH_WORKERS"),
    ("log_level", "NEURITE_LOG_LEVEL"),
    ("log_format", "NEURITE_LOG_FORMAT"),
];

fn apply_override(config: &mut NeuriteConfig, key: &str, value: &str) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    };

    match key {
        // Classifier settings
        "flow_mode" | "mode" => {
            config.classifier.mode = value.parse::<FlowMode>().map_err(invalid)?;
        }
        "polypre" => {
            config.classifier.polypre = parse_flag(value)
                .ok_or_else(|| invalid("expected true/false, yes/no or 1/0".to_string()))?;
        }
        "primary_dendrite_threshold" => {
            if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("off") {
                config.classifier.primary_dendrite = false;
            } else {
                let threshold = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| invalid(format!("{} (use a number in (0, 1] or 'none')", e)))?;
                config.classifier.primary_dendrite = true;
                config.classifier.primary_dendrite_threshold = threshold;
            }
        }

        // Batch settings
        "batch_workers" => {
            config.batch.workers = value
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(e.to_string()))?;
        }

        // Logging settings (checked by validate_config)
        "log_level" => config.logging.level = value.to_string(),
        "log_format" => config.logging.format = value.to_string(),

        _ => {
            return Err(invalid(format!(
                "unknown setting; expected one of {}",
                OVERRIDE_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
