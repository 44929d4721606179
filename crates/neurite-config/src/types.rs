// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neurite_configuration.toml`.

use neurite_structures::FlowMode;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuriteConfig {
    pub classifier: ClassifierConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

/// Compartment classifier settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub mode: FlowMode,
    /// Weight output synapses by their number of downstream partners
    pub polypre: bool,
    /// Enables primary dendrite labelling
    pub primary_dendrite: bool,
    /// Fraction of the maximum flow centrality marking primary dendrite
    pub primary_dendrite_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: FlowMode::Average,
            polypre: true,
            primary_dendrite: true,
            primary_dendrite_threshold: 0.9,
        }
    }
}

impl ClassifierConfig {
    /// Threshold to hand to the classifier, `None` when labelling is disabled
    pub fn effective_primary_dendrite_threshold(&self) -> Option<f64> {
        self.primary_dendrite
            .then_some(self.primary_dendrite_threshold)
    }
}

/// Batch runner settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; 0 = rayon default
    pub workers: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}
