// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use neurite_structures::FlowMode;
use serde::{Deserialize, Serialize};

use crate::error::{CompartmentError, CompartmentResult};

/// Default fraction of the maximum flow centrality that marks primary dendrite
pub const DEFAULT_PRIMARY_DENDRITE_THRESHOLD: f64 = 0.9;

/// Per-call classification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    pub mode: FlowMode,

    /// Weight each output synapse by its number of downstream partners
    pub polypre: bool,

    /// `None` skips primary dendrite labelling
    pub primary_dendrite_threshold: Option<f64>,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            mode: FlowMode::Average,
            polypre: true,
            primary_dendrite_threshold: Some(DEFAULT_PRIMARY_DENDRITE_THRESHOLD),
        }
    }
}

impl ClassifierOptions {
    pub fn with_mode(mut self, mode: FlowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_polypre(mut self, polypre: bool) -> Self {
        self.polypre = polypre;
        self
    }

    pub fn with_primary_dendrite_threshold(mut self, threshold: Option<f64>) -> Self {
        self.primary_dendrite_threshold = threshold;
        self
    }

    /// Reject thresholds outside (0, 1]
    pub fn validate(&self) -> CompartmentResult<()> {
        if let Some(threshold) = self.primary_dendrite_threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(CompartmentError::InvalidOption(format!(
                    "primary_dendrite_threshold must be in (0, 1], got {}",
                    threshold
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl From<&neurite_config::ClassifierConfig> for ClassifierOptions {
    fn from(config: &neurite_config::ClassifierConfig) -> Self {
        Self {
            mode: config.mode,
            polypre: config.polypre,
            primary_dendrite_threshold: config.effective_primary_dendrite_threshold(),
        }
    }
}
