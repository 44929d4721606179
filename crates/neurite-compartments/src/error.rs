// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

use neurite_structures::MalformedTreeError;
use serde::{Deserialize, Serialize};

/// Result type for compartment classification
pub type CompartmentResult<T> = Result<T, CompartmentError>;

/// Errors that abort classification of a neuron
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompartmentError {
    #[error("Malformed skeleton: {0}")]
    MalformedTree(#[from] MalformedTreeError),

    #[error("Invalid classifier option: {0}")]
    InvalidOption(String),

    #[error("Worker pool unavailable: {0}")]
    WorkerPool(String),
}

/// Conditions that degrade a classification without aborting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationWarning {
    /// One or both synapse directions are missing; scores are degenerate
    #[error("No synapse data: {inputs} inputs, {outputs} outputs")]
    NoSynapseData { inputs: u64, outputs: u64 },

    #[error("{count} synapses reference nodes absent from the skeleton")]
    UnmappedSynapses { count: usize },
}
