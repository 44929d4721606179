// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

//! # Neurite
//!
//! Axon/dendrite compartment classification for reconstructed neuron
//! skeletons, based on synaptic flow centrality, with a segregation index that
//! separates interneurons from projection neurons.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neurite = "0.1"  # Default: config + observability
//! ```
//!
//! ```rust
//! use neurite::prelude::*;
//!
//! let nodes = vec![
//!     SkeletonNode::bare(1, None),
//!     SkeletonNode::bare(2, Some(1)),
//!     SkeletonNode::bare(3, Some(2)),
//! ];
//! let synapses = vec![SynapseRecord::input(100, 3), SynapseRecord::output(200, 2, 1)];
//!
//! let result = classify_neuron(&NeuronInput::new(nodes, synapses), &ClassifierOptions::default())?;
//! println!("{} with segregation index {:.2}", result.neuron_type, result.segregation_index());
//! # Ok::<(), neurite::compartments::CompartmentError>(())
//! ```
//!
//! ## Feature Flags
//! - **`config`** (default): `neurite_configuration.toml` loading with env/CLI overrides
//! - **`observability`** (default): tracing subscriber setup and per-crate debug flags
//! - **`file-logging`**: per-run JSON log files
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neurite-structures                         │
//! │  (SkeletonNode, SynapseRecord, SkeletonTree, labels)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: neurite-compartments                       │
//! │  (flow propagation, centrality, labels, segregation)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: neurite-config, neurite-observability  │
//! │  (TOML settings, logging)                               │
//! └─────────────────────────────────────────────────────────┘
//! ```

// Re-export foundation
pub use neurite_structures as structures;

// Re-export algorithms
pub use neurite_compartments as compartments;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use neurite_config as config;

#[cfg(feature = "observability")]
pub use neurite_observability as observability;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build classifier options from a loaded configuration, rejecting invalid values
#[cfg(feature = "config")]
pub fn classifier_options(
    config: &config::NeuriteConfig,
) -> compartments::CompartmentResult<compartments::ClassifierOptions> {
    let options = compartments::ClassifierOptions::from(&config.classifier);
    options.validate()?;
    Ok(options)
}

/// Translate the `[logging]` section into subscriber options
#[cfg(all(feature = "config", feature = "observability"))]
pub fn logging_options(logging: &config::LoggingConfig) -> observability::LoggingOptions {
    let format = if logging.is_json() {
        observability::LogFormat::Json
    } else {
        observability::LogFormat::Text
    };
    observability::LoggingOptions::new(logging.level.clone(), format)
}

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::structures::{
        CompartmentLabel, FlowMode, MalformedTreeError, NodeId, Point3, SkeletonNode,
        SkeletonTree, SynapseDirection, SynapseRecord,
    };

    pub use crate::compartments::{
        classify_batch, classify_neuron, BatchReport, ClassificationResult, ClassifierOptions,
        NeuronInput, NeuronType,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, NeuriteConfig};
}
