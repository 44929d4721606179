// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
# Neurite Compartments

Splits a neuron skeleton into functional compartments using synaptic flow
centrality (Schneider-Mizell et al., 2016) and scores how cleanly inputs and
outputs are segregated between axon and dendrite.

## Pipeline

```text
SkeletonTree ─► synapse_mapper ─► flow ─► centrality ─► classifier ─► segregation
  (nodes)        post / pre       subtree   per-node      labels        index +
                 per node         totals    score                       neuron type
```

Every stage reads and fills the same per-node [`NodeRecord`] table, built
fresh for each neuron. [`classify_neuron`] runs the whole pipeline;
[`classify_batch`] maps it over many neurons on a rayon pool with per-neuron
failure isolation.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod batch;
pub mod centrality;
pub mod classifier;
pub mod error;
pub mod flow;
pub mod options;
pub mod pipeline;
pub mod record;
pub mod segregation;
pub mod synapse_mapper;

pub use batch::{classify_batch, BatchFailure, BatchReport};
pub use centrality::{flow_centrality, score_flow_centrality};
pub use classifier::{classify_compartments, ClassifierOutcome, Partition};
pub use error::{ClassificationWarning, CompartmentError, CompartmentResult};
pub use flow::{propagate_flow, FlowTotals};
pub use options::ClassifierOptions;
pub use pipeline::{
    classify_neuron, ClassificationResult, CompartmentTotals, NeuronInput, SynapseOverlay,
    SynapseSite,
};
pub use record::NodeRecord;
pub use segregation::{
    binary_entropy, segregation_index, NeuronType, SegregationScore, SynapseCounts,
};
pub use synapse_mapper::{map_synapses, MappingReport};

// Re-export the data model so callers need a single import
pub use neurite_structures::{
    CompartmentLabel, FlowMode, MalformedTreeError, NodeId, Point3, SkeletonNode, SkeletonTree,
    SynapseDirection, SynapseRecord,
};
